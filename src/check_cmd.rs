//! Check command: parse and validate a configuration file.

use anyhow::{Context, Result};
use tracing::info_span;

use knnbench_dataset::SyntheticSource;

use crate::cli::CheckArgs;
use crate::config::KnnBenchConfig;
use crate::convert;

/// Validate the configuration and print the resolved settings.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();
    let config = KnnBenchConfig::load(&args.config)?;

    convert::validate_benchmark(&config.benchmark)?;
    let task_cfg = convert::build_task_config(&config.model, &config.benchmark)?;
    convert::build_grid(&config.grid)?;
    SyntheticSource::new(&convert::build_synthetic_shape(&config.dataset))
        .context("invalid [dataset] configuration")?;

    let resolved = toml::to_string_pretty(&config).context("failed to render config")?;
    println!("# {} is valid", args.config.display());
    print!("{resolved}");
    println!(
        "# metric = {}, strategy = {}, predict_bound = {}",
        task_cfg.metric(),
        task_cfg.knn().strategy(),
        task_cfg.predict_bound()
    );
    Ok(())
}
