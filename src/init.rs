//! All preliminary steps to prepare filtering
use std::fs::OpenOptions;

use log::info;
use simplelog::*;

use logfilter::configuration::config::{Config, MissingSeparator};
use logfilter::context;
use logfilter::misc::error::{AppCustomErrorKind, AppError, AppResult};

use crate::args::CliOptions;

/// Builds the configuration: defaults, then the YAML file if any, then command line values.
pub fn init_config(options: &CliOptions) -> AppResult<Config> {
    let mut config = match &options.config_file {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };

    if let Some(source) = &options.source {
        config.source = source.clone();
    }
    if let Some(destination) = &options.destination {
        config.destination = destination.clone();
    }
    if let Some(marker) = &options.marker {
        config.marker = marker.clone();
    }
    if let Some(separator) = &options.separator {
        config.separator = separator.clone();
    }
    if options.abort_on_malformed {
        config.missing_separator = MissingSeparator::Abort;
    }

    Ok(config)
}

/// Create new logger, optionally resetting its file
pub fn init_log(options: &CliOptions) -> AppResult<()> {
    let logger = &options.logger;

    // options depend on wheter we need to reset the log
    let writable = if options.reset_log {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(logger)
    } else {
        OpenOptions::new().append(true).create(true).open(logger)
    }
    .map_err(|e| context!(e, "unable to create log file: {}", logger.display()))?;

    // initialize logger
    WriteLogger::init(
        options.logger_level,
        simplelog::ConfigBuilder::new()
            .set_time_format("%Y-%b-%d %H:%M:%S.%f".to_string())
            .build(),
        writable,
    )
    .map_err(|e| {
        AppError::new(
            AppCustomErrorKind::LoggerInit,
            &format!("unable to initialize logger: {}", e),
        )
    })?;

    // useful traces
    info!("=============================> starting logfilter");
    info!("options: {:?}", &options);

    Ok(())
}
