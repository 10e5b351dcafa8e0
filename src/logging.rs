//! Logging bootstrap for the host process.
//!
//! Called once at process attach, before any hook can fire. Lines go to
//! stderr and, when configured, to a file next to the host executable.

use std::path::Path;
use std::{process, thread};

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Configure the global logger as requested in `cfg`. `dir` is the
/// directory the optional log file lands in.
pub fn init(cfg: &LoggingConfig, dir: &Path) -> Result<(), fern::InitError> {
    let level = match cfg.level.to_uppercase().as_str() {
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    let log_path = cfg
        .enable
        .then(|| dir.join(cfg.file.as_deref().unwrap_or("capture.log")));

    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}][pid={}][tid={:?}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                process::id(),
                thread::current().id(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(path) = log_path {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
