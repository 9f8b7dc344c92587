use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::{self, LoggingSettings};

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Where log lines go: the configured file, else the XDG state default.
pub fn log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(config::default_log_path)
}

/// Install the global logger.
///
/// The terminal belongs to the UI, so records are written to a file; when
/// no file can be opened they go to stderr.
pub fn init(settings: &LoggingSettings) {
    let level = config::log_level_filter(&settings.level).unwrap_or(log::LevelFilter::Info);

    let mut clog = colog::default_builder();
    clog.filter(None, level);

    let mut fallback_reason = None;
    if let Some(path) = log_path(settings) {
        match open_log_file(&path) {
            Ok(file) => {
                clog.write_style(env_logger::WriteStyle::Never);
                clog.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => fallback_reason = Some(format!("{}: {e}", path.display())),
        }
    }

    // A logger may already be installed (tests, embedding); keep it.
    if clog.try_init().is_err() {
        return;
    }

    if let Some(reason) = fallback_reason {
        log::warn!("cannot open log file {reason}; logging to stderr");
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
        default_hook(panic_info);
    }));
}
