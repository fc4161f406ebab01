use std::fs;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::modules::system::config::get_data_dir;
use crate::modules::system::request_context;

const LOG_RETENTION_DAYS: u64 = 7;

struct LocalTimer;

impl tracing_subscriber::fmt::time::FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        write!(w, "{}", now.to_rfc3339())
    }
}

pub fn get_log_dir() -> Result<PathBuf, String> {
    let log_dir = get_data_dir()?.join("logs");

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;
    }

    Ok(log_dir)
}

// Console always; the rolling file layer only when the log directory is usable.
pub fn init_logger() {
    let _ = tracing_log::LogTracer::init();

    let console_layer = fmt::Layer::new()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_timer(LocalTimer);
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match get_log_dir() {
        Ok(log_dir) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "chat.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_timer(LocalTimer);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("Failed to initialize log directory: {}", e);
            (None, None)
        }
    };

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init();
    // The writer thread must outlive main's stack frame.
    std::mem::forget(guard);

    info!("Log system initialized");
    if let Err(e) = cleanup_old_logs(LOG_RETENTION_DAYS) {
        warn!("Failed to cleanup old logs: {}", e);
    }
}

pub fn cleanup_old_logs(days_to_keep: u64) -> Result<usize, String> {
    let log_dir = get_log_dir()?;
    cleanup_logs_in(&log_dir, days_to_keep)
}

fn cleanup_logs_in(log_dir: &std::path::Path, days_to_keep: u64) -> Result<usize, String> {
    use std::time::{Duration, SystemTime};

    let cutoff = SystemTime::now()
        .checked_sub(Duration::from_secs(days_to_keep * 24 * 60 * 60))
        .ok_or_else(|| "Failed to compute log cutoff time".to_string())?;

    let entries =
        fs::read_dir(log_dir).map_err(|e| format!("Failed to read log directory: {}", e))?;

    let mut deleted_count = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => continue,
        };
        if modified < cutoff {
            match fs::remove_file(&path) {
                Ok(()) => {
                    deleted_count += 1;
                    info!("Deleted old log file (expired): {:?}", path.file_name());
                }
                Err(e) => warn!("Failed to delete old log file {:?}: {}", path, e),
            }
        }
    }

    Ok(deleted_count)
}

pub fn log_info(message: &str) {
    match request_context::current_request_id() {
        Some(request_id) => info!(request_id = %request_id, "{}", message),
        None => info!("{}", message),
    }
}

pub fn log_warn(message: &str) {
    match request_context::current_request_id() {
        Some(request_id) => warn!(request_id = %request_id, "{}", message),
        None => warn!("{}", message),
    }
}

pub fn log_error(message: &str) {
    match request_context::current_request_id() {
        Some(request_id) => error!(request_id = %request_id, "{}", message),
        None => error!("{}", message),
    }
}
