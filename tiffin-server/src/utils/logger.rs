//! Logging Infrastructure
//!
//! Features:
//! - Console output, pretty in development and JSON in production
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent audit logs (target `audit`, never deleted)
//! - Permanent security logs (target `security`, never deleted)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Days an application log file is kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Clean up application log files older than [`APP_LOG_RETENTION_DAYS`]
///
/// Audit and security logs are never touched.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    use chrono::{Local, TimeZone};

    let cutoff = Local::now() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // app.YYYY-MM-DD (tracing-appender daily naming)
        let Some(date_part) = name.strip_prefix("app.") else {
            continue;
        };
        let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d") else {
            continue;
        };
        let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
            continue;
        };
        if let Some(local) = Local.from_local_datetime(&midnight).single()
            && local < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(())
}

fn is_app_event(meta: &Metadata<'_>) -> bool {
    meta.target() != "audit" && meta.target() != "security"
}

fn is_audit_event(meta: &Metadata<'_>) -> bool {
    meta.target() == "audit"
}

fn is_security_event(meta: &Metadata<'_>) -> bool {
    meta.target() == "security"
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

fn file_layer(
    dir: PathBuf,
    prefix: &str,
    json_format: bool,
    keep: fn(&Metadata<'_>) -> bool,
) -> BoxedLayer {
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, prefix);
    let base = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(appender));

    if json_format {
        base.json()
            .with_current_span(true)
            .with_filter(filter_fn(keep))
            .boxed()
    } else {
        base.with_filter(filter_fn(keep)).boxed()
    }
}

/// Initialize the logging system with daily rotating logs
///
/// # Arguments
/// * `level` - Log level, overridden by `RUST_LOG` when set
/// * `json_format` - JSON output (production) or pretty output (development)
/// * `log_dir` - Optional directory for file logging (e.g. `Some("./tiffin-data/logs")`)
///
/// Must run inside a tokio runtime when `log_dir` is given, since it spawns
/// the hourly cleanup task.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers = vec![console_layer(json_format)];

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let audit_log_dir = log_dir.join("audit");
        let security_log_dir = log_dir.join("security");

        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&audit_log_dir)?;
        fs::create_dir_all(&security_log_dir)?;

        layers.push(file_layer(app_log_dir, "app", json_format, is_app_event));
        layers.push(file_layer(audit_log_dir, "audit", json_format, is_audit_event));
        layers.push(file_layer(
            security_log_dir,
            "security",
            json_format,
            is_security_event,
        ));

        tokio::spawn(periodic_cleanup(log_dir.to_path_buf()));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Console only
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

/// Audit log helper - records business operations
///
/// Written to `logs/audit/` and never deleted.
///
/// ```ignore
/// audit_log!(user.uid.as_str(), "approve", "preorder:o-1");
/// audit_log!(user.uid.as_str(), "create", "menu_item:m-1", "Masala Dosa");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($user_id:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            user_id = %$user_id,
            action = %$action,
            resource = %$resource,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($user_id:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            user_id = %$user_id,
            action = %$action,
            resource = %$resource,
            details = %$details,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

/// Security log helper - records authentication and authorization events
///
/// Written to `logs/security/` and never deleted.
///
/// ```ignore
/// security_log!(WARN, "login_failed", email = %email);
/// security_log!(WARN, "role_denied", uid = %user.uid, required = ?roles);
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            level = "WARN",
            $($arg)*
        );
    };
    (ERROR, $event:expr, $($arg:tt)*) => {
        tracing::error!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            level = "ERROR",
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            timestamp = chrono::Local::now().to_rfc3339(),
            level = "INFO",
            $($arg)*
        );
    };
}
