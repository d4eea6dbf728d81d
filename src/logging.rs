use crate::config::LogSettings;
use std::path::Path;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn default_directives(level: &str) -> String {
    format!("hobbyist={level},tower_http={level}")
}

/// Daily-rotated appender writing `<file name>.<date>` next to `log_path`.
/// The parent directory is created when missing.
fn file_appender(log_path: &Path) -> RollingFileAppender {
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("hobbyist.log")),
    )
}

/// Initialize the logging system
///
/// `RUST_LOG` wins over the configured level. When `settings.file` is set,
/// JSON logs are also written to a daily-rotated file next to it.
pub fn init(settings: &LogSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&settings.level)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    if let Some(log_path) = &settings.file {
        let file_layer = fmt::layer()
            .with_writer(file_appender(log_path))
            .with_ansi(false)
            .json();

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }
}
