use std::io::stderr;

use fboss_config::LogFilter;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Installs the global subscriber. Log lines go to stderr so they never mix with command output.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init(level: LogFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stderr))
        .init();
}
