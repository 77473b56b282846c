use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use fboss_core::CLIENT_NAME;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

/// Client-side settings for talking to the agent. Every field can be
/// overridden on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub log_level: LogFilter,
}

impl Config {
    pub fn load(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            std::fs::read_to_string(path)
                .map(|s| toml::from_str(&s))?
                .map_err(Into::into)
        } else {
            for path in default_paths() {
                match std::fs::read_to_string(&path) {
                    Ok(s) => {
                        let config = toml::from_str(&s)?;
                        tracing::debug!("Loaded config file from {}", path.display());
                        return Ok(config);
                    }
                    Err(_) => {
                        tracing::trace!("No config file at {}", path.display());
                    }
                }
            }

            Ok(Self::default())
        }
    }

    /// The configured timeout. A `timeout-ms` of 0 means no timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

fn default_paths() -> impl Iterator<Item = PathBuf> {
    [Path::new("/etc"), Path::new("/usr/lib")]
        .into_iter()
        .map(|base_path| base_path.join(CLIENT_NAME).join("config.toml"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFilter {
    None,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogFilter> for LevelFilter {
    fn from(value: LogFilter) -> Self {
        match value {
            LogFilter::None => Self::OFF,
            LogFilter::Error => Self::ERROR,
            LogFilter::Warn => Self::WARN,
            LogFilter::Info => Self::INFO,
            LogFilter::Debug => Self::DEBUG,
            LogFilter::Trace => Self::TRACE,
        }
    }
}
