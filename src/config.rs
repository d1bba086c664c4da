use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::filter::{Classifier, FilterError, FilterState, Stage, Toggle};
use crate::logging::LogLevel;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid filter configuration: {0}")]
    Filter(#[from] FilterError),

    #[error("Poll interval must be greater than zero")]
    InvalidInterval,

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub poll_interval_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
    pub stage_order: Vec<Stage>,
    /// Toggle name -> value, applied through the cascade at startup.
    pub filters: BTreeMap<String, bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::INFO,
            poll_interval_ms: 1000,
            snapshot_path: None,
            stage_order: Stage::DEFAULT_ORDER.to_vec(),
            filters: BTreeMap::new(),
        }
    }
}

impl Config {
    const CONFIG_PATH: &'static str = "bouncer.toml";

    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Self::CONFIG_PATH)
    }

    /// Reads `path` if it exists, then lets `BOUNCER_*` environment variables
    /// override individual keys.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("BOUNCER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        info!("Configuration loaded (file: {:?}, present: {})", path, path.exists());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        self.classifier()?;
        self.filter_state()?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn classifier(&self) -> Result<Classifier, FilterError> {
        Classifier::new(self.stage_order.clone())
    }

    /// Starting filter state. Assignments run in toggle declaration order, so
    /// `show_all` is applied before anything it would otherwise overwrite.
    pub fn filter_state(&self) -> Result<FilterState, FilterError> {
        let mut assignments = self
            .filters
            .iter()
            .map(|(name, value)| name.parse::<Toggle>().map(|toggle| (toggle, *value)))
            .collect::<Result<Vec<_>, FilterError>>()?;
        assignments.sort_by_key(|(toggle, _)| *toggle);

        let mut state = FilterState::default();
        for (toggle, value) in assignments {
            state.set_toggle(toggle, value);
        }
        Ok(state)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}
