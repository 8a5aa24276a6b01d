use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use tracing::warn;

const ENV_PREFIX: &str = "JOKES";
const DEFAULT_OUTPUT: &str = "jokes.json";
const DEFAULT_CHUNK_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Where `segment` writes the merged entries.
    pub output: PathBuf,
    /// Pages segmented per parallel batch.
    pub chunk_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Settings {
    /// Read `JOKES_*` environment variables, falling back to defaults.
    pub fn load() -> Self {
        match Self::from_env(Environment::with_prefix(ENV_PREFIX)) {
            Ok(s) => s,
            Err(e) => {
                warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
        }
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("chunk_size", DEFAULT_CHUNK_SIZE as u64)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(Settings {
            chunk_size: settings.chunk_size.max(1),
            ..settings
        })
    }
}
