use std::{
    fs, io,
    path::{Path, PathBuf},
};

use island_survival_core::GameConfig;
use thiserror::Error;

/// Failures raised while reading a configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("could not read config file {}", path.display())]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML for a game configuration.
    #[error("could not parse config file {}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Values given on the command line that take precedence over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    /// Replacement world seed.
    pub(crate) seed: Option<u64>,
    /// Replacement session length in seconds.
    pub(crate) session_seconds: Option<f32>,
}

impl Overrides {
    /// Writes every provided value into `config`.
    pub(crate) fn apply(self, config: &mut GameConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(seconds) = self.session_seconds {
            config.session_seconds = seconds;
        }
    }
}

/// Reads the configuration file, or the defaults when no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<GameConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &contents)
}

fn parse_config(path: &Path, contents: &str) -> Result<GameConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
