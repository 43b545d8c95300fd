use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Settings about data files
    pub(crate) files: FileConfig,

    /// Wallet/identity settings
    pub(crate) wallet: WalletConfig,

    /// Game-over commentary settings
    pub(crate) commentary: CommentaryConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("rathunter").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the directory profile & leaderboard data should be stored
    /// under: the directory given in the configuration or, if that is not
    /// set, the default platform data directory
    pub(crate) fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.files.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|p| p.join("rathunter"))
            .ok_or(ConfigError::NoPath)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Directory under which profiles, the leaderboard, and the high score
    /// are stored
    pub(crate) data_dir: Option<PathBuf>,

    /// Whether to persist anything at all; `false` keeps the session
    /// entirely in memory
    pub(crate) save_profile: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            data_dir: None,
            save_profile: true,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct WalletConfig {
    /// Externally-supplied wallet address to use when connecting.  When
    /// unset, connecting fabricates a guest address instead.
    pub(crate) address: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct CommentaryConfig {
    /// Whether to generate game-over commentary at all
    pub(crate) enabled: bool,

    /// Path to a TOML phrasebook overriding the built-in lines
    pub(crate) phrasebook: Option<PathBuf>,
}

impl Default for CommentaryConfig {
    fn default() -> CommentaryConfig {
        CommentaryConfig {
            enabled: true,
            phrasebook: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
