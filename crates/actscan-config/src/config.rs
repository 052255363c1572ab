use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use which::which;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "ACTSCAN_CONFIG";

/// Environment variable naming the output directory
pub const TMP_DIR_ENV: &str = "NUV_TMP";

pub const DEFAULT_PACKAGER: &str = "nuv";

pub const DEFAULT_PACKAGER_TIMEOUT_SECS: u64 = 300;

/// Optional `actscan.toml` contents
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmp_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packager: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packager_args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packager_timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Config file location: `$ACTSCAN_CONFIG`, else `~/.config/actscan/actscan.toml`
    pub fn path_with<F>(env: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env_path) = non_empty(env(CONFIG_ENV)) {
            return Some(PathBuf::from(env_path));
        }

        #[cfg(not(target_os = "windows"))]
        let default = dirs::home_dir().map(|home| {
            home.join(".config")
                .join("actscan")
                .join("actscan.toml")
        });

        #[cfg(target_os = "windows")]
        let default = dirs::config_dir().map(|dir| dir.join("actscan").join("actscan.toml"));

        default
    }

    pub fn path() -> Option<PathBuf> {
        Self::path_with(|key| std::env::var(key).ok())
    }

    /// Load from the default location; no config file means defaults
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(ConfigFile::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Values given on the command line; they win over everything else
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tmp_dir: Option<PathBuf>,
    pub packager: Option<String>,
    pub packager_args: Vec<String>,
    pub packager_timeout_secs: Option<u64>,
}

/// Fully resolved settings for one scan run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Directory receiving `manifest.yml` and the run log
    pub tmp_dir: PathBuf,
    /// Packaging tool, resolved on `PATH` when possible
    pub packager: PathBuf,
    /// Arguments placed before `-zipf <dir>`
    pub packager_args: Vec<String>,
    /// `None` lets the packaging tool run unbounded
    pub packager_timeout: Option<Duration>,
}

impl ScanSettings {
    /// Resolve settings with precedence: overrides > environment > config file > defaults.
    ///
    /// `env` looks up environment variables so callers decide where they come from.
    pub fn resolve<F>(file: &ConfigFile, overrides: &Overrides, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tmp_dir = overrides
            .tmp_dir
            .clone()
            .or_else(|| non_empty(env(TMP_DIR_ENV)).map(PathBuf::from))
            .or_else(|| file.tmp_dir.clone().map(PathBuf::from))
            .ok_or(ConfigError::MissingTmpDir)?;

        let packager_name = overrides
            .packager
            .clone()
            .or_else(|| file.packager.clone())
            .unwrap_or_else(|| DEFAULT_PACKAGER.to_string());

        // Arguments belong to the program they were given with
        let packager_args = if overrides.packager.is_some() || !overrides.packager_args.is_empty() {
            overrides.packager_args.clone()
        } else {
            file.packager_args.clone()
        };

        let timeout_secs = overrides
            .packager_timeout_secs
            .or(file.packager_timeout_secs)
            .unwrap_or(DEFAULT_PACKAGER_TIMEOUT_SECS);

        Ok(ScanSettings {
            tmp_dir,
            packager: resolve_program(&packager_name),
            packager_args,
            packager_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }

    /// Resolve against the real process environment and config file
    pub fn from_environment(overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = ConfigFile::load()?;
        Self::resolve(&file, overrides, |key| std::env::var(key).ok())
    }
}

/// Find `name` on `PATH`, falling back to the name itself
fn resolve_program(name: &str) -> PathBuf {
    which(name).unwrap_or_else(|_| PathBuf::from(name))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
