use std::path::PathBuf;

/// Error type for configuration loading and resolution
#[derive(Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`crate::ConfigFile`]
    Parse { path: PathBuf, message: String },
    /// No output directory from flags, environment or config file
    MissingTmpDir,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Invalid config {}: {}", path.display(), message)
            }
            ConfigError::MissingTmpDir => write!(
                f,
                "Output directory not configured: set {} or pass --tmp-dir",
                crate::config::TMP_DIR_ENV
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}
