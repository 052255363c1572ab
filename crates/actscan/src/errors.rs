//! Top-level error type for the actscan binary

use actscan_config::ConfigError;
use actscan_manifest::ManifestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
