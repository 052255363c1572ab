//! `.env` support
//!
//! Every `KEY=VALUE` pair found in `<root>/.env` is injected into the env map of
//! every package. Lines that do not split into exactly two parts on `=` are
//! ignored, so `FOO` and `A=B=C` contribute nothing.

use crate::errors::ManifestError;
use crate::types::Manifest;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the environment file at the project root
pub const ENV_FILE: &str = ".env";

/// Parse `.env` content into key/value pairs, in file order
pub fn parse_env(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let mut parts = line.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => Some((key.to_string(), value.to_string())),
                _ => None,
            }
        })
        .collect()
}

/// Merge `<root>/.env` into every package of `manifest`.
///
/// Must run after all packages are discovered. A missing file leaves the
/// manifest untouched.
pub fn merge_env_file(root: &Path, mut manifest: Manifest) -> Result<Manifest, ManifestError> {
    let env_path = root.join(ENV_FILE);
    if !env_path.exists() {
        debug!("No env file at {:?}", env_path);
        return Ok(manifest);
    }

    actscan_logger::progress("Scanning .env file...");
    let content = fs::read_to_string(&env_path)?;
    let pairs = parse_env(&content);
    debug!("Injecting {} env entries", pairs.len());

    for (key, value) in &pairs {
        manifest.broadcast_env(key, value);
    }

    Ok(manifest)
}
