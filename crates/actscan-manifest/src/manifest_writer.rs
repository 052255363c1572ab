//! YAML serialization of the manifest
//!
//! The deployer reads `manifest.yml` back, so everything written here must parse
//! into the same structure with [`from_yaml`].

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::types::Manifest;

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE: &str = "manifest.yml";

pub fn to_yaml(manifest: &Manifest) -> Result<String, ManifestError> {
    Ok(serde_yaml::to_string(manifest)?)
}

pub fn from_yaml(content: &str) -> Result<Manifest, ManifestError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Write the manifest as YAML, creating parent directories as needed
pub fn write_to_path(manifest: &Manifest, output_path: &Path) -> Result<(), ManifestError> {
    debug!("Writing manifest to: {:?}", output_path);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let yaml = to_yaml(manifest)?;
    fs::write(output_path, &yaml)?;

    info!("Manifest written successfully to: {:?}", output_path);
    info!("Total packages: {}", manifest.packages.len());

    Ok(())
}

pub fn read_from_path(manifest_path: &Path) -> Result<Manifest, ManifestError> {
    debug!("Reading manifest from: {:?}", manifest_path);

    let content = fs::read_to_string(manifest_path)?;
    from_yaml(&content)
}
