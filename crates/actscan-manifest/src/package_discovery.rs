//! Discovery of packages and actions under `<root>/packages`
//!
//! Layout understood by the scanner:
//!
//! ```text
//! packages/
//!   hello.js            -> action `hello` in the implicit `default` package
//!   utils/              -> package `utils`
//!     greet.py          -> single-file action `greet`
//!     report/           -> multi-file action `report`, packaged to `utils/report.zip`
//!     old.zip           -> stale archive, skipped
//! ```
//!
//! Entries are visited in file-name order so the result never depends on the
//! platform's directory listing order.

use crate::errors::{ManifestError, PackagingError};
use crate::packager::Packager;
use crate::runtime::{action_name, is_archive, is_supported_runtime, EntryKind};
use crate::types::{Action, Manifest, Package};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Directory under the project root that holds all packages
pub const PACKAGES_DIR: &str = "packages";

/// A multi-file action that could not be packaged and was left out of the manifest
#[derive(Debug)]
pub struct PackagingFailure {
    pub package: String,
    pub entry: String,
    pub error: PackagingError,
}

/// Recoverable problems met during a scan
#[derive(Debug, Default)]
pub struct ScanReport {
    pub failures: Vec<PackagingFailure>,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone)]
struct DirEntry {
    name: String,
    path: PathBuf,
}

/// Walks `packages/` and builds the manifest
pub struct PackageScanner<'a> {
    packager: &'a dyn Packager,
}

impl<'a> PackageScanner<'a> {
    pub fn new(packager: &'a dyn Packager) -> Self {
        PackageScanner { packager }
    }

    /// Scan `<root>/packages`.
    ///
    /// A missing `packages` folder yields an empty manifest. Packaging failures are
    /// reported and collected in the returned [`ScanReport`]; only I/O errors while
    /// listing directories abort the scan.
    pub fn scan_packages(&self, root: &Path) -> Result<(Manifest, ScanReport), ManifestError> {
        let mut manifest = Manifest::new();
        let mut report = ScanReport::default();

        let packages_path = root.join(PACKAGES_DIR);
        if !packages_path.exists() {
            debug!("No packages folder at {:?}", packages_path);
            return Ok((manifest, report));
        }

        actscan_logger::progress("Scanning packages folder...");
        for entry in list_dir(&packages_path)? {
            match EntryKind::of_path(&entry.path) {
                EntryKind::Dir => {
                    manifest.declare_package(&entry.name);
                    self.scan_single_package(&mut manifest, &entry.path, &mut report)?;
                }
                EntryKind::File => {
                    if !is_supported_runtime(&entry.name) {
                        debug!("Skipping unsupported file: {:?}", entry.path);
                        continue;
                    }
                    let name = action_name(&entry.name);
                    debug!("Default package action: {}", name);
                    manifest
                        .default_package_mut()
                        .insert_action(name, Action::web(&entry.path));
                }
            }
        }
        actscan_logger::progress("Packages scanned");

        info!(
            "Found {} packages with {} actions",
            manifest.packages.len(),
            manifest.action_count()
        );
        Ok((manifest, report))
    }

    /// Scan one package directory and add its actions to the matching package.
    ///
    /// The package is looked up by the directory's name and created if absent.
    pub fn scan_single_package(
        &self,
        manifest: &mut Manifest,
        package_path: &Path,
        report: &mut ScanReport,
    ) -> Result<(), ManifestError> {
        let package_name = package_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        debug!("Scanning package {}", package_name);

        let package = manifest.packages.entry(package_name.clone()).or_default();
        for entry in list_dir(package_path)? {
            if is_archive(&entry.name) {
                debug!("Skipping stale archive: {:?}", entry.path);
                continue;
            }

            match EntryKind::of_path(&entry.path) {
                EntryKind::File if is_supported_runtime(&entry.name) => {
                    package.insert_action(action_name(&entry.name), Action::web(&entry.path));
                }
                EntryKind::File => {
                    debug!("Skipping unsupported file: {:?}", entry.path);
                }
                EntryKind::Dir => {
                    if let Err(error) = self.package_action(package, &entry) {
                        actscan_logger::error(&error.to_string());
                        warn!("Skipping {}/{}: {}", package_name, entry.name, error);
                        report.failures.push(PackagingFailure {
                            package: package_name.clone(),
                            entry: entry.name,
                            error,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Package a multi-file action; the action is registered only once its archive exists
    fn package_action(&self, package: &mut Package, entry: &DirEntry) -> Result<(), PackagingError> {
        actscan_logger::spinner_start(&format!("Packaging {}", entry.name));
        let result = self.packager.package(&entry.path);
        actscan_logger::spinner_stop();

        let archive = result?;
        debug!("Packaged {:?} -> {:?}", entry.path, archive);
        package.insert_action(action_name(&entry.name), Action::web(archive));
        Ok(())
    }
}

/// List the direct children of `dir`, sorted by file name
fn list_dir(dir: &Path) -> Result<Vec<DirEntry>, ManifestError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            path: entry.into_path(),
        });
    }
    Ok(entries)
}
