//! Manifest assembly: scan, merge `.env`, write `manifest.yml`
//!
//! The pipeline is strictly linear and single-threaded. The `.env` merge runs
//! after discovery so every package receives the environment.

use actscan_manifest::{
    merge_env_file, write_to_path, Manifest, ManifestError, PackageScanner, Packager, ScanReport,
    MANIFEST_FILE,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of one assembly run
#[derive(Debug)]
pub struct AssembledManifest {
    pub manifest: Manifest,
    pub report: ScanReport,
    pub path: PathBuf,
}

pub struct ManifestAssembler<'a> {
    output_dir: &'a Path,
    packager: &'a dyn Packager,
}

impl<'a> ManifestAssembler<'a> {
    pub fn new(output_dir: &'a Path, packager: &'a dyn Packager) -> Self {
        ManifestAssembler {
            output_dir,
            packager,
        }
    }

    /// Where the manifest is written
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE)
    }

    /// Scan `root` and write the manifest
    pub fn run(&self, root: &Path) -> Result<AssembledManifest, ManifestError> {
        debug!("Assembling manifest for {:?}", root);

        let (manifest, report) = PackageScanner::new(self.packager).scan_packages(root)?;
        let manifest = merge_env_file(root, manifest)?;

        let path = self.manifest_path();
        write_to_path(&manifest, &path)?;

        Ok(AssembledManifest {
            manifest,
            report,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actscan_manifest::{read_from_path, Action, PackagingError};
    use std::fs;
    use tempfile::TempDir;

    /// Pretends every directory was archived as `<dir>.zip`
    struct ZipNamePackager;

    impl Packager for ZipNamePackager {
        fn package(&self, dir: &Path) -> Result<PathBuf, PackagingError> {
            Ok(dir.with_extension("zip"))
        }
    }

    #[test]
    fn test_run_writes_merged_manifest() {
        let (Ok(project), Ok(output)) = (TempDir::new(), TempDir::new()) else {
            return;
        };
        let root = project.path();
        let packages = root.join("packages");
        assert!(fs::create_dir_all(packages.join("p1").join("multi")).is_ok());
        assert!(fs::create_dir_all(packages.join("p2")).is_ok());
        assert!(fs::write(packages.join("p1").join("a.py"), "").is_ok());
        assert!(fs::write(packages.join("top.js"), "").is_ok());
        assert!(fs::write(root.join(".env"), "A=1\nBROKEN\n").is_ok());

        let assembled = ManifestAssembler::new(output.path(), &ZipNamePackager).run(root);
        assert!(assembled.is_ok(), "assembly failed: {:?}", assembled.as_ref().err());
        let Ok(assembled) = assembled else {
            return;
        };

        assert_eq!(assembled.path, output.path().join(MANIFEST_FILE));
        assert!(assembled.report.is_clean());

        let written = read_from_path(&assembled.path);
        assert!(written.is_ok());
        let written = written.unwrap_or_default();
        assert_eq!(written, assembled.manifest);

        assert_eq!(written.packages.len(), 3);
        for package in written.packages.values() {
            let a = package.env.as_ref().and_then(|env| env.get("A"));
            assert_eq!(a.map(String::as_str), Some("1"));
        }
        let multi = written.get_package("p1").and_then(|p| p.get_action("multi"));
        assert_eq!(multi, Some(&Action::web(packages.join("p1").join("multi.zip"))));
    }

    #[test]
    fn test_run_without_packages_writes_empty_manifest() {
        let (Ok(project), Ok(output)) = (TempDir::new(), TempDir::new()) else {
            return;
        };
        let out_dir = output.path().join("not-yet-created");

        let assembled = ManifestAssembler::new(&out_dir, &ZipNamePackager).run(project.path());
        assert!(assembled.is_ok());

        let content = fs::read_to_string(out_dir.join(MANIFEST_FILE)).unwrap_or_default();
        assert_eq!(content.trim(), "packages: {}");
    }
}
