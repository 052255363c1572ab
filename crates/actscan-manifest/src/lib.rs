//! Action discovery and manifest types
//!
//! This crate scans a project's `packages` folder for deployable actions and
//! builds the manifest describing them:
//!
//! - [`runtime`]: which files and directories count as actions, and their names
//! - [`package_discovery`]: the package and single-package scanners
//! - [`packager`]: archiving multi-file actions through an external tool
//! - [`env_file`]: merging `.env` into every package
//! - [`manifest_writer`]: YAML output

pub mod env_file;
pub mod errors;
pub mod manifest;
pub mod manifest_writer;
pub mod package_discovery;
pub mod packager;
pub mod runtime;
pub mod types;

pub use errors::{ManifestError, PackagingError};
pub use types::{Action, Manifest, Package, DEFAULT_PACKAGE};

pub use env_file::{merge_env_file, parse_env};
pub use manifest_writer::{read_from_path, write_to_path, MANIFEST_FILE};
pub use package_discovery::{PackageScanner, PackagingFailure, ScanReport};
pub use packager::{CommandPackager, Packager};
