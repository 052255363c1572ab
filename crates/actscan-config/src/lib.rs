//! Configuration for actscan runs
//!
//! Settings come from, in order of precedence: command-line overrides, the
//! environment (`NUV_TMP`), an optional `actscan.toml`, and built-in defaults.
//! Everything is resolved once into a [`ScanSettings`] value that is passed to
//! the scanner explicitly.

pub mod config;
pub mod errors;

pub use config::{ConfigFile, Overrides, ScanSettings};
pub use errors::ConfigError;
