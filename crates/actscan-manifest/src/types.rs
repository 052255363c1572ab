//! Manifest data model
//!
//! The manifest is the only artifact the scanner produces. It is written as YAML
//! and consumed by the deployer, so field names here are part of the output format:
//!
//! ```yaml
//! packages:
//!   hello:
//!     actions:
//!       greet:
//!         function: project/packages/hello/greet.py
//!         web: true
//!     env:
//!       API_HOST: example.com
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Name of the implicit package that collects top-level single-file actions
pub const DEFAULT_PACKAGE: &str = "default";

// =============================================================================
// MANIFEST
// =============================================================================

/// Top-level manifest: every discovered package keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub packages: BTreeMap<String, Package>,
}

// =============================================================================
// PACKAGE
// =============================================================================

/// A deployable package and the environment injected into it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub actions: BTreeMap<String, Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
}

// =============================================================================
// ACTION
// =============================================================================

/// A single deployable action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Source file for single-file actions, packaged archive for multi-file ones
    pub function: PathBuf,
    /// Exposed through a web endpoint
    pub web: bool,
}

impl Action {
    /// Create a web action pointing at `function`
    pub fn web(function: impl Into<PathBuf>) -> Self {
        Action {
            function: function.into(),
            web: true,
        }
    }
}
