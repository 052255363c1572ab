use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a scan or a manifest write
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Errors from packaging a multi-file action.
///
/// These never abort a scan; the action is skipped and the error is reported.
#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("Failed to run packager '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Packager timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("Packager exited with status {status}: {output}")]
    Failed { status: i32, output: String },

    #[error("ZIP ERROR: {0}")]
    MalformedOutput(String),
}
