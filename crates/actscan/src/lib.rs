//! actscan library - expose modules for testing
//!
//! The binary is a thin wrapper around [`commands::scan`].

pub mod assembler;
pub mod commands;
pub mod common;
pub mod errors;

pub use common::GlobalOpts;
pub use errors::CliError;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the `tracing` subscriber; `RUST_LOG` takes precedence over `default_filter`
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
