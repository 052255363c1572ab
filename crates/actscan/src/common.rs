//! Common types and utilities shared across modules

use clap::Parser;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Only print errors and the manifest path")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: default (progress lines only)
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Default `tracing` filter for the verbosity level (overridden by `RUST_LOG`)
    pub fn tracing_filter(&self) -> &'static str {
        match self.verbosity_level() {
            0 => "actscan=warn,actscan_manifest=warn",
            1 => "actscan=debug,actscan_manifest=debug,actscan_config=debug",
            _ => "actscan=trace,actscan_manifest=trace,actscan_config=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_verbose() {
        let opts = GlobalOpts {
            quiet: true,
            verbose: 2,
        };
        assert_eq!(opts.verbosity_level(), 0);
        assert_eq!(opts.tracing_filter(), "actscan=warn,actscan_manifest=warn");
    }
}
