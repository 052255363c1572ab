//! The scan command: resolve settings, assemble the manifest, report the result

use crate::assembler::ManifestAssembler;
use crate::common::GlobalOpts;
use crate::errors::CliError;
use actscan_config::{Overrides, ScanSettings};
use actscan_manifest::manifest_writer::to_yaml;
use actscan_manifest::CommandPackager;
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct ScanCommand {
    /// Project root containing the `packages` folder and optional `.env`
    pub root: PathBuf,

    /// Output directory for manifest.yml (default: $NUV_TMP)
    #[arg(long, value_name = "DIR")]
    pub tmp_dir: Option<PathBuf>,

    /// Tool used to zip multi-file actions (default: nuv)
    #[arg(long, value_name = "PROGRAM")]
    pub packager: Option<String>,

    /// Extra argument for the packaging tool, placed before `-zipf <dir>` (repeatable)
    #[arg(long = "packager-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub packager_args: Vec<String>,

    /// Seconds before a packaging run is killed (0 disables the limit)
    #[arg(long, value_name = "SECS")]
    pub packager_timeout: Option<u64>,

    /// Also print the manifest YAML on stdout
    #[arg(long)]
    pub print: bool,
}

impl ScanCommand {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            tmp_dir: self.tmp_dir.clone(),
            packager: self.packager.clone(),
            packager_args: self.packager_args.clone(),
            packager_timeout_secs: self.packager_timeout,
        }
    }
}

/// Run the scan using the process environment and config file
pub fn handle_scan(cmd: ScanCommand, global: &GlobalOpts) -> Result<PathBuf, CliError> {
    debug!("Verbosity level {}", global.verbosity_level());
    let settings = ScanSettings::from_environment(&cmd.overrides())?;
    run_scan(&cmd, &settings)
}

/// Run the scan with already resolved settings
pub fn run_scan(cmd: &ScanCommand, settings: &ScanSettings) -> Result<PathBuf, CliError> {
    if let Err(e) = actscan_logger::init_log_file(&settings.tmp_dir) {
        actscan_logger::warn(&format!("Failed to set up log file: {}", e));
    }
    actscan_logger::step(&format!("Settings: {:?}", settings));

    if !cmd.root.exists() {
        actscan_logger::warn(&format!(
            "Project root {} does not exist",
            cmd.root.display()
        ));
    }

    let packager = CommandPackager::new(&settings.packager)
        .with_args(&settings.packager_args)
        .with_timeout(settings.packager_timeout);

    let assembled = ManifestAssembler::new(&settings.tmp_dir, &packager).run(&cmd.root)?;

    if !assembled.report.is_clean() {
        actscan_logger::warn(&format!(
            "{} multi-file action(s) could not be packaged and were left out",
            assembled.report.failures.len()
        ));
        for failure in &assembled.report.failures {
            actscan_logger::info(&format!("  {}/{}", failure.package, failure.entry));
        }
    }

    let message = format!("Manifest file written at {}", assembled.path.display());
    if cmd.print {
        print!("{}", to_yaml(&assembled.manifest)?);
        // stdout carries the YAML; the path is reported on stderr even when quiet
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }

    Ok(assembled.path)
}
