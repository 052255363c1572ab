use actscan::{
    commands::scan::{self, ScanCommand},
    init_tracing, GlobalOpts,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "actscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Scan a project for actions and write a deployment manifest",
    long_about = "actscan walks <ROOT>/packages, packages multi-file actions, merges <ROOT>/.env \
                  into every package and writes manifest.yml to the output directory."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(flatten)]
    scan: ScanCommand,
}

fn main() {
    let cli = Cli::parse();

    actscan_logger::init_with_verbosity(cli.global.verbosity_level(), cli.global.quiet);
    init_tracing(cli.global.tracing_filter());

    if let Err(e) = scan::handle_scan(cli.scan, &cli.global) {
        actscan_logger::error(&format!("Scan failed: {}", e));
        std::process::exit(1);
    }
}
