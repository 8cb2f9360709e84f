use adnimeta_core::cli::report::RunReport;
use adnimeta_core::cli::Cli;
use adnimeta_core::{write_report, ScanTypeAggregator};
use clap::Parser;
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let config = cli.to_config();
    let output = cli.output_path();

    let mut aggregator = ScanTypeAggregator::new(&config);
    if let Err(e) = aggregator.run(&config) {
        error!("Extraction stopped: {}", e);
    }

    match write_report(&output, &aggregator) {
        Ok(()) => {
            let counts = aggregator
                .buckets()
                .map(|(scan_type, records)| (scan_type, records.len()))
                .collect();
            print!("{}", RunReport::success(&output, counts));
        }
        Err(e) => {
            error!("Failed to create Excel file: {}", e);
            eprint!("{}", RunReport::Failure);
            process::exit(1);
        }
    }

    info!(
        "Processed {} files ({} failed)",
        aggregator.processed_count(),
        aggregator.failed_count()
    );
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
