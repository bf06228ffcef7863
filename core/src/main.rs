use clap::Parser;
use log::{error, info};
use srcat_core::cli::{Cli, OutputFormat};
use srcat_core::fallback::{CliStructuredReader, ScratchSession};
use srcat_core::lookup::{collect_dicom_files, FileSetLookup, NoSegmentationExaminer};
use srcat_core::{ReportLoader, TextReport};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.file.is_file() {
        eprintln!("Error: {} is not a file", cli.file.display());
        process::exit(1);
    }

    // Index the report plus any sibling files
    let mut paths = vec![cli.file.clone()];
    if let Some(directory) = &cli.database {
        if !directory.is_dir() {
            eprintln!("Error: {} is not a directory", directory.display());
            process::exit(1);
        }
        match collect_dicom_files(directory) {
            Ok(found) => paths.extend(found),
            Err(e) => {
                error!("Failed to read directory: {}", e);
                eprintln!("Error: Failed to read directory: {}", e);
                process::exit(1);
            }
        }
    }
    let lookup = FileSetLookup::from_paths(&paths);

    let examiner = NoSegmentationExaminer;
    let loader = ReportLoader::new(&lookup, &examiner);

    let descriptor = match loader.examine_file(&cli.file) {
        Ok(Some(descriptor)) => descriptor,
        Ok(None) => {
            eprintln!(
                "Error: {} is not a DICOM SR TID1500 object",
                cli.file.display()
            );
            process::exit(1);
        }
        Err(e) => {
            error!("Failed to examine {}: {}", cli.file.display(), e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!(
        "recognized report {} ({})",
        descriptor.uid, descriptor.series_description
    );

    let uids = match loader.collect_report_uids(&cli.file, cli.scope.clone().into()) {
        Ok(uids) => uids,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!("loading {} report(s)", uids.len());

    let loaded = match &cli.reader {
        Some(executable) => {
            let scratch = match ScratchSession::create(&std::env::temp_dir().join("srcat")) {
                Ok(scratch) => scratch,
                Err(e) => {
                    eprintln!("Error: cannot create scratch directory: {}", e);
                    process::exit(1);
                }
            };
            let reader = CliStructuredReader::new(executable);
            let result = loader.load_with_reader(&uids, &reader, &scratch);
            scratch.cleanup();
            result
        }
        None => loader.load(&uids),
    };

    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if loaded.is_empty() {
        eprintln!("Error: no reports could be loaded");
        process::exit(1);
    }

    match cli.format {
        OutputFormat::Text => {
            for report in &loaded {
                println!("{}", TextReport::new(report));
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&loaded) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize to JSON: {}", e);
                eprintln!("Error: Failed to serialize to JSON: {}", e);
                process::exit(1);
            }
        },
    }
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
