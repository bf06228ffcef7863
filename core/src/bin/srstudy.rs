use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use srcat_core::fallback::{CliStructuredReader, ScratchSession};
use srcat_core::lookup::{collect_dicom_files, FileSetLookup, NoSegmentationExaminer};
use srcat_core::{LoadedReport, ReportLoader, TextReport};
use std::path::PathBuf;
use std::process;

/// CLI tool for loading every TID1500 report found in a directory as
/// one linked longitudinal set
#[derive(Parser, Debug)]
#[command(name = "srstudy")]
#[command(about = "Load and link all DICOM SR TID1500 reports in a directory")]
#[command(version)]
struct Cli {
    /// Directory containing DICOM files
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// External reader executable for reports without coordinate groups
    #[arg(long)]
    reader: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// Report UIDs in chronological order (one per line)
    Uids,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.directory.is_dir() {
        eprintln!("Error: {} is not a directory", cli.directory.display());
        process::exit(1);
    }

    info!("Processing directory: {}", cli.directory.display());

    let files = match collect_dicom_files(&cli.directory) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to read directory: {}", e);
            eprintln!("Error: Failed to read directory: {}", e);
            process::exit(1);
        }
    };

    if files.is_empty() {
        eprintln!("Error: No DICOM files found in directory");
        process::exit(1);
    }
    info!("Found {} DICOM files", files.len());

    let lookup = FileSetLookup::from_paths(&files);
    let examiner = NoSegmentationExaminer;
    let loader = ReportLoader::new(&lookup, &examiner);

    // Recognize every report in the set
    let mut uids = Vec::new();
    for file in &files {
        match loader.examine_file(file) {
            Ok(Some(descriptor)) => {
                info!("Recognized report: {}", descriptor.uid);
                if !uids.contains(&descriptor.uid) {
                    uids.push(descriptor.uid);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping {}: {}", file.display(), e),
        }
    }

    if uids.is_empty() {
        eprintln!("Error: No TID1500 reports found in directory");
        process::exit(1);
    }
    info!("Loading {} report(s)", uids.len());

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

    output_reports(&loaded, cli.format);
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

fn output_reports(loaded: &[LoadedReport], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for report in loaded {
                println!("{}", TextReport::new(report));
            }
        }
        OutputFormat::Uids => {
            for report in loaded {
                println!("{}", report.uid);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(loaded) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize to JSON: {}", e);
                eprintln!("Error: Failed to serialize to JSON: {}", e);
                process::exit(1);
            }
        },
    }
}
