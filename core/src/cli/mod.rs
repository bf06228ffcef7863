pub mod report;

use crate::types::ReportScope;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for srcat
#[derive(Parser, Debug)]
#[command(name = "srcat")]
#[command(about = "DICOM SR TID1500 measurement extraction tool")]
#[command(version)]
pub struct Cli {
    /// Path to a DICOM SR file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory with sibling DICOM files (referenced images, related reports)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// External reader executable for reports without coordinate groups
    #[arg(long)]
    pub reader: Option<PathBuf>,

    /// Report scope
    #[arg(long, default_value = "single")]
    pub scope: ScopeArg,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Report scope options
#[derive(Debug, Clone, ValueEnum)]
pub enum ScopeArg {
    /// Load only the given report
    Single,
    /// Also load the patient's reports from sibling studies
    Longitudinal,
}

impl From<ScopeArg> for ReportScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Single => ReportScope::Single,
            ScopeArg::Longitudinal => ReportScope::Longitudinal,
        }
    }
}
