//! Legacy structured-reader fallback path
//!
//! Reports without image-region coordinate groups are handed to an
//! external reader executable that writes a JSON side-file, which is
//! read back here and projected into the same table shape as the
//! native path.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, SrcatError};
use crate::types::{CodedEntry, MeasurementGroup, MeasurementItem};
use chrono::Local;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// One code of the side-file contract
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidecarCode {
    #[serde(rename = "CodeValue", default)]
    pub code_value: String,
    #[serde(rename = "CodeMeaning", default)]
    pub code_meaning: String,
}

/// One numeric measurement of the side-file contract
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidecarItem {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub units: SidecarCode,
    #[serde(default)]
    pub quantity: SidecarCode,
    #[serde(
        rename = "derivationModifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub derivation_modifier: Option<SidecarCode>,
}

/// One measurement of the side-file contract
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidecarMeasurement {
    #[serde(rename = "TrackingIdentifier", default)]
    pub tracking_identifier: String,
    #[serde(rename = "TrackingUniqueIdentifier", default)]
    pub tracking_unique_identifier: String,
    #[serde(rename = "measurementItems", default)]
    pub measurement_items: Vec<SidecarItem>,
}

/// The JSON side-file written by the external reader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidecarReport {
    #[serde(rename = "SeriesDescription", default)]
    pub series_description: String,
    #[serde(rename = "Measurements")]
    pub measurements: Vec<SidecarMeasurement>,
}

impl SidecarReport {
    /// Converts side-file measurements into measurement groups so the
    /// regular projection applies
    pub fn measurement_groups(&self) -> Vec<MeasurementGroup> {
        self.measurements
            .iter()
            .map(|m| MeasurementGroup {
                tracking_identifier: Some(m.tracking_identifier.clone()),
                tracking_unique_identifier: Some(m.tracking_unique_identifier.clone()),
                measurement_items: m.measurement_items.iter().map(sidecar_item).collect(),
                ..Default::default()
            })
            .collect()
    }
}

fn sidecar_item(item: &SidecarItem) -> MeasurementItem {
    MeasurementItem {
        value: item.value.clone(),
        units: sidecar_code(&item.units),
        quantity: sidecar_code(&item.quantity),
        derivation_modifier: item.derivation_modifier.as_ref().map(sidecar_code),
    }
}

fn sidecar_code(code: &SidecarCode) -> CodedEntry {
    CodedEntry::new("", code.code_value.clone(), code.code_meaning.clone())
}

/// Reads a side-file back from disk
///
/// A file missing the "Measurements" key is invalid input and yields
/// `Ok(None)` so the caller can proceed with other reports.
pub fn read_sidecar(path: &Path) -> Result<Option<SidecarReport>> {
    let text = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    if value.get("Measurements").is_none() {
        warn!(
            "side-file {} has no Measurements key; skipping",
            path.display()
        );
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// External reader turning an SR file into a JSON side-file
pub trait StructuredReader {
    fn read(&self, input_sr: &Path, output_json: &Path) -> Result<()>;
}

/// Invokes the reader executable and awaits completion
///
/// No timeout is applied; a hung reader blocks the load.
pub struct CliStructuredReader {
    executable: PathBuf,
}

impl CliStructuredReader {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl StructuredReader for CliStructuredReader {
    fn read(&self, input_sr: &Path, output_json: &Path) -> Result<()> {
        debug!(
            "running {} on {}",
            self.executable.display(),
            input_sr.display()
        );
        let status = Command::new(&self.executable)
            .arg("--inputSRFileName")
            .arg(input_sr)
            .arg("--metaDataFileName")
            .arg(output_json)
            .status()
            .map_err(|e| {
                SrcatError::ReaderError(format!(
                    "cannot run {}: {}",
                    self.executable.display(),
                    e
                ))
            })?;

        if !status.success() {
            return Err(SrcatError::ReaderError(format!(
                "{} exited with {}",
                self.executable.display(),
                status
            )));
        }
        Ok(())
    }
}

/// Scratch directory for one load session
///
/// Lives under `<base>/<YYYYMMDD_HHMMSS>` with one subdirectory per
/// report UID. Directories are created idempotently; a pre-existing
/// directory is not an error.
#[derive(Debug)]
pub struct ScratchSession {
    root: PathBuf,
}

impl ScratchSession {
    /// Opens a session directory stamped with the current local time
    pub fn create(base: &Path) -> Result<Self> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::create_named(base, &stamp)
    }

    /// Opens a session directory with an explicit name
    pub fn create_named(base: &Path, name: &str) -> Result<Self> {
        let root = base.join(name);
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The scratch directory for one report, created on demand
    pub fn dir_for_report(&self, report_uid: &str) -> Result<PathBuf> {
        let dir = self.root.join(report_uid);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Best-effort removal of the whole session directory
    pub fn cleanup(&self) {
        if let Err(e) = fs::remove_dir_all(&self.root) {
            debug!("scratch cleanup of {} failed: {}", self.root.display(), e);
        }
    }
}
