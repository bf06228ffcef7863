use super::code::CodedEntry;
use super::roi::RoiRegion;

/// One numeric measurement of a group
///
/// The value is kept as the decimal string carried by the document so
/// that tabular projection is lossless.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MeasurementItem {
    pub value: String,
    pub units: CodedEntry,
    pub quantity: CodedEntry,
    pub derivation_modifier: Option<CodedEntry>,
}

/// A qualitative (coded) evaluation of a group
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QualitativeEvaluation {
    pub name: CodedEntry,
    pub value: CodedEntry,
}

/// One measurement group extracted from the content tree
///
/// Constructed fresh per parse pass; not persisted beyond the current
/// load operation. A group without a region is still retained for its
/// tracking and finding metadata.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct MeasurementGroup {
    pub tracking_identifier: Option<String>,
    pub tracking_unique_identifier: Option<String>,
    pub finding: Option<CodedEntry>,
    pub finding_sites: Vec<CodedEntry>,
    pub region: Option<RoiRegion>,
    pub measurement_items: Vec<MeasurementItem>,
    pub qualitative_evaluations: Vec<QualitativeEvaluation>,
    /// Person-observer name captured at report level
    pub observer: Option<String>,
}

impl MeasurementGroup {
    /// Display label for the group, falling back to the observer name
    pub fn label(&self) -> &str {
        self.tracking_identifier
            .as_deref()
            .or(self.observer.as_deref())
            .unwrap_or("")
    }
}
