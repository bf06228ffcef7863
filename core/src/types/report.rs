use super::measurement::MeasurementGroup;
use super::roi::RegionSource;

/// A fully parsed TID1500 imaging measurement report
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct MeasurementReport {
    pub sop_instance_uid: String,
    pub series_description: String,
    /// Person-observer name from the observation context
    pub observer: Option<String>,
    /// Measurement groups in document order
    pub groups: Vec<MeasurementGroup>,
}

impl MeasurementReport {
    /// Whether any group carries an "Image Region" coordinate item
    ///
    /// Reports without one are routed through the legacy reader for
    /// their measurement table.
    pub fn has_image_region_groups(&self) -> bool {
        self.groups.iter().any(|g| {
            g.region
                .as_ref()
                .map(|r| r.source == RegionSource::ImageRegion)
                .unwrap_or(false)
        })
    }
}

/// Whether a load operation considers a single report or the whole
/// longitudinal set for the patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportScope {
    #[default]
    Single,
    Longitudinal,
}

/// Position of one report within an ordered longitudinal set
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReportLink {
    pub uid: String,
    /// UID of the chronologically preceding report, if any
    pub prior: Option<String>,
    /// UID of the chronologically following report, if any
    pub follow_up: Option<String>,
}

impl ReportLink {
    pub fn unlinked(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            prior: None,
            follow_up: None,
        }
    }
}
