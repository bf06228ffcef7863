use std::collections::BTreeMap;

/// Classified series references gathered from report evidence
///
/// Keyed by the originating report's own SOP instance UID for the
/// segmentation bucket; RWVM and "other" references are shared flat
/// lists. Built once per load operation.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ReferenceSet {
    /// Report SOP instance UID → referenced Segmentation series UIDs
    pub segmentation_series: BTreeMap<String, Vec<String>>,
    /// Referenced Real-World-Value-Mapping series UIDs
    pub rwvm_series: Vec<String>,
    /// Referenced SOP instances of any other storage class
    pub other_instances: Vec<String>,
    /// Deduplicated union of instance UIDs reachable through the
    /// referenced segmentation objects
    pub loadable_instance_uids: Vec<String>,
}

impl ReferenceSet {
    /// All referenced segmentation series across every report, in key order
    pub fn all_segmentation_series(&self) -> impl Iterator<Item = &String> {
        self.segmentation_series.values().flatten()
    }

    /// The RWVM series to apply, when exactly the expected single
    /// reference is present
    pub fn primary_rwvm_series(&self) -> Option<&String> {
        self.rwvm_series.first()
    }

    pub fn is_empty(&self) -> bool {
        self.segmentation_series.values().all(|v| v.is_empty())
            && self.rwvm_series.is_empty()
            && self.other_instances.is_empty()
    }
}
