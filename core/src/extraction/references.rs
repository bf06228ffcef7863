use std::collections::{BTreeSet, HashSet};

use crate::error::Result;
use crate::lookup::{InstanceLookup, SegmentationExaminer};
use crate::types::ReferenceSet;
use dicom_object::InMemDicomObject;
use log::{debug, warn};

use super::recognition::{REAL_WORLD_VALUE_MAPPING_STORAGE, SEGMENTATION_STORAGE};
use super::tags::{
    get_sequence_items, get_string_value, CURRENT_REQUESTED_PROCEDURE_EVIDENCE_SEQUENCE,
    REFERENCED_SERIES_SEQUENCE, REFERENCED_SOP_CLASS_UID, REFERENCED_SOP_INSTANCE_UID,
    REFERENCED_SOP_SEQUENCE, SERIES_INSTANCE_UID, SOP_INSTANCE_UID,
};

/// Classifies every series referenced by the given reports
///
/// Scans each document's evidence sequence and buckets the references
/// by storage class: Segmentation (per report), Real-World Value
/// Mapping and "other". An absent evidence sequence is tolerated as
/// empty. Referenced segmentation series are then handed to the
/// examiner to collect the union of transitively referenced instances;
/// each series is examined at most once even when several reports in a
/// longitudinal set share it.
pub fn resolve_references<L, E>(
    docs: &[&InMemDicomObject],
    lookup: &L,
    examiner: &E,
) -> Result<ReferenceSet>
where
    L: InstanceLookup,
    E: SegmentationExaminer,
{
    let mut set = ReferenceSet::default();

    for doc in docs {
        let report_uid = get_string_value(doc, SOP_INSTANCE_UID).unwrap_or_default();
        classify_document(doc, &report_uid, &mut set);

        let seg_count = set
            .segmentation_series
            .get(&report_uid)
            .map(Vec::len)
            .unwrap_or(0);
        if seg_count > 1 {
            warn!(
                "report {} references {} segmentation series; this has not been tested",
                report_uid, seg_count
            );
        }
    }

    if set.rwvm_series.len() > 1 {
        warn!(
            "reports reference {} RWVM series; this has not been tested",
            set.rwvm_series.len()
        );
    }

    set.loadable_instance_uids = examine_segmentations(&set, lookup, examiner)?;
    Ok(set)
}

/// Buckets one document's evidence references into the shared set
fn classify_document(doc: &InMemDicomObject, report_uid: &str, set: &mut ReferenceSet) {
    let seg_series = set
        .segmentation_series
        .entry(report_uid.to_string())
        .or_default();

    let Some(evidence) = get_sequence_items(doc, CURRENT_REQUESTED_PROCEDURE_EVIDENCE_SEQUENCE)
    else {
        return;
    };

    for study_item in evidence {
        let Some(series_items) = get_sequence_items(study_item, REFERENCED_SERIES_SEQUENCE) else {
            continue;
        };
        for series_item in series_items {
            let series_uid = get_string_value(series_item, SERIES_INSTANCE_UID).unwrap_or_default();
            let Some(sop_items) = get_sequence_items(series_item, REFERENCED_SOP_SEQUENCE) else {
                continue;
            };
            for sop_item in sop_items {
                match get_string_value(sop_item, REFERENCED_SOP_CLASS_UID).as_deref() {
                    Some(SEGMENTATION_STORAGE) => {
                        debug!("found referenced segmentation series {}", series_uid);
                        if !seg_series.contains(&series_uid) {
                            seg_series.push(series_uid.clone());
                        }
                    }
                    Some(REAL_WORLD_VALUE_MAPPING_STORAGE) => {
                        debug!("found referenced RWVM series {}", series_uid);
                        if !set.rwvm_series.contains(&series_uid) {
                            set.rwvm_series.push(series_uid.clone());
                        }
                    }
                    _ => {
                        debug!("found other reference in series {}", series_uid);
                        if let Some(uid) = get_string_value(sop_item, REFERENCED_SOP_INSTANCE_UID) {
                            set.other_instances.push(uid);
                        }
                    }
                }
            }
        }
    }
}

/// Fans out to the segmentation examiner for every referenced series
///
/// Returns the deduplicated, deterministically ordered union of
/// instance UIDs the referenced segmentation objects themselves
/// reference.
fn examine_segmentations<L, E>(set: &ReferenceSet, lookup: &L, examiner: &E) -> Result<Vec<String>>
where
    L: InstanceLookup,
    E: SegmentationExaminer,
{
    let mut examined: HashSet<&String> = HashSet::new();
    let mut loadable: BTreeSet<String> = BTreeSet::new();

    for series_uid in set.all_segmentation_series() {
        if !examined.insert(series_uid) {
            continue;
        }
        let files = lookup.files_for_series(series_uid);
        if files.is_empty() {
            warn!(
                "referenced segmentation series {} is not in the file lookup",
                series_uid
            );
            continue;
        }
        for descriptor in examiner.examine(&[files])? {
            loadable.extend(descriptor.referenced_instance_uids);
        }
    }

    Ok(loadable.into_iter().collect())
}
