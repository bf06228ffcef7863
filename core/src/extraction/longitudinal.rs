use std::path::PathBuf;

use crate::error::Result;
use crate::lookup::InstanceLookup;
use crate::types::ReportLink;
use chrono::NaiveDateTime;
use dicom_object::{open_file, InMemDicomObject};
use log::warn;

use super::recognition::is_tid1500;
use super::tags::{
    get_string_value, SERIES_DATE, SERIES_TIME, STUDY_DATE, STUDY_INSTANCE_UID, STUDY_TIME,
};

/// Timestamp pattern for report ordering keys
const DATETIME_PATTERN: &str = "%Y%m%d%H%M%S";

/// Derives the ordering key for one report
///
/// Series date/time is preferred over study date/time. The combined
/// string must parse strictly as `YYYYMMDDHHMMSS`; anything else yields
/// the empty sentinel key, which sorts before every valid timestamp.
pub fn report_sort_key(dcm: &InMemDicomObject) -> String {
    let combined = match (
        get_string_value(dcm, SERIES_DATE),
        get_string_value(dcm, SERIES_TIME),
    ) {
        (Some(date), Some(time)) => format!("{}{}", date, time),
        _ => match (
            get_string_value(dcm, STUDY_DATE),
            get_string_value(dcm, STUDY_TIME),
        ) {
            (Some(date), Some(time)) => format!("{}{}", date, time),
            _ => return String::new(),
        },
    };

    match NaiveDateTime::parse_from_str(&combined, DATETIME_PATTERN) {
        Ok(_) => combined,
        Err(_) => String::new(),
    }
}

/// Orders reports ascending by acquisition time
///
/// Reports whose file cannot be read get the sentinel key. The sort is
/// stable, so sentinel-keyed reports keep their relative input order at
/// the front.
pub fn sort_reports<L: InstanceLookup>(uids: &[String], lookup: &L) -> Result<Vec<String>> {
    let mut keyed: Vec<(String, String)> = uids
        .iter()
        .map(|uid| {
            let key = lookup
                .file_for_instance(uid)
                .and_then(|path| open_file(&path).ok())
                .map(|dcm| report_sort_key(&dcm))
                .unwrap_or_else(|| {
                    warn!("cannot read report {} for ordering; sorting first", uid);
                    String::new()
                });
            (key, uid.clone())
        })
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, uid)| uid).collect())
}

/// Establishes bidirectional prior/follow-up links between adjacent
/// reports of an ordered set
pub fn link_reports(ordered: &[String]) -> Vec<ReportLink> {
    let mut links: Vec<ReportLink> = ordered
        .iter()
        .map(|uid| ReportLink::unlinked(uid.clone()))
        .collect();

    for i in 1..links.len() {
        links[i].prior = Some(ordered[i - 1].clone());
        links[i - 1].follow_up = Some(ordered[i].clone());
    }
    links
}

/// Finds TID1500 reports in the patient's other studies
///
/// Walks study → patient → sibling studies → series, reading the first
/// instance of each series. More than one report in a study is a logged
/// warning; the first is kept.
pub fn discover_related<L: InstanceLookup>(
    dcm: &InMemDicomObject,
    lookup: &L,
) -> Result<Vec<PathBuf>> {
    let Some(study_uid) = get_string_value(dcm, STUDY_INSTANCE_UID) else {
        return Ok(Vec::new());
    };
    let Some(patient) = lookup.patient_for_study(&study_uid) else {
        return Ok(Vec::new());
    };

    let mut related = Vec::new();
    for other_study in lookup.studies_for_patient(&patient) {
        if other_study == study_uid {
            continue;
        }
        let mut found_in_study = Vec::new();
        for series in lookup.series_for_study(&other_study) {
            let Some(instance) = lookup.instances_for_series(&series).into_iter().next() else {
                continue;
            };
            let Some(path) = lookup.file_for_instance(&instance) else {
                continue;
            };
            let Ok(other) = open_file(&path) else {
                continue;
            };
            if is_tid1500(&other) {
                found_in_study.push(path);
            }
        }
        if found_in_study.len() > 1 {
            warn!(
                "found {} structured reports in study {}; keeping the first",
                found_in_study.len(),
                other_study
            );
            found_in_study.truncate(1);
        }
        related.extend(found_in_study);
    }
    Ok(related)
}
