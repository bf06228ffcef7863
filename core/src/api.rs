use std::path::{Path, PathBuf};

use crate::error::{Result, SrcatError};
use crate::extraction::concepts::group_is_bounding_box;
use crate::extraction::geometry::{extract_geometry, RegionGeometry};
use crate::extraction::longitudinal::{discover_related, link_reports, sort_reports};
use crate::extraction::recognition::is_tid1500;
use crate::extraction::references::resolve_references;
use crate::extraction::report::parse_report;
use crate::extraction::tags::{get_string_value, SERIES_DESCRIPTION, SOP_INSTANCE_UID};
use crate::fallback::{read_sidecar, ScratchSession, StructuredReader};
use crate::lookup::{FilePlaneLookup, InstanceLookup, SegmentationExaminer};
use crate::projection::{bounding_box_table, measurement_table, point_table};
use crate::types::{
    MeasurementGroup, MeasurementReport, ReferenceSet, ReportLink, ReportScope, TableSpec,
};
use dicom_object::open_file;
use log::{debug, error};

/// Recognition result for one file: identity plus classified references
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportDescriptor {
    pub uid: String,
    pub series_description: String,
    pub file: PathBuf,
    pub references: ReferenceSet,
}

/// Display geometry derived for one measurement group
#[derive(Debug, Clone, serde::Serialize)]
pub struct GroupGeometry {
    pub group_index: usize,
    pub geometry: RegionGeometry,
}

/// One fully loaded report with its tabular projection and links
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoadedReport {
    pub uid: String,
    pub series_description: String,
    pub report: MeasurementReport,
    pub table: Option<TableSpec>,
    pub geometries: Vec<GroupGeometry>,
    pub prior: Option<String>,
    pub follow_up: Option<String>,
}

/// High-level loader tying the extraction passes together
///
/// Collaborators are injected explicitly; the loader holds no global
/// state and is built fresh per load operation.
pub struct ReportLoader<'a, L, E> {
    lookup: &'a L,
    examiner: &'a E,
}

impl<'a, L, E> ReportLoader<'a, L, E>
where
    L: InstanceLookup,
    E: SegmentationExaminer,
{
    pub fn new(lookup: &'a L, examiner: &'a E) -> Self {
        Self { lookup, examiner }
    }

    /// Recognizes one file and resolves its references
    ///
    /// Returns `Ok(None)` when the file is not a TID1500 report.
    pub fn examine_file(&self, path: &Path) -> Result<Option<ReportDescriptor>> {
        let dcm = open_file(path)?;

        let uid = get_string_value(&dcm, SOP_INSTANCE_UID).unwrap_or_default();
        if uid.is_empty() || !is_tid1500(&dcm) {
            return Ok(None);
        }

        let series_description =
            get_string_value(&dcm, SERIES_DESCRIPTION).unwrap_or_else(|| "Unknown".to_string());
        let references = resolve_references(&[&*dcm], self.lookup, self.examiner)?;
        debug!("recognized TID1500 report {}", uid);

        Ok(Some(ReportDescriptor {
            uid,
            series_description,
            file: path.to_path_buf(),
            references,
        }))
    }

    /// Collects the report UIDs covered by a load of the given file
    ///
    /// `Single` scope yields just this report; `Longitudinal` prepends
    /// the patient's reports from sibling studies.
    pub fn collect_report_uids(&self, path: &Path, scope: ReportScope) -> Result<Vec<String>> {
        let dcm = open_file(path)?;
        let own_uid = get_string_value(&dcm, SOP_INSTANCE_UID)
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| SrcatError::DicomError("missing SOP instance UID".to_string()))?;

        let mut uids = Vec::new();
        if scope == ReportScope::Longitudinal {
            for related in discover_related(&dcm, self.lookup)? {
                let other = open_file(&related)?;
                if let Some(uid) = get_string_value(&other, SOP_INSTANCE_UID) {
                    if !uid.is_empty() && !uids.contains(&uid) {
                        uids.push(uid);
                    }
                }
            }
        }
        if !uids.contains(&own_uid) {
            uids.push(own_uid);
        }
        Ok(uids)
    }

    /// Loads the given reports in chronological order
    ///
    /// A report that fails to load is logged and skipped; the rest of
    /// the batch still loads. No retries, no rollback.
    pub fn load(&self, uids: &[String]) -> Result<Vec<LoadedReport>> {
        self.load_reports(uids, None)
    }

    /// Like [`load`](Self::load), routing reports without image-region
    /// groups through the external reader
    pub fn load_with_reader(
        &self,
        uids: &[String],
        reader: &dyn StructuredReader,
        scratch: &ScratchSession,
    ) -> Result<Vec<LoadedReport>> {
        self.load_reports(uids, Some((reader, scratch)))
    }

    fn load_reports(
        &self,
        uids: &[String],
        fallback: Option<(&dyn StructuredReader, &ScratchSession)>,
    ) -> Result<Vec<LoadedReport>> {
        let ordered = sort_reports(uids, self.lookup)?;
        debug!("report order after sorting: {:?}", ordered);

        let mut loaded = Vec::new();
        for link in link_reports(&ordered) {
            match self.load_single(&link, fallback) {
                Ok(report) => loaded.push(report),
                Err(e) => error!("failed to load report {}: {}", link.uid, e),
            }
        }
        Ok(loaded)
    }

    fn load_single(
        &self,
        link: &ReportLink,
        fallback: Option<(&dyn StructuredReader, &ScratchSession)>,
    ) -> Result<LoadedReport> {
        let path = self
            .lookup
            .file_for_instance(&link.uid)
            .ok_or_else(|| SrcatError::MissingReference(link.uid.clone()))?;
        let dcm = open_file(&path)?;
        let report = parse_report(&dcm).ok_or_else(|| {
            SrcatError::ExtractionError(format!("{} is not a TID1500 measurement report", link.uid))
        })?;

        let planes = FilePlaneLookup::new(self.lookup);
        let mut geometries = Vec::new();
        for (group_index, group) in report.groups.iter().enumerate() {
            match extract_geometry(group, &planes) {
                Ok(Some(geometry)) => geometries.push(GroupGeometry {
                    group_index,
                    geometry,
                }),
                Ok(None) => {}
                Err(e) => error!(
                    "cannot place measurement {} of report {}: {}",
                    group_index, link.uid, e
                ),
            }
        }

        let table = self.build_table(&path, &report, &geometries, fallback)?;

        Ok(LoadedReport {
            uid: link.uid.clone(),
            series_description: report.series_description.clone(),
            report,
            table,
            geometries,
            prior: link.prior.clone(),
            follow_up: link.follow_up.clone(),
        })
    }

    /// Chooses the tabular projection for one report
    ///
    /// Native tables are preferred when the report carries image-region
    /// groups; otherwise the external reader's side-file supplies the
    /// measurement table, with the natively parsed numeric items as the
    /// final fallback.
    fn build_table(
        &self,
        sr_path: &Path,
        report: &MeasurementReport,
        geometries: &[GroupGeometry],
        fallback: Option<(&dyn StructuredReader, &ScratchSession)>,
    ) -> Result<Option<TableSpec>> {
        if report.has_image_region_groups() {
            let boxes = entries_for(report, geometries, |g| {
                matches!(g, RegionGeometry::BoundingBox { .. })
            });
            let points = entries_for(report, geometries, |g| {
                matches!(g, RegionGeometry::Point { .. })
            });

            if report.groups.iter().any(group_is_bounding_box) && !boxes.is_empty() {
                return Ok(Some(bounding_box_table(&boxes)));
            }
            if !points.is_empty() {
                return Ok(Some(point_table(&points)));
            }
            if !boxes.is_empty() {
                return Ok(Some(bounding_box_table(&boxes)));
            }
        }

        if let Some((reader, scratch)) = fallback {
            let dir = scratch.dir_for_report(&report.sop_instance_uid)?;
            let sidecar_path = dir.join(format!("{}.json", report.sop_instance_uid));
            match reader.read(sr_path, &sidecar_path) {
                Ok(()) => {
                    if let Some(sidecar) = read_sidecar(&sidecar_path)? {
                        return Ok(Some(measurement_table(&sidecar.measurement_groups())));
                    }
                }
                Err(e) => {
                    // Reader failure is fatal for this report only
                    let _ = std::fs::remove_dir_all(&dir);
                    return Err(e);
                }
            }
        }

        if report
            .groups
            .iter()
            .any(|g| !g.measurement_items.is_empty())
        {
            return Ok(Some(measurement_table(&report.groups)));
        }
        Ok(None)
    }
}

fn entries_for<'r>(
    report: &'r MeasurementReport,
    geometries: &'r [GroupGeometry],
    select: impl Fn(&RegionGeometry) -> bool,
) -> Vec<(&'r MeasurementGroup, &'r RegionGeometry)> {
    geometries
        .iter()
        .filter(|gg| select(&gg.geometry))
        .map(|gg| (&report.groups[gg.group_index], &gg.geometry))
        .collect()
}
