//! Collaborator contracts and the file-set implementation
//!
//! The core never resolves collaborators through ambient state: the
//! instance lookup and segmentation examiner are passed in explicitly
//! wherever they are needed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::extraction::geometry::{ImageGeometryLookup, ImagePlane};
use crate::extraction::tags::{
    get_multi_float64_value, get_string_value, IMAGE_ORIENTATION_PATIENT, IMAGE_POSITION_PATIENT,
    PATIENT_ID, PIXEL_SPACING, SERIES_INSTANCE_UID, SOP_INSTANCE_UID, STUDY_INSTANCE_UID,
};
use dicom_object::{open_file, InMemDicomObject};
use log::{info, warn};

/// By-UID lookup into an indexed DICOM file collection
///
/// All queries are assumed consistent for the duration of a load
/// operation; there is no staleness handling.
pub trait InstanceLookup {
    fn file_for_instance(&self, sop_instance_uid: &str) -> Option<PathBuf>;
    fn files_for_series(&self, series_instance_uid: &str) -> Vec<PathBuf>;
    fn instances_for_series(&self, series_instance_uid: &str) -> Vec<String>;
    fn patient_for_study(&self, study_instance_uid: &str) -> Option<String>;
    fn studies_for_patient(&self, patient_id: &str) -> Vec<String>;
    fn series_for_study(&self, study_instance_uid: &str) -> Vec<String>;
}

/// One loadable object reported by the segmentation examiner, carrying
/// the instance UIDs it transitively references
#[derive(Debug, Clone, Default)]
pub struct LoadableDescriptor {
    pub name: String,
    pub referenced_instance_uids: Vec<String>,
}

/// Examines segmentation series for their own references
///
/// Used recursively by reference resolution: resolving one report's
/// references requires examining the referenced segmentation objects.
pub trait SegmentationExaminer {
    fn examine(&self, file_lists: &[Vec<PathBuf>]) -> Result<Vec<LoadableDescriptor>>;
}

/// Examiner for deployments without a segmentation collaborator
pub struct NoSegmentationExaminer;

impl SegmentationExaminer for NoSegmentationExaminer {
    fn examine(&self, _file_lists: &[Vec<PathBuf>]) -> Result<Vec<LoadableDescriptor>> {
        Ok(Vec::new())
    }
}

/// In-memory [`InstanceLookup`] built by scanning DICOM files
#[derive(Debug, Default)]
pub struct FileSetLookup {
    instance_files: HashMap<String, PathBuf>,
    series_instances: HashMap<String, Vec<String>>,
    study_series: HashMap<String, Vec<String>>,
    study_patient: HashMap<String, String>,
    patient_studies: HashMap<String, Vec<String>>,
}

impl FileSetLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes the given files, skipping any that cannot be read
    pub fn from_paths(paths: &[PathBuf]) -> Self {
        let mut lookup = Self::new();
        for path in paths {
            match lookup.add_file(path) {
                Ok(()) => info!("indexed {}", path.display()),
                Err(e) => warn!("skipping {}: {}", path.display(), e),
            }
        }
        lookup
    }

    /// Reads one file's identifiers and indexes it
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let dcm = open_file(path)?;
        let sop = get_string_value(&dcm, SOP_INSTANCE_UID).unwrap_or_default();
        let series = get_string_value(&dcm, SERIES_INSTANCE_UID).unwrap_or_default();
        let study = get_string_value(&dcm, STUDY_INSTANCE_UID).unwrap_or_default();
        let patient = get_string_value(&dcm, PATIENT_ID).unwrap_or_default();
        self.register_instance(&sop, &series, &study, &patient, path.to_path_buf());
        Ok(())
    }

    /// Indexes one instance under its identifiers
    ///
    /// Empty identifiers index nothing at their level.
    pub fn register_instance(
        &mut self,
        sop_instance_uid: &str,
        series_instance_uid: &str,
        study_instance_uid: &str,
        patient_id: &str,
        path: PathBuf,
    ) {
        if !sop_instance_uid.is_empty() {
            self.instance_files
                .insert(sop_instance_uid.to_string(), path);
        }
        if !series_instance_uid.is_empty() && !sop_instance_uid.is_empty() {
            let instances = self
                .series_instances
                .entry(series_instance_uid.to_string())
                .or_default();
            if !instances.contains(&sop_instance_uid.to_string()) {
                instances.push(sop_instance_uid.to_string());
            }
        }
        if !study_instance_uid.is_empty() && !series_instance_uid.is_empty() {
            let series = self
                .study_series
                .entry(study_instance_uid.to_string())
                .or_default();
            if !series.contains(&series_instance_uid.to_string()) {
                series.push(series_instance_uid.to_string());
            }
        }
        if !patient_id.is_empty() && !study_instance_uid.is_empty() {
            self.study_patient
                .insert(study_instance_uid.to_string(), patient_id.to_string());
            let studies = self.patient_studies.entry(patient_id.to_string()).or_default();
            if !studies.contains(&study_instance_uid.to_string()) {
                studies.push(study_instance_uid.to_string());
            }
        }
    }
}

impl InstanceLookup for FileSetLookup {
    fn file_for_instance(&self, sop_instance_uid: &str) -> Option<PathBuf> {
        self.instance_files.get(sop_instance_uid).cloned()
    }

    fn files_for_series(&self, series_instance_uid: &str) -> Vec<PathBuf> {
        self.instances_for_series(series_instance_uid)
            .iter()
            .filter_map(|uid| self.file_for_instance(uid))
            .collect()
    }

    fn instances_for_series(&self, series_instance_uid: &str) -> Vec<String> {
        self.series_instances
            .get(series_instance_uid)
            .cloned()
            .unwrap_or_default()
    }

    fn patient_for_study(&self, study_instance_uid: &str) -> Option<String> {
        self.study_patient.get(study_instance_uid).cloned()
    }

    fn studies_for_patient(&self, patient_id: &str) -> Vec<String> {
        self.patient_studies
            .get(patient_id)
            .cloned()
            .unwrap_or_default()
    }

    fn series_for_study(&self, study_instance_uid: &str) -> Vec<String> {
        self.study_series
            .get(study_instance_uid)
            .cloned()
            .unwrap_or_default()
    }
}

/// Resolves image plane geometry by reading instance files through an
/// [`InstanceLookup`]
pub struct FilePlaneLookup<'a, L: InstanceLookup> {
    lookup: &'a L,
}

impl<'a, L: InstanceLookup> FilePlaneLookup<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }
}

impl<L: InstanceLookup> ImageGeometryLookup for FilePlaneLookup<'_, L> {
    fn plane_for_instance(&self, sop_instance_uid: &str) -> Option<ImagePlane> {
        let path = self.lookup.file_for_instance(sop_instance_uid)?;
        let dcm = open_file(&path).ok()?;
        plane_from_dataset(&dcm)
    }
}

/// Reads plane geometry from an image dataset
///
/// Requires ImagePositionPatient (3 values), ImageOrientationPatient
/// (6 values) and PixelSpacing (2 values).
pub fn plane_from_dataset(dcm: &InMemDicomObject) -> Option<ImagePlane> {
    let position = get_multi_float64_value(dcm, IMAGE_POSITION_PATIENT)?;
    let orientation = get_multi_float64_value(dcm, IMAGE_ORIENTATION_PATIENT)?;
    let spacing = get_multi_float64_value(dcm, PIXEL_SPACING)?;
    if position.len() != 3 || orientation.len() != 6 || spacing.len() != 2 {
        return None;
    }
    Some(ImagePlane {
        position: [position[0], position[1], position[2]],
        along_column: [orientation[0], orientation[1], orientation[2]],
        along_row: [orientation[3], orientation[4], orientation[5]],
        pixel_spacing: [spacing[0], spacing[1]],
    })
}

/// Collects DICOM files from a directory
///
/// Accepts `.dcm`/`.dicom` extensions; files without an extension are
/// sniffed for the DICM magic bytes.
pub fn collect_dicom_files(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension() {
                if ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom") {
                    files.push(path);
                }
            } else if is_dicom_file(&path) {
                info!("found headerless DICOM file: {}", path.display());
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Checks for the 128-byte preamble plus "DICM" magic at offset 128
fn is_dicom_file(path: &Path) -> bool {
    use std::fs::File;
    use std::io::Read;

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; 132];
    match file.read(&mut buffer) {
        Ok(n) if n >= 132 => &buffer[128..132] == b"DICM",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_lookup() -> FileSetLookup {
        let mut lookup = FileSetLookup::new();
        lookup.register_instance(
            "sop-1",
            "series-1",
            "study-1",
            "patient-1",
            PathBuf::from("/data/a.dcm"),
        );
        lookup.register_instance(
            "sop-2",
            "series-1",
            "study-1",
            "patient-1",
            PathBuf::from("/data/b.dcm"),
        );
        lookup.register_instance(
            "sop-3",
            "series-2",
            "study-2",
            "patient-1",
            PathBuf::from("/data/c.dcm"),
        );
        lookup
    }

    #[test]
    fn test_file_set_lookup_queries() {
        let lookup = sample_lookup();

        assert_eq!(
            lookup.file_for_instance("sop-1"),
            Some(PathBuf::from("/data/a.dcm"))
        );
        assert_eq!(lookup.file_for_instance("missing"), None);

        assert_eq!(
            lookup.instances_for_series("series-1"),
            vec!["sop-1".to_string(), "sop-2".to_string()]
        );
        assert_eq!(
            lookup.files_for_series("series-1"),
            vec![PathBuf::from("/data/a.dcm"), PathBuf::from("/data/b.dcm")]
        );

        assert_eq!(lookup.patient_for_study("study-2"), Some("patient-1".to_string()));
        assert_eq!(
            lookup.studies_for_patient("patient-1"),
            vec!["study-1".to_string(), "study-2".to_string()]
        );
        assert_eq!(
            lookup.series_for_study("study-1"),
            vec!["series-1".to_string()]
        );
    }

    #[test]
    fn test_register_instance_is_idempotent() {
        let mut lookup = sample_lookup();
        lookup.register_instance(
            "sop-1",
            "series-1",
            "study-1",
            "patient-1",
            PathBuf::from("/data/a.dcm"),
        );
        assert_eq!(lookup.instances_for_series("series-1").len(), 2);
        assert_eq!(lookup.studies_for_patient("patient-1").len(), 2);
    }

    #[test]
    fn test_plane_from_dataset() {
        use crate::extraction::tags::{
            IMAGE_ORIENTATION_PATIENT, IMAGE_POSITION_PATIENT, PIXEL_SPACING,
        };
        use dicom_core::{DataElement, PrimitiveValue, VR};

        let strs = |values: &[&str]| {
            PrimitiveValue::Strs(values.iter().map(|s| s.to_string()).collect::<Vec<_>>().into())
        };
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            IMAGE_POSITION_PATIENT,
            VR::DS,
            strs(&["5.0", "6.0", "7.0"]),
        ));
        dcm.put(DataElement::new(
            IMAGE_ORIENTATION_PATIENT,
            VR::DS,
            strs(&["1", "0", "0", "0", "1", "0"]),
        ));
        dcm.put(DataElement::new(PIXEL_SPACING, VR::DS, strs(&["0.3", "0.5"])));

        let plane = plane_from_dataset(&dcm).unwrap();
        assert_eq!(plane.position, [5.0, 6.0, 7.0]);
        assert_eq!(plane.along_column, [1.0, 0.0, 0.0]);
        assert_eq!(plane.along_row, [0.0, 1.0, 0.0]);
        assert_eq!(plane.pixel_spacing, [0.3, 0.5]);

        // Incomplete geometry yields no plane
        let mut incomplete = InMemDicomObject::new_empty();
        incomplete.put(DataElement::new(
            IMAGE_POSITION_PATIENT,
            VR::DS,
            strs(&["5.0", "6.0", "7.0"]),
        ));
        assert!(plane_from_dataset(&incomplete).is_none());
    }

    #[test]
    fn test_collect_dicom_files_with_extensions() {
        let temp_dir = TempDir::new().unwrap();

        File::create(temp_dir.path().join("file1.dcm")).unwrap();
        File::create(temp_dir.path().join("file2.DCM")).unwrap();
        File::create(temp_dir.path().join("file3.dicom")).unwrap();
        File::create(temp_dir.path().join("file4.txt")).unwrap();

        let files = collect_dicom_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_collect_dicom_files_with_headerless() {
        let temp_dir = TempDir::new().unwrap();

        let dicom_file = temp_dir.path().join("headerless_dicom");
        let mut file = File::create(&dicom_file).unwrap();
        file.write_all(&[0u8; 128]).unwrap();
        file.write_all(b"DICM").unwrap();

        File::create(temp_dir.path().join("headerless_other"))
            .unwrap()
            .write_all(b"not dicom")
            .unwrap();

        let files = collect_dicom_files(temp_dir.path()).unwrap();
        assert_eq!(files, vec![dicom_file]);
    }

    #[test]
    fn test_is_dicom_file_magic() {
        let temp_dir = TempDir::new().unwrap();

        let valid = temp_dir.path().join("valid");
        let mut file = File::create(&valid).unwrap();
        file.write_all(&[0u8; 128]).unwrap();
        file.write_all(b"DICM").unwrap();
        file.write_all(b"rest").unwrap();
        assert!(is_dicom_file(&valid));

        let wrong_magic = temp_dir.path().join("wrong");
        let mut file = File::create(&wrong_magic).unwrap();
        file.write_all(&[0u8; 128]).unwrap();
        file.write_all(b"NOTM").unwrap();
        assert!(!is_dicom_file(&wrong_magic));

        let too_small = temp_dir.path().join("small");
        File::create(&too_small).unwrap().write_all(b"tiny").unwrap();
        assert!(!is_dicom_file(&too_small));
    }
}
