use crate::types::{CodedEntry, MeasurementGroup};
use dicom_object::InMemDicomObject;

use super::tags::{
    get_first_item, get_string_value, CODE_MEANING, CODE_VALUE, CODING_SCHEME_DESIGNATOR,
    CONCEPT_CODE_SEQUENCE, CONCEPT_NAME_CODE_SEQUENCE,
};

/// The registry of concept codes recognized during traversal
///
/// Matching is by (scheme designator, code value) only; code meanings
/// are free text and never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConceptKey {
    ImagingMeasurementReport,
    PersonObserver,
    ImagingMeasurements,
    MeasurementGroup,
    TrackingIdentifier,
    TrackingUniqueIdentifier,
    Finding,
    FindingSite,
    Length,
    Derivation,
    ImageRegion,
    GeometricPurpose,
}

impl ConceptKey {
    pub fn scheme(&self) -> &'static str {
        match self {
            ConceptKey::FindingSite | ConceptKey::Length => "SRT",
            _ => "DCM",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            ConceptKey::ImagingMeasurementReport => "126000",
            ConceptKey::PersonObserver => "121008",
            ConceptKey::ImagingMeasurements => "126010",
            ConceptKey::MeasurementGroup => "125007",
            ConceptKey::TrackingIdentifier => "112039",
            ConceptKey::TrackingUniqueIdentifier => "112040",
            ConceptKey::Finding => "121071",
            ConceptKey::FindingSite => "G-C0E3",
            ConceptKey::Length => "G-D7FE",
            ConceptKey::Derivation => "121401",
            ConceptKey::ImageRegion => "111030",
            ConceptKey::GeometricPurpose => "130400",
        }
    }
}

/// The "Bounded by" geometric-purpose value marking bounding-box regions
pub const BOUNDED_BY_SCHEME: &str = "SCT";
pub const BOUNDED_BY_VALUE: &str = "75958009";

/// Checks whether a content item's concept name designates the given concept
///
/// An absent or empty `ConceptNameCodeSequence` is not an error; the
/// item simply does not match.
pub fn is_concept(item: &InMemDicomObject, key: ConceptKey) -> bool {
    concept_name(item)
        .map(|code| code.designates(key.scheme(), key.value()))
        .unwrap_or(false)
}

/// Reads the first `ConceptNameCodeSequence` entry of a content item
pub fn concept_name(item: &InMemDicomObject) -> Option<CodedEntry> {
    get_first_item(item, CONCEPT_NAME_CODE_SEQUENCE).and_then(coded_entry)
}

/// Reads the first `ConceptCodeSequence` entry (the coded value) of a
/// CODE content item
pub fn concept_code(item: &InMemDicomObject) -> Option<CodedEntry> {
    get_first_item(item, CONCEPT_CODE_SEQUENCE).and_then(coded_entry)
}

/// Decodes one code-sequence item into a [`CodedEntry`]
///
/// Requires scheme designator and code value; the meaning defaults to
/// empty when absent.
pub fn coded_entry(item: &InMemDicomObject) -> Option<CodedEntry> {
    let scheme = get_string_value(item, CODING_SCHEME_DESIGNATOR)?;
    let value = get_string_value(item, CODE_VALUE)?;
    let meaning = get_string_value(item, CODE_MEANING).unwrap_or_default();
    Some(CodedEntry::new(scheme, value, meaning))
}

/// Whether a group's qualitative evaluations mark it as a bounding box
///
/// True when a "Geometric purpose of region" evaluation carries the
/// "Bounded by" value.
pub fn group_is_bounding_box(group: &MeasurementGroup) -> bool {
    group.qualitative_evaluations.iter().any(|eval| {
        eval.name.designates(
            ConceptKey::GeometricPurpose.scheme(),
            ConceptKey::GeometricPurpose.value(),
        ) && eval.value.designates(BOUNDED_BY_SCHEME, BOUNDED_BY_VALUE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QualitativeEvaluation;
    use dicom_core::value::DataSetSequence;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    fn code_item(scheme: &str, value: &str, meaning: &str) -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            DataElement::new(CODE_VALUE, VR::SH, PrimitiveValue::from(value)),
            DataElement::new(
                CODING_SCHEME_DESIGNATOR,
                VR::SH,
                PrimitiveValue::from(scheme),
            ),
            DataElement::new(CODE_MEANING, VR::LO, PrimitiveValue::from(meaning)),
        ])
    }

    fn named_item(scheme: &str, value: &str, meaning: &str) -> InMemDicomObject {
        InMemDicomObject::from_element_iter([DataElement::new(
            CONCEPT_NAME_CODE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![code_item(scheme, value, meaning)]),
        )])
    }

    #[test]
    fn test_is_concept_matches_scheme_and_value() {
        let item = named_item("DCM", "125007", "Measurement Group");
        assert!(is_concept(&item, ConceptKey::MeasurementGroup));
        assert!(!is_concept(&item, ConceptKey::TrackingIdentifier));
    }

    #[test]
    fn test_is_concept_ignores_meaning() {
        // A renamed meaning must still match
        let item = named_item("DCM", "112039", "Lesion label");
        assert!(is_concept(&item, ConceptKey::TrackingIdentifier));

        // A matching meaning with the wrong code must not match
        let item = named_item("DCM", "999999", "Tracking Identifier");
        assert!(!is_concept(&item, ConceptKey::TrackingIdentifier));
    }

    #[test]
    fn test_is_concept_absent_name_is_no_match() {
        let item = InMemDicomObject::new_empty();
        assert!(!is_concept(&item, ConceptKey::ImagingMeasurementReport));
    }

    #[test]
    fn test_coded_entry_requires_scheme_and_value() {
        assert!(coded_entry(&code_item("SRT", "G-C0E3", "Finding Site")).is_some());

        let missing_value = InMemDicomObject::from_element_iter([DataElement::new(
            CODING_SCHEME_DESIGNATOR,
            VR::SH,
            PrimitiveValue::from("SRT"),
        )]);
        assert!(coded_entry(&missing_value).is_none());
    }

    #[test]
    fn test_concept_code_reads_concept_code_sequence() {
        let mut item = named_item("SRT", "G-C0E3", "Finding Site");
        item.put(DataElement::new(
            CONCEPT_CODE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![code_item("SRT", "T-04000", "Breast")]),
        ));

        let entry = concept_code(&item).unwrap();
        assert_eq!(entry.value, "T-04000");
        assert_eq!(entry.meaning, "Breast");
    }

    #[test]
    fn test_group_is_bounding_box() {
        let mut group = MeasurementGroup::default();
        assert!(!group_is_bounding_box(&group));

        group.qualitative_evaluations.push(QualitativeEvaluation {
            name: CodedEntry::new("DCM", "130400", "Geometric purpose of region"),
            value: CodedEntry::new("SCT", "75958009", "Bounded by"),
        });
        assert!(group_is_bounding_box(&group));

        group.qualitative_evaluations[0].value = CodedEntry::new("SCT", "1234", "Enclosed by");
        assert!(!group_is_bounding_box(&group));
    }
}
