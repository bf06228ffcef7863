use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Identification Tags
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);

// Description and Timing Tags
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
pub const SERIES_DATE: Tag = Tag(0x0008, 0x0021);
pub const SERIES_TIME: Tag = Tag(0x0008, 0x0031);
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);

// SR Document Tags
pub const CONTENT_TEMPLATE_SEQUENCE: Tag = Tag(0x0040, 0xA504);
pub const TEMPLATE_IDENTIFIER: Tag = Tag(0x0040, 0xDB00);
pub const CONTENT_SEQUENCE: Tag = Tag(0x0040, 0xA730);
pub const CONCEPT_NAME_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA043);
pub const CONCEPT_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA168);
pub const RELATIONSHIP_TYPE: Tag = Tag(0x0040, 0xA010);
pub const VALUE_TYPE: Tag = Tag(0x0040, 0xA040);
pub const TEXT_VALUE: Tag = Tag(0x0040, 0xA160);
pub const UID_VALUE: Tag = Tag(0x0040, 0xA124);
pub const PERSON_NAME: Tag = Tag(0x0040, 0xA123);

// Code Sequence Item Tags
pub const CODE_VALUE: Tag = Tag(0x0008, 0x0100);
pub const CODING_SCHEME_DESIGNATOR: Tag = Tag(0x0008, 0x0102);
pub const CODE_MEANING: Tag = Tag(0x0008, 0x0104);

// Numeric Measurement Tags
pub const MEASURED_VALUE_SEQUENCE: Tag = Tag(0x0040, 0xA300);
pub const NUMERIC_VALUE: Tag = Tag(0x0040, 0xA30A);
pub const MEASUREMENT_UNITS_CODE_SEQUENCE: Tag = Tag(0x0040, 0x08EA);

// Spatial Coordinate Tags
pub const GRAPHIC_DATA: Tag = Tag(0x0070, 0x0022);
pub const GRAPHIC_TYPE: Tag = Tag(0x0070, 0x0023);
pub const PIXEL_ORIGIN_INTERPRETATION: Tag = Tag(0x0048, 0x0301);
pub const REFERENCED_FRAME_OF_REFERENCE_UID: Tag = Tag(0x3006, 0x0024);

// Reference Tags
pub const REFERENCED_SOP_SEQUENCE: Tag = Tag(0x0008, 0x1199);
pub const REFERENCED_SOP_CLASS_UID: Tag = Tag(0x0008, 0x1150);
pub const REFERENCED_SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x1155);
pub const REFERENCED_FRAME_NUMBER: Tag = Tag(0x0008, 0x1160);
pub const CURRENT_REQUESTED_PROCEDURE_EVIDENCE_SEQUENCE: Tag = Tag(0x0040, 0xA375);
pub const REFERENCED_SERIES_SEQUENCE: Tag = Tag(0x0008, 0x1115);

// Image Geometry Tags
pub const IMAGE_POSITION_PATIENT: Tag = Tag(0x0020, 0x0032);
pub const IMAGE_ORIENTATION_PATIENT: Tag = Tag(0x0020, 0x0037);
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get multi-valued f64 data from DICOM tag
///
/// Handles both binary float and decimal-string encodings. Returns
/// `None` if the tag is not present or cannot be converted
pub fn get_multi_float64_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<f64>> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_multi_float64().ok())
}

/// Helper to get the items of a sequence tag
///
/// Returns `None` if the tag is not present or is not a sequence
pub fn get_sequence_items(dcm: &InMemDicomObject, tag: Tag) -> Option<&[InMemDicomObject]> {
    dcm.element(tag).ok().and_then(|elem| elem.items())
}

/// Helper to get the first item of a sequence tag
pub fn get_first_item(dcm: &InMemDicomObject, tag: Tag) -> Option<&InMemDicomObject> {
    get_sequence_items(dcm, tag).and_then(|items| items.first())
}
