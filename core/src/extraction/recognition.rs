use dicom_object::InMemDicomObject;

use super::tags::{
    get_first_item, get_string_value, CONTENT_TEMPLATE_SEQUENCE, MODALITY, SOP_CLASS_UID,
    TEMPLATE_IDENTIFIER,
};

// Accepted SR storage classes
pub const ENHANCED_SR_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.88.22";
pub const COMPREHENSIVE_SR_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.88.33";
pub const COMPREHENSIVE_3D_SR_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.88.34";

// Storage classes of referenced evidence
pub const SEGMENTATION_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.66.4";
pub const REAL_WORLD_VALUE_MAPPING_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.67";

/// Checks whether a dataset is a TID1500 measurement report
///
/// Requires SR modality, one of the accepted SR storage classes and
/// template identifier "1500". Any missing attribute means "no match",
/// never an error.
pub fn is_tid1500(dcm: &InMemDicomObject) -> bool {
    let is_sr_storage = matches!(
        get_string_value(dcm, SOP_CLASS_UID).as_deref(),
        Some(ENHANCED_SR_STORAGE | COMPREHENSIVE_SR_STORAGE | COMPREHENSIVE_3D_SR_STORAGE)
    );

    get_string_value(dcm, MODALITY).as_deref() == Some("SR")
        && is_sr_storage
        && template_identifier(dcm).as_deref() == Some("1500")
}

/// Reads the template identifier from the content template sequence
pub fn template_identifier(dcm: &InMemDicomObject) -> Option<String> {
    get_first_item(dcm, CONTENT_TEMPLATE_SEQUENCE)
        .and_then(|item| get_string_value(item, TEMPLATE_IDENTIFIER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tags::{MODALITY, SOP_CLASS_UID};
    use dicom_core::value::DataSetSequence;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    fn tid1500_header(modality: &str, sop_class: &str, template: &str) -> InMemDicomObject {
        let template_item = InMemDicomObject::from_element_iter([DataElement::new(
            TEMPLATE_IDENTIFIER,
            VR::CS,
            PrimitiveValue::from(template),
        )]);
        InMemDicomObject::from_element_iter([
            DataElement::new(MODALITY, VR::CS, PrimitiveValue::from(modality)),
            DataElement::new(SOP_CLASS_UID, VR::UI, PrimitiveValue::from(sop_class)),
            DataElement::new(
                CONTENT_TEMPLATE_SEQUENCE,
                VR::SQ,
                DataSetSequence::from(vec![template_item]),
            ),
        ])
    }

    #[test]
    fn test_is_tid1500_accepts_all_sr_storage_classes() {
        for sop_class in [
            ENHANCED_SR_STORAGE,
            COMPREHENSIVE_SR_STORAGE,
            COMPREHENSIVE_3D_SR_STORAGE,
        ] {
            assert!(is_tid1500(&tid1500_header("SR", sop_class, "1500")));
        }
    }

    #[test]
    fn test_is_tid1500_rejects_wrong_modality() {
        assert!(!is_tid1500(&tid1500_header("MG", ENHANCED_SR_STORAGE, "1500")));
    }

    #[test]
    fn test_is_tid1500_rejects_wrong_storage_class() {
        assert!(!is_tid1500(&tid1500_header("SR", SEGMENTATION_STORAGE, "1500")));
    }

    #[test]
    fn test_is_tid1500_rejects_wrong_template() {
        assert!(!is_tid1500(&tid1500_header("SR", ENHANCED_SR_STORAGE, "1501")));
    }

    #[test]
    fn test_is_tid1500_tolerates_missing_attributes() {
        assert!(!is_tid1500(&InMemDicomObject::new_empty()));

        // Missing template sequence
        let dcm = InMemDicomObject::from_element_iter([
            DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("SR")),
            DataElement::new(
                SOP_CLASS_UID,
                VR::UI,
                PrimitiveValue::from(ENHANCED_SR_STORAGE),
            ),
        ]);
        assert!(!is_tid1500(&dcm));
    }
}
