use crate::types::{
    CodedEntry, CoordinateSpace, GraphicType, MeasurementGroup, MeasurementItem, MeasurementReport,
    PixelOrigin, QualitativeEvaluation, RegionSource, RoiRegion,
};
use dicom_object::InMemDicomObject;
use log::{debug, warn};

use super::concepts::{coded_entry, concept_code, concept_name, is_concept, ConceptKey};
use super::recognition::is_tid1500;
use super::tags::{
    get_first_item, get_multi_float64_value, get_sequence_items, get_string_value, CONTENT_SEQUENCE,
    CURRENT_REQUESTED_PROCEDURE_EVIDENCE_SEQUENCE, GRAPHIC_DATA, GRAPHIC_TYPE,
    MEASURED_VALUE_SEQUENCE, MEASUREMENT_UNITS_CODE_SEQUENCE, NUMERIC_VALUE, PERSON_NAME,
    PIXEL_ORIGIN_INTERPRETATION, REFERENCED_FRAME_NUMBER, REFERENCED_FRAME_OF_REFERENCE_UID,
    REFERENCED_SERIES_SEQUENCE, REFERENCED_SOP_INSTANCE_UID, REFERENCED_SOP_SEQUENCE,
    RELATIONSHIP_TYPE, SERIES_DESCRIPTION, SERIES_INSTANCE_UID, SOP_INSTANCE_UID, TEXT_VALUE,
    UID_VALUE, VALUE_TYPE,
};

/// Parses a TID1500 document into a flat measurement report
///
/// Returns `None` when the dataset is not a TID1500 measurement report
/// (wrong modality, storage class or template, or a root concept other
/// than Imaging Measurement Report) — the caller tries the next file.
///
/// Single depth-first pass. Items whose concept name matches no
/// registry entry are skipped, which keeps the walker forward
/// compatible with template extensions.
pub fn parse_report(dcm: &InMemDicomObject) -> Option<MeasurementReport> {
    if !is_tid1500(dcm) {
        return None;
    }
    if !is_concept(dcm, ConceptKey::ImagingMeasurementReport) {
        return None;
    }

    let mut report = MeasurementReport {
        sop_instance_uid: get_string_value(dcm, SOP_INSTANCE_UID).unwrap_or_default(),
        series_description: get_string_value(dcm, SERIES_DESCRIPTION)
            .unwrap_or_else(|| "Unknown".to_string()),
        observer: None,
        groups: Vec::new(),
    };

    let Some(items) = get_sequence_items(dcm, CONTENT_SEQUENCE) else {
        return Some(report);
    };

    for item in items {
        if is_concept(item, ConceptKey::PersonObserver) {
            report.observer = get_string_value(item, PERSON_NAME);
        }
        if is_concept(item, ConceptKey::ImagingMeasurements) {
            let Some(children) = get_sequence_items(item, CONTENT_SEQUENCE) else {
                continue;
            };
            for child in children {
                if is_concept(child, ConceptKey::MeasurementGroup) {
                    report
                        .groups
                        .push(parse_group(child, report.observer.clone(), dcm));
                }
            }
        }
    }

    debug!(
        "parsed {} measurement group(s) from report {}",
        report.groups.len(),
        report.sop_instance_uid
    );
    Some(report)
}

/// Parses one measurement-group container
fn parse_group(
    group_item: &InMemDicomObject,
    observer: Option<String>,
    doc: &InMemDicomObject,
) -> MeasurementGroup {
    let mut group = MeasurementGroup {
        observer,
        ..Default::default()
    };

    let Some(items) = get_sequence_items(group_item, CONTENT_SEQUENCE) else {
        return group;
    };

    for item in items {
        if is_concept(item, ConceptKey::TrackingIdentifier) {
            group.tracking_identifier = get_string_value(item, TEXT_VALUE);
        } else if is_concept(item, ConceptKey::TrackingUniqueIdentifier) {
            group.tracking_unique_identifier = get_string_value(item, UID_VALUE);
        } else if is_concept(item, ConceptKey::Finding) {
            group.finding = concept_code(item);
        } else if is_concept(item, ConceptKey::FindingSite) {
            if let Some(site) = concept_code(item) {
                group.finding_sites.push(site);
            }
        } else if is_concept(item, ConceptKey::Length) {
            parse_length(item, &mut group, doc);
        } else if is_concept(item, ConceptKey::ImageRegion) {
            if let Some(region) = parse_image_region(item, doc) {
                set_region(&mut group, region);
            }
        } else if let Some(eval) = parse_qualitative_evaluation(item) {
            group.qualitative_evaluations.push(eval);
        }
    }

    group
}

/// Records a region on a group, keeping the first when several occur
fn set_region(group: &mut MeasurementGroup, region: RoiRegion) {
    if group.region.is_some() {
        warn!(
            "measurement group {:?} carries more than one region; keeping the first",
            group.tracking_identifier
        );
        return;
    }
    group.region = Some(region);
}

/// Parses a length measurement: numeric value, derivation modifier and
/// the nested ruler polyline with its source-image reference
fn parse_length(item: &InMemDicomObject, group: &mut MeasurementGroup, doc: &InMemDicomObject) {
    let mut derivation_modifier = None;
    let mut region = None;

    if let Some(children) = get_sequence_items(item, CONTENT_SEQUENCE) {
        for child in children {
            if is_concept(child, ConceptKey::Derivation) {
                derivation_modifier = concept_code(child);
            } else if let Some(data) = get_multi_float64_value(child, GRAPHIC_DATA) {
                let referenced = selected_from_reference(child);
                region = Some(RoiRegion {
                    graphic_type: GraphicType::Polyline,
                    space: CoordinateSpace::ImagePlane {
                        pixel_origin: pixel_origin(child),
                    },
                    graphic_data: data,
                    source: RegionSource::LengthRuler,
                    referenced_series_instance_uid: referenced
                        .as_deref()
                        .and_then(|uid| series_for_instance(doc, uid)),
                    referenced_sop_instance_uid: referenced,
                });
            }
        }
    }

    if let Some(measured) = get_first_item(item, MEASURED_VALUE_SEQUENCE) {
        let units = get_first_item(measured, MEASUREMENT_UNITS_CODE_SEQUENCE)
            .and_then(coded_entry)
            .unwrap_or_else(|| CodedEntry::new("", "", ""));
        let quantity = concept_name(item).unwrap_or_else(|| {
            CodedEntry::new(
                ConceptKey::Length.scheme(),
                ConceptKey::Length.value(),
                "Length",
            )
        });
        group.measurement_items.push(MeasurementItem {
            value: get_string_value(measured, NUMERIC_VALUE).unwrap_or_default(),
            units,
            quantity,
            derivation_modifier,
        });
    }

    if let Some(region) = region {
        set_region(group, region);
    }
}

/// Parses an "Image Region" SCOORD or SCOORD3D item
fn parse_image_region(item: &InMemDicomObject, doc: &InMemDicomObject) -> Option<RoiRegion> {
    let graphic_data = get_multi_float64_value(item, GRAPHIC_DATA)?;
    let type_str = get_string_value(item, GRAPHIC_TYPE).unwrap_or_default();
    let Some(graphic_type) = GraphicType::from_dicom(&type_str) else {
        warn!("unsupported graphic type {:?}; region skipped", type_str);
        return None;
    };

    let space = if get_string_value(item, VALUE_TYPE).as_deref() == Some("SCOORD3D") {
        CoordinateSpace::FrameOfReference {
            uid: get_string_value(item, REFERENCED_FRAME_OF_REFERENCE_UID).unwrap_or_default(),
        }
    } else {
        CoordinateSpace::ImagePlane {
            pixel_origin: pixel_origin(item),
        }
    };

    let referenced = selected_from_reference(item);
    Some(RoiRegion {
        graphic_type,
        space,
        graphic_data,
        source: RegionSource::ImageRegion,
        referenced_series_instance_uid: referenced
            .as_deref()
            .and_then(|uid| series_for_instance(doc, uid)),
        referenced_sop_instance_uid: referenced,
    })
}

fn pixel_origin(item: &InMemDicomObject) -> PixelOrigin {
    get_string_value(item, PIXEL_ORIGIN_INTERPRETATION)
        .map(|s| PixelOrigin::from_dicom(&s))
        .unwrap_or_default()
}

/// A CODE item related by CONTAINS becomes a qualitative evaluation
fn parse_qualitative_evaluation(item: &InMemDicomObject) -> Option<QualitativeEvaluation> {
    if get_string_value(item, RELATIONSHIP_TYPE).as_deref() != Some("CONTAINS") {
        return None;
    }
    Some(QualitativeEvaluation {
        name: concept_name(item)?,
        value: concept_code(item)?,
    })
}

/// Reads the referenced source-image SOP instance from a coordinate
/// item's SELECTED FROM child
///
/// Only single-frame references are supported; a different frame number
/// is logged and the reference is still recorded.
fn selected_from_reference(item: &InMemDicomObject) -> Option<String> {
    let mut result = None;
    if let Some(children) = get_sequence_items(item, CONTENT_SEQUENCE) {
        for child in children {
            if get_string_value(child, RELATIONSHIP_TYPE).as_deref() != Some("SELECTED FROM") {
                continue;
            }
            let Some(references) = get_sequence_items(child, REFERENCED_SOP_SEQUENCE) else {
                continue;
            };
            for reference in references {
                if result.is_none() {
                    result = get_string_value(reference, REFERENCED_SOP_INSTANCE_UID);
                }
                if let Some(frame) = get_string_value(reference, REFERENCED_FRAME_NUMBER) {
                    if frame != "1" {
                        warn!(
                            "only single-frame references are supported (got frame {})",
                            frame
                        );
                    }
                }
            }
        }
    }
    result
}

/// Finds the series that contains a referenced SOP instance by scanning
/// the document's evidence sequence
fn series_for_instance(doc: &InMemDicomObject, sop_instance_uid: &str) -> Option<String> {
    for study in get_sequence_items(doc, CURRENT_REQUESTED_PROCEDURE_EVIDENCE_SEQUENCE)? {
        for series in get_sequence_items(study, REFERENCED_SERIES_SEQUENCE).unwrap_or(&[]) {
            let Some(sops) = get_sequence_items(series, REFERENCED_SOP_SEQUENCE) else {
                continue;
            };
            let found = sops.iter().any(|sop| {
                get_string_value(sop, REFERENCED_SOP_INSTANCE_UID).as_deref()
                    == Some(sop_instance_uid)
            });
            if found {
                return get_string_value(series, SERIES_INSTANCE_UID);
            }
        }
    }
    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::extraction::recognition::ENHANCED_SR_STORAGE;
    use crate::extraction::tags::{
        CODE_MEANING, CODE_VALUE, CODING_SCHEME_DESIGNATOR, CONCEPT_CODE_SEQUENCE,
        CONCEPT_NAME_CODE_SEQUENCE, CONTENT_TEMPLATE_SEQUENCE, MODALITY, REFERENCED_SOP_CLASS_UID,
        SOP_CLASS_UID, TEMPLATE_IDENTIFIER,
    };
    use dicom_core::value::DataSetSequence;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    pub fn code_item(scheme: &str, value: &str, meaning: &str) -> InMemDicomObject {
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

    pub fn with_concept_name(mut item: InMemDicomObject, key: ConceptKey) -> InMemDicomObject {
        item.put(DataElement::new(
            CONCEPT_NAME_CODE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![code_item(key.scheme(), key.value(), "")]),
        ));
        item
    }

    pub fn put_content_sequence(obj: &mut InMemDicomObject, items: Vec<InMemDicomObject>) {
        obj.put(DataElement::new(
            CONTENT_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(items),
        ));
    }

    pub fn text_item(key: ConceptKey, text: &str) -> InMemDicomObject {
        with_concept_name(
            InMemDicomObject::from_element_iter([DataElement::new(
                TEXT_VALUE,
                VR::UT,
                PrimitiveValue::from(text),
            )]),
            key,
        )
    }

    fn uid_item(key: ConceptKey, uid: &str) -> InMemDicomObject {
        with_concept_name(
            InMemDicomObject::from_element_iter([DataElement::new(
                UID_VALUE,
                VR::UI,
                PrimitiveValue::from(uid),
            )]),
            key,
        )
    }

    fn coded_item(key: ConceptKey, code: InMemDicomObject) -> InMemDicomObject {
        let mut item = with_concept_name(InMemDicomObject::new_empty(), key);
        item.put(DataElement::new(
            CONCEPT_CODE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![code]),
        ));
        item
    }

    /// A SELECTED FROM image item referencing one SOP instance
    pub fn selected_from_item(sop_instance_uid: &str) -> InMemDicomObject {
        let reference = InMemDicomObject::from_element_iter([
            DataElement::new(
                REFERENCED_SOP_CLASS_UID,
                VR::UI,
                PrimitiveValue::from("1.2.840.10008.5.1.4.1.1.4"),
            ),
            DataElement::new(
                REFERENCED_SOP_INSTANCE_UID,
                VR::UI,
                PrimitiveValue::from(sop_instance_uid),
            ),
        ]);
        InMemDicomObject::from_element_iter([
            DataElement::new(
                RELATIONSHIP_TYPE,
                VR::CS,
                PrimitiveValue::from("SELECTED FROM"),
            ),
            DataElement::new(
                REFERENCED_SOP_SEQUENCE,
                VR::SQ,
                DataSetSequence::from(vec![reference]),
            ),
        ])
    }

    /// A length NUM item with measured value, derivation and nested ruler
    pub fn length_item(value: &str, polyline: &[f32], referenced_sop: &str) -> InMemDicomObject {
        let units = code_item("UCUM", "mm", "millimeter");
        let measured = InMemDicomObject::from_element_iter([
            DataElement::new(NUMERIC_VALUE, VR::DS, PrimitiveValue::from(value)),
            DataElement::new(
                MEASUREMENT_UNITS_CODE_SEQUENCE,
                VR::SQ,
                DataSetSequence::from(vec![units]),
            ),
        ]);

        let mut scoord = InMemDicomObject::from_element_iter([
            DataElement::new(
                GRAPHIC_DATA,
                VR::FL,
                PrimitiveValue::F32(polyline.to_vec().into()),
            ),
            DataElement::new(GRAPHIC_TYPE, VR::CS, PrimitiveValue::from("POLYLINE")),
        ]);
        put_content_sequence(&mut scoord, vec![selected_from_item(referenced_sop)]);

        let mut item = InMemDicomObject::new_empty();
        item.put(DataElement::new(
            CONCEPT_NAME_CODE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![code_item("SRT", "G-D7FE", "Length")]),
        ));
        item.put(DataElement::new(
            MEASURED_VALUE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![measured]),
        ));
        put_content_sequence(&mut item, vec![scoord]);
        item
    }

    pub fn measurement_group_item(children: Vec<InMemDicomObject>) -> InMemDicomObject {
        let mut item = with_concept_name(InMemDicomObject::new_empty(), ConceptKey::MeasurementGroup);
        put_content_sequence(&mut item, children);
        item
    }

    /// Assembles a complete TID1500 document around the given groups
    pub fn tid1500_document(groups: Vec<InMemDicomObject>) -> InMemDicomObject {
        let template_item = InMemDicomObject::from_element_iter([DataElement::new(
            TEMPLATE_IDENTIFIER,
            VR::CS,
            PrimitiveValue::from("1500"),
        )]);

        let observer = with_concept_name(
            InMemDicomObject::from_element_iter([DataElement::new(
                PERSON_NAME,
                VR::PN,
                PrimitiveValue::from("Doe^Jane"),
            )]),
            ConceptKey::PersonObserver,
        );

        let mut measurements =
            with_concept_name(InMemDicomObject::new_empty(), ConceptKey::ImagingMeasurements);
        put_content_sequence(&mut measurements, groups);

        let mut dcm = InMemDicomObject::from_element_iter([
            DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("SR")),
            DataElement::new(
                SOP_CLASS_UID,
                VR::UI,
                PrimitiveValue::from(ENHANCED_SR_STORAGE),
            ),
            DataElement::new(SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from("1.2.3.4")),
            DataElement::new(
                SERIES_DESCRIPTION,
                VR::LO,
                PrimitiveValue::from("Measurement report"),
            ),
            DataElement::new(
                CONTENT_TEMPLATE_SEQUENCE,
                VR::SQ,
                DataSetSequence::from(vec![template_item]),
            ),
        ]);
        dcm.put(DataElement::new(
            CONCEPT_NAME_CODE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![code_item(
                ConceptKey::ImagingMeasurementReport.scheme(),
                ConceptKey::ImagingMeasurementReport.value(),
                "Imaging Measurement Report",
            )]),
        ));
        put_content_sequence(&mut dcm, vec![observer, measurements]);
        dcm
    }

    #[test]
    fn test_parse_report_rejects_non_tid1500() {
        assert!(parse_report(&InMemDicomObject::new_empty()).is_none());
    }

    #[test]
    fn test_parse_report_one_group_per_concept_node_in_order() {
        let groups = vec![
            measurement_group_item(vec![text_item(ConceptKey::TrackingIdentifier, "Tumor1")]),
            measurement_group_item(vec![text_item(ConceptKey::TrackingIdentifier, "Tumor2")]),
            measurement_group_item(vec![text_item(ConceptKey::TrackingIdentifier, "Tumor3")]),
        ];
        let report = parse_report(&tid1500_document(groups)).unwrap();

        assert_eq!(report.groups.len(), 3);
        let names: Vec<_> = report
            .groups
            .iter()
            .map(|g| g.tracking_identifier.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["Tumor1", "Tumor2", "Tumor3"]);
    }

    #[test]
    fn test_parse_report_captures_observer_context() {
        let groups = vec![measurement_group_item(vec![text_item(
            ConceptKey::TrackingIdentifier,
            "Tumor1",
        )])];
        let report = parse_report(&tid1500_document(groups)).unwrap();

        assert_eq!(report.observer.as_deref(), Some("Doe^Jane"));
        assert_eq!(report.groups[0].observer.as_deref(), Some("Doe^Jane"));
    }

    #[test]
    fn test_parse_group_tracking_finding_and_site() {
        let group = measurement_group_item(vec![
            text_item(ConceptKey::TrackingIdentifier, "Tumor1"),
            uid_item(ConceptKey::TrackingUniqueIdentifier, "1.2.3.4.5"),
            coded_item(
                ConceptKey::Finding,
                code_item("SCT", "108369006", "Neoplasm"),
            ),
            coded_item(ConceptKey::FindingSite, code_item("SRT", "T-04000", "Breast")),
        ]);
        let report = parse_report(&tid1500_document(vec![group])).unwrap();
        let parsed = &report.groups[0];

        assert_eq!(parsed.tracking_identifier.as_deref(), Some("Tumor1"));
        assert_eq!(parsed.tracking_unique_identifier.as_deref(), Some("1.2.3.4.5"));
        assert_eq!(parsed.finding.as_ref().unwrap().meaning, "Neoplasm");
        assert_eq!(parsed.finding_sites.len(), 1);
        assert_eq!(parsed.finding_sites[0].value, "T-04000");
    }

    #[test]
    fn test_parse_length_yields_item_and_ruler_region() {
        let group = measurement_group_item(vec![
            text_item(ConceptKey::TrackingIdentifier, "Tumor1"),
            length_item("10.0", &[0.0, 0.0, 10.0, 0.0], "1.2.840.999.1"),
        ]);
        let report = parse_report(&tid1500_document(vec![group])).unwrap();
        let parsed = &report.groups[0];

        assert_eq!(parsed.measurement_items.len(), 1);
        let item = &parsed.measurement_items[0];
        assert_eq!(item.value, "10.0");
        assert_eq!(item.units.meaning, "millimeter");
        assert_eq!(item.quantity.meaning, "Length");
        assert!(item.derivation_modifier.is_none());

        let region = parsed.region.as_ref().unwrap();
        assert_eq!(region.source, RegionSource::LengthRuler);
        assert_eq!(region.graphic_data, vec![0.0, 0.0, 10.0, 0.0]);
        assert_eq!(
            region.referenced_sop_instance_uid.as_deref(),
            Some("1.2.840.999.1")
        );
    }

    #[test]
    fn test_group_without_region_is_retained() {
        let group = measurement_group_item(vec![text_item(
            ConceptKey::TrackingIdentifier,
            "MetadataOnly",
        )]);
        let report = parse_report(&tid1500_document(vec![group])).unwrap();

        assert_eq!(report.groups.len(), 1);
        assert!(report.groups[0].region.is_none());
    }

    #[test]
    fn test_unknown_concepts_are_skipped() {
        let unknown = with_concept_name(InMemDicomObject::new_empty(), ConceptKey::Derivation);
        let group = measurement_group_item(vec![
            unknown,
            text_item(ConceptKey::TrackingIdentifier, "Tumor1"),
        ]);
        let report = parse_report(&tid1500_document(vec![group])).unwrap();

        let parsed = &report.groups[0];
        assert_eq!(parsed.tracking_identifier.as_deref(), Some("Tumor1"));
        assert!(parsed.qualitative_evaluations.is_empty());
    }

    #[test]
    fn test_contains_code_item_becomes_qualitative_evaluation() {
        let mut eval = InMemDicomObject::from_element_iter([DataElement::new(
            RELATIONSHIP_TYPE,
            VR::CS,
            PrimitiveValue::from("CONTAINS"),
        )]);
        eval.put(DataElement::new(
            CONCEPT_NAME_CODE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![code_item(
                "DCM",
                "130400",
                "Geometric purpose of region",
            )]),
        ));
        eval.put(DataElement::new(
            CONCEPT_CODE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![code_item("SCT", "75958009", "Bounded by")]),
        ));

        let group = measurement_group_item(vec![eval]);
        let report = parse_report(&tid1500_document(vec![group])).unwrap();

        let evals = &report.groups[0].qualitative_evaluations;
        assert_eq!(evals.len(), 1);
        assert_eq!(evals[0].name.value, "130400");
        assert_eq!(evals[0].value.meaning, "Bounded by");
    }

    #[test]
    fn test_parse_image_region_scoord() {
        let mut scoord = with_concept_name(
            InMemDicomObject::from_element_iter([
                DataElement::new(
                    GRAPHIC_DATA,
                    VR::FL,
                    PrimitiveValue::F32(
                        vec![1.0_f32, 2.0, 11.0, 2.0, 11.0, 7.0, 1.0, 7.0].into(),
                    ),
                ),
                DataElement::new(GRAPHIC_TYPE, VR::CS, PrimitiveValue::from("POLYLINE")),
                DataElement::new(
                    PIXEL_ORIGIN_INTERPRETATION,
                    VR::CS,
                    PrimitiveValue::from("FRAME"),
                ),
            ]),
            ConceptKey::ImageRegion,
        );
        put_content_sequence(&mut scoord, vec![selected_from_item("1.2.840.999.2")]);

        let group = measurement_group_item(vec![scoord]);
        let report = parse_report(&tid1500_document(vec![group])).unwrap();
        let region = report.groups[0].region.as_ref().unwrap();

        assert_eq!(region.source, RegionSource::ImageRegion);
        assert_eq!(region.graphic_type, GraphicType::Polyline);
        assert_eq!(region.point_count(), 4);
        assert_eq!(
            region.space,
            CoordinateSpace::ImagePlane {
                pixel_origin: PixelOrigin::Frame
            }
        );
    }

    #[test]
    fn test_parse_image_region_scoord3d_point() {
        let scoord3d = with_concept_name(
            InMemDicomObject::from_element_iter([
                DataElement::new(VALUE_TYPE, VR::CS, PrimitiveValue::from("SCOORD3D")),
                DataElement::new(
                    GRAPHIC_DATA,
                    VR::FL,
                    PrimitiveValue::F32(vec![10.0_f32, -20.0, 30.0].into()),
                ),
                DataElement::new(GRAPHIC_TYPE, VR::CS, PrimitiveValue::from("POINT")),
                DataElement::new(
                    REFERENCED_FRAME_OF_REFERENCE_UID,
                    VR::UI,
                    PrimitiveValue::from("1.2.840.555.7"),
                ),
            ]),
            ConceptKey::ImageRegion,
        );

        let group = measurement_group_item(vec![scoord3d]);
        let report = parse_report(&tid1500_document(vec![group])).unwrap();
        let region = report.groups[0].region.as_ref().unwrap();

        assert_eq!(region.graphic_type, GraphicType::Point);
        assert_eq!(
            region.space,
            CoordinateSpace::FrameOfReference {
                uid: "1.2.840.555.7".to_string()
            }
        );
        assert_eq!(region.graphic_data, vec![10.0, -20.0, 30.0]);
    }
}
