//! Tabular projection of measurement records
//!
//! Turns flat measurement groups and their derived geometry into
//! [`TableSpec`] structures for the presentation layer. Column names
//! are generated from measurement-item metadata and disambiguated when
//! duplicates occur.

use std::collections::HashMap;

use crate::extraction::RegionGeometry;
use crate::types::{ColumnDef, MeasurementGroup, MeasurementItem, TableSpec};

/// Generates column metadata for a list of measurement items
///
/// The description is the derivation-modifier meaning when present,
/// else the base quantity meaning; the column name appends the unit
/// meaning in brackets (with any embedded square brackets stripped).
fn column_info(items: &[MeasurementItem]) -> Vec<ColumnDef> {
    items
        .iter()
        .map(|item| {
            let description = item
                .derivation_modifier
                .as_ref()
                .map(|code| code.meaning.clone())
                .unwrap_or_else(|| item.quantity.meaning.clone());
            let unit_label = item.units.meaning.replace(['[', ']'], "");
            ColumnDef {
                name: format!("{} [{}]", description, unit_label),
                unit: item.units.meaning.clone(),
                description,
            }
        })
        .collect()
}

/// Disambiguates duplicate names in reverse item order
///
/// The first occurrence processed (the last in document order) keeps
/// the bare name; every earlier duplicate gets an occurrence counter:
/// `["A", "A", "B", "A"]` becomes `["A (3)", "A (2)", "B", "A"]`.
pub fn disambiguate_names(names: &mut [String]) {
    let mut totals: HashMap<String, usize> = HashMap::new();
    for name in names.iter() {
        *totals.entry(name.clone()).or_insert(0) += 1;
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    for name in names.iter_mut().rev() {
        let original = name.clone();
        if totals[&original] < 2 {
            continue;
        }
        let count = seen.entry(original.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            *name = format!("{} ({})", original, count);
        }
    }
}

fn disambiguate_columns(columns: &mut [ColumnDef]) {
    let mut names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
    disambiguate_names(&mut names);
    for (column, name) in columns.iter_mut().zip(names) {
        column.name = name;
    }
}

/// Projects measurement groups into the numeric measurement table
///
/// Column layout follows the first group's measurement items; one row
/// per group with the tracking identifier leading.
pub fn measurement_table(groups: &[MeasurementGroup]) -> TableSpec {
    let mut columns = vec![ColumnDef::plain("Tracking Identifier")];
    if let Some(first) = groups.first() {
        let mut info = column_info(&first.measurement_items);
        disambiguate_columns(&mut info);
        columns.extend(info);
    }

    let mut table = TableSpec::new(columns);
    for group in groups {
        let mut cells = vec![group.tracking_identifier.clone().unwrap_or_default()];
        cells.extend(group.measurement_items.iter().map(|item| item.value.clone()));
        table.push_row(cells);
    }
    table
}

/// Projects bounding-box groups into a table of box metrics
pub fn bounding_box_table(entries: &[(&MeasurementGroup, &RegionGeometry)]) -> TableSpec {
    let mut table = TableSpec::new(vec![
        ColumnDef::plain("Tracking Identifier"),
        ColumnDef::plain("Finding Type"),
        ColumnDef::plain("Finding Site"),
        ColumnDef::plain("Bounding Box Points"),
        ColumnDef::plain("Width"),
        ColumnDef::plain("Height"),
        ColumnDef::plain("Center (RAS)"),
    ]);

    for (group, geometry) in entries {
        let RegionGeometry::BoundingBox {
            corners,
            width,
            height,
            center,
        } = geometry
        else {
            continue;
        };
        let points = corners
            .iter()
            .map(|c| format!("({}, {})", fmt2(c[0]), fmt2(c[1])))
            .collect::<Vec<_>>()
            .join(", ");
        table.push_row(vec![
            group.tracking_identifier.clone().unwrap_or_default(),
            group
                .finding
                .as_ref()
                .map(|f| f.meaning.clone())
                .unwrap_or_default(),
            group
                .finding_sites
                .first()
                .map(|s| s.meaning.clone())
                .unwrap_or_default(),
            points,
            fmt2(*width),
            fmt2(*height),
            format!("({}, {}, {})", fmt2(center[0]), fmt2(center[1]), fmt2(center[2])),
        ]);
    }
    table
}

/// Projects point groups into a table, appending one column per
/// qualitative evaluation of the first group
pub fn point_table(entries: &[(&MeasurementGroup, &RegionGeometry)]) -> TableSpec {
    let mut columns = vec![
        ColumnDef::plain("Tracking Identifier"),
        ColumnDef::plain("Finding Type"),
        ColumnDef::plain("Finding Site"),
        ColumnDef::plain("Point"),
    ];
    if let Some((first, _)) = entries.first() {
        columns.extend(
            first
                .qualitative_evaluations
                .iter()
                .map(|eval| ColumnDef::plain(eval.name.meaning.clone())),
        );
    }

    let mut table = TableSpec::new(columns);
    for (group, geometry) in entries {
        let RegionGeometry::Point { position } = geometry else {
            continue;
        };
        let mut cells = vec![
            group.tracking_identifier.clone().unwrap_or_default(),
            group
                .finding
                .as_ref()
                .map(|f| f.meaning.clone())
                .unwrap_or_default(),
            group
                .finding_sites
                .first()
                .map(|s| s.meaning.clone())
                .unwrap_or_default(),
            format!(
                "({}, {}, {})",
                fmt2(position[0]),
                fmt2(position[1]),
                fmt2(position[2])
            ),
        ];
        cells.extend(
            group
                .qualitative_evaluations
                .iter()
                .map(|eval| eval.value.meaning.clone()),
        );
        table.push_row(cells);
    }
    table
}

fn fmt2(value: f64) -> String {
    format!("{:.2}", value)
}
