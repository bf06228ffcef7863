use crate::api::LoadedReport;
use crate::extraction::RegionGeometry;
use crate::types::TableSpec;
use std::fmt;

/// Text report formatter for a loaded structured report
pub struct TextReport<'a> {
    report: &'a LoadedReport,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a LoadedReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Structured Report Measurements")?;
        writeln!(f, "==============================")?;
        writeln!(f)?;
        writeln!(f, "Report:     {}", self.report.uid)?;
        writeln!(f, "Series:     {}", self.report.series_description)?;
        writeln!(
            f,
            "Observer:   {}",
            self.report.report.observer.as_deref().unwrap_or("unknown")
        )?;
        if let Some(prior) = &self.report.prior {
            writeln!(f, "Prior:      {}", prior)?;
        }
        if let Some(follow_up) = &self.report.follow_up {
            writeln!(f, "Follow-up:  {}", follow_up)?;
        }
        writeln!(f)?;

        writeln!(f, "Groups: {}", self.report.report.groups.len())?;
        for (index, group) in self.report.report.groups.iter().enumerate() {
            write!(f, "  [{}] {}", index, group.label())?;
            if let Some(finding) = &group.finding {
                write!(f, " - {}", finding.meaning)?;
            }
            if !group.finding_sites.is_empty() {
                let sites: Vec<&str> = group
                    .finding_sites
                    .iter()
                    .map(|s| s.meaning.as_str())
                    .collect();
                write!(f, " ({})", sites.join(", "))?;
            }
            writeln!(f)?;

            if let Some(gg) = self
                .report
                .geometries
                .iter()
                .find(|gg| gg.group_index == index)
            {
                write_geometry(f, &gg.geometry)?;
            }
        }

        if let Some(table) = &self.report.table {
            writeln!(f)?;
            write_table(f, table)?;
        }

        Ok(())
    }
}

fn write_geometry(f: &mut fmt::Formatter<'_>, geometry: &RegionGeometry) -> fmt::Result {
    match geometry {
        RegionGeometry::Point { position } => {
            writeln!(
                f,
                "      point at ({:.2}, {:.2}, {:.2})",
                position[0], position[1], position[2]
            )
        }
        RegionGeometry::BoundingBox {
            width,
            height,
            center,
            ..
        } => {
            writeln!(
                f,
                "      box {:.2} x {:.2} centered at ({:.2}, {:.2}, {:.2})",
                width, height, center[0], center[1], center[2]
            )
        }
        RegionGeometry::Ruler { endpoints } => {
            writeln!(
                f,
                "      ruler ({:.2}, {:.2}, {:.2}) - ({:.2}, {:.2}, {:.2})",
                endpoints[0][0],
                endpoints[0][1],
                endpoints[0][2],
                endpoints[1][0],
                endpoints[1][1],
                endpoints[1][2]
            )
        }
    }
}

/// Renders a table with columns padded to their widest cell
fn write_table(f: &mut fmt::Formatter<'_>, table: &TableSpec) -> fmt::Result {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.name.len()).collect();
    for row in &table.rows {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() {
                widths[index] = widths[index].max(cell.len());
            }
        }
    }

    for (index, column) in table.columns.iter().enumerate() {
        if index > 0 {
            write!(f, "  ")?;
        }
        write!(f, "{:<width$}", column.name, width = widths[index])?;
    }
    writeln!(f)?;

    for (index, width) in widths.iter().enumerate() {
        if index > 0 {
            write!(f, "  ")?;
        }
        write!(f, "{}", "-".repeat(*width))?;
    }
    writeln!(f)?;

    for row in &table.rows {
        for (index, cell) in row.iter().enumerate() {
            if index > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{:<width$}", cell, width = widths[index])?;
        }
        writeln!(f)?;
    }
    Ok(())
}
