//! Core type definitions for structured-report measurement extraction
//!
//! This module provides the fundamental types used throughout the srcat library:
//! - [`CodedEntry`]: A coded concept (scheme designator, code value, code meaning)
//! - [`MeasurementGroup`] / [`MeasurementItem`]: One tracked finding and its numeric measurements
//! - [`RoiRegion`]: The geometric region attached to a measurement group
//! - [`MeasurementReport`]: A fully parsed TID1500 report
//! - [`ReferenceSet`]: Classified series references gathered from report evidence
//! - [`TableSpec`]: The tabular projection handed to the presentation layer

mod code;
mod measurement;
mod references;
mod report;
mod roi;
mod table;

pub use code::CodedEntry;
pub use measurement::{MeasurementGroup, MeasurementItem, QualitativeEvaluation};
pub use references::ReferenceSet;
pub use report::{MeasurementReport, ReportLink, ReportScope};
pub use roi::{CoordinateSpace, GraphicType, PixelOrigin, RegionSource, RoiRegion};
pub use table::{ColumnDef, TableSpec};
