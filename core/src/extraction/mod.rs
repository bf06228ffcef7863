pub mod concepts;
pub mod geometry;
pub mod longitudinal;
pub mod recognition;
pub mod references;
pub mod report;
pub mod tags;

pub use concepts::{group_is_bounding_box, is_concept, ConceptKey};
pub use geometry::{extract_geometry, lps_to_ras, ImageGeometryLookup, ImagePlane, RegionGeometry};
pub use longitudinal::{discover_related, link_reports, report_sort_key, sort_reports};
pub use recognition::is_tid1500;
pub use references::resolve_references;
pub use report::parse_report;
