use crate::error::{Result, SrcatError};
use crate::types::{CoordinateSpace, GraphicType, MeasurementGroup, RegionSource, RoiRegion};

/// Converts a patient-space (LPS) coordinate into the display (RAS)
/// convention
///
/// The single sign-flip point for the whole crate: x and y are negated,
/// z is kept.
pub fn lps_to_ras(p: [f64; 3]) -> [f64; 3] {
    [-p[0], -p[1], p[2]]
}

/// Plane geometry of one source image instance
///
/// `along_column` and `along_row` are the direction cosines along which
/// the column and row indices increase (the first and last three values
/// of ImageOrientationPatient); `pixel_spacing` is (row, column) as in
/// the DICOM attribute.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ImagePlane {
    pub position: [f64; 3],
    pub along_column: [f64; 3],
    pub along_row: [f64; 3],
    pub pixel_spacing: [f64; 2],
}

impl ImagePlane {
    /// Maps an image-plane (column, row) coordinate to patient space
    pub fn project(&self, column: f64, row: f64) -> [f64; 3] {
        let mut p = self.position;
        for axis in 0..3 {
            p[axis] += column * self.along_column[axis] * self.pixel_spacing[1]
                + row * self.along_row[axis] * self.pixel_spacing[0];
        }
        p
    }
}

/// Lookup collaborator resolving a source-image SOP instance to its
/// plane geometry
pub trait ImageGeometryLookup {
    fn plane_for_instance(&self, sop_instance_uid: &str) -> Option<ImagePlane>;
}

/// Derived geometry of one measurement group, in display coordinates
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum RegionGeometry {
    /// A single marked location
    Point { position: [f64; 3] },
    /// Axis-aligned box derived from a four-point polyline
    BoundingBox {
        corners: [[f64; 2]; 4],
        width: f64,
        height: f64,
        center: [f64; 3],
    },
    /// A two-point distance measurement
    Ruler { endpoints: [[f64; 3]; 2] },
}

/// Computes the display-space geometry for a measurement group's region
///
/// Returns `Ok(None)` for groups without a region. A referenced source
/// image that cannot be resolved through the lookup is a hard failure
/// for every path; the caller decides whether to continue with the
/// remaining groups.
pub fn extract_geometry<P: ImageGeometryLookup>(
    group: &MeasurementGroup,
    planes: &P,
) -> Result<Option<RegionGeometry>> {
    let Some(region) = group.region.as_ref() else {
        return Ok(None);
    };

    let geometry = match (region.source, region.graphic_type, &region.space) {
        (RegionSource::LengthRuler, _, _) => ruler_geometry(region, planes)?,
        (_, GraphicType::Point, CoordinateSpace::FrameOfReference { .. }) => {
            point_geometry(region)?
        }
        (_, GraphicType::Point, CoordinateSpace::ImagePlane { .. }) => {
            planar_point_geometry(region, planes)?
        }
        (_, GraphicType::Polyline, _) => bounding_box_geometry(region, planes)?,
    };
    Ok(Some(geometry))
}

/// A 3D point in frame-of-reference coordinates: sign convention only
fn point_geometry(region: &RoiRegion) -> Result<RegionGeometry> {
    let data = expect_values(region, 3)?;
    Ok(RegionGeometry::Point {
        position: lps_to_ras([data[0], data[1], data[2]]),
    })
}

/// A 2D point on a referenced image, lifted into patient space
fn planar_point_geometry<P: ImageGeometryLookup>(
    region: &RoiRegion,
    planes: &P,
) -> Result<RegionGeometry> {
    let data = expect_values(region, 2)?;
    let plane = resolve_plane(region, planes)?;
    Ok(RegionGeometry::Point {
        position: lps_to_ras(plane.project(data[0], data[1])),
    })
}

/// Bounding box over a four-point polyline in image-plane units
///
/// Width, height and the in-plane center come from the min/max corner
/// coordinates; the depth of the center is the z-component of the
/// referenced image's position.
fn bounding_box_geometry<P: ImageGeometryLookup>(
    region: &RoiRegion,
    planes: &P,
) -> Result<RegionGeometry> {
    let data = expect_values(region, 8)?;
    let xs = [data[0], data[2], data[4], data[6]];
    let ys = [data[1], data[3], data[5], data[7]];

    let (min_x, max_x) = min_max(&xs);
    let (min_y, max_y) = min_max(&ys);
    let width = max_x - min_x;
    let height = max_y - min_y;

    let plane = resolve_plane(region, planes)?;
    let center = lps_to_ras([
        min_x + width / 2.0,
        min_y + height / 2.0,
        plane.position[2],
    ]);

    Ok(RegionGeometry::BoundingBox {
        corners: [
            [data[0], data[1]],
            [data[2], data[3]],
            [data[4], data[5]],
            [data[6], data[7]],
        ],
        width,
        height,
        center,
    })
}

/// Ruler endpoints reconstructed from (column, row) pairs through the
/// referenced image's plane geometry
fn ruler_geometry<P: ImageGeometryLookup>(
    region: &RoiRegion,
    planes: &P,
) -> Result<RegionGeometry> {
    let data = expect_values(region, 4)?;
    let plane = resolve_plane(region, planes)?;
    Ok(RegionGeometry::Ruler {
        endpoints: [
            lps_to_ras(plane.project(data[0], data[1])),
            lps_to_ras(plane.project(data[2], data[3])),
        ],
    })
}

fn resolve_plane<P: ImageGeometryLookup>(region: &RoiRegion, planes: &P) -> Result<ImagePlane> {
    let uid = region
        .referenced_sop_instance_uid
        .as_deref()
        .ok_or_else(|| SrcatError::MissingReference("no referenced source image".to_string()))?;
    planes
        .plane_for_instance(uid)
        .ok_or_else(|| SrcatError::MissingReference(uid.to_string()))
}

fn expect_values(region: &RoiRegion, count: usize) -> Result<&[f64]> {
    if region.graphic_data.len() != count {
        return Err(SrcatError::InvalidValue(format!(
            "expected {} graphic data values for {} region, got {}",
            count,
            region.graphic_type,
            region.graphic_data.len()
        )));
    }
    Ok(&region.graphic_data)
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}
