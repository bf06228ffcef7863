use std::fmt;

/// Graphic type of a spatial coordinate content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GraphicType {
    Point,
    Polyline,
}

impl GraphicType {
    /// Parses the GraphicType attribute value
    ///
    /// Returns `None` for graphic types outside the supported set
    /// (MULTIPOINT, CIRCLE, ELLIPSE, ...).
    pub fn from_dicom(s: &str) -> Option<Self> {
        match s.trim() {
            "POINT" => Some(GraphicType::Point),
            "POLYLINE" => Some(GraphicType::Polyline),
            _ => None,
        }
    }
}

impl fmt::Display for GraphicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicType::Point => write!(f, "POINT"),
            GraphicType::Polyline => write!(f, "POLYLINE"),
        }
    }
}

/// Interpretation of pixel origins in image-plane graphic data
///
/// Governs whether (column, row) pairs are relative to an individual
/// frame or to the total pixel matrix of the volume. Absent attribute
/// defaults to `Volume`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum PixelOrigin {
    Frame,
    #[default]
    Volume,
}

impl PixelOrigin {
    pub fn from_dicom(s: &str) -> Self {
        match s.trim() {
            "FRAME" => PixelOrigin::Frame,
            _ => PixelOrigin::Volume,
        }
    }
}

/// Coordinate space the graphic data is expressed in
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum CoordinateSpace {
    /// (column, row) pairs in image-plane units
    ImagePlane { pixel_origin: PixelOrigin },
    /// (x, y, z) triplets in the given frame of reference
    FrameOfReference { uid: String },
}

/// Which content-tree construct the region was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RegionSource {
    /// An "Image Region" SCOORD/SCOORD3D item
    ImageRegion,
    /// The polyline nested under a length measurement (ruler)
    LengthRuler,
}

/// Geometric region attached to a measurement group
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RoiRegion {
    pub graphic_type: GraphicType,
    pub space: CoordinateSpace,
    /// Raw graphic data: (col, row) pairs or (x, y, z) triplets
    pub graphic_data: Vec<f64>,
    pub source: RegionSource,
    /// SOP instance of the source image the coordinates refer to
    pub referenced_sop_instance_uid: Option<String>,
    /// Series of the referenced source image, when known from evidence
    pub referenced_series_instance_uid: Option<String>,
}

impl RoiRegion {
    /// Number of coordinate tuples in the graphic data
    pub fn point_count(&self) -> usize {
        match self.space {
            CoordinateSpace::ImagePlane { .. } => self.graphic_data.len() / 2,
            CoordinateSpace::FrameOfReference { .. } => self.graphic_data.len() / 3,
        }
    }
}
