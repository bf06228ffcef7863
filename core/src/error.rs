use thiserror::Error;

/// Result type for srcat operations
pub type Result<T> = std::result::Result<T, SrcatError>;

/// Error types for srcat operations
#[derive(Error, Debug)]
pub enum SrcatError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Invalid element value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A cross-referenced instance could not be located
    #[error("Referenced instance not found: {0}")]
    MissingReference(String),

    /// Generic extraction error
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    /// External structured reader failure
    #[error("Structured reader error: {0}")]
    ReaderError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON side-file error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// Helper conversions
impl From<String> for SrcatError {
    fn from(s: String) -> Self {
        SrcatError::ExtractionError(s)
    }
}

impl From<&str> for SrcatError {
    fn from(s: &str) -> Self {
        SrcatError::ExtractionError(s.to_string())
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for SrcatError {
    fn from(e: dicom_object::ReadError) -> Self {
        SrcatError::DicomError(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for SrcatError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        SrcatError::InvalidValue(format!("{}", e))
    }
}
