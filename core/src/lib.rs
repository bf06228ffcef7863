pub mod api;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod fallback;
pub mod lookup;
pub mod projection;
pub mod types;

pub use api::{GroupGeometry, LoadedReport, ReportDescriptor, ReportLoader};
pub use cli::report::TextReport;
pub use error::{Result, SrcatError};
pub use types::*;
