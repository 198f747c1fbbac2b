//! Console output, logging setup, and probability report persistence

pub mod display;
pub mod logging;
pub mod report;

pub use display::{Color, ColorOutput, ProbabilityFormatter};
pub use logging::init_logging;
pub use report::{ProbabilityReport, ReportEntry, ReportWriter};
