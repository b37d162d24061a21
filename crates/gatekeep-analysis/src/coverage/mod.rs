//! Coverage artifact parsing (Cobertura-style XML).

pub mod parser;
pub mod types;

pub use parser::{parse_coverage_file, parse_coverage_str, LINE_RATE_ATTR};
pub use types::CoverageSummary;
