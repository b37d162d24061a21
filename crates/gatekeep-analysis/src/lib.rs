//! gatekeep-analysis: change-set scanning, coverage parsing, and the
//! enforcement layer (rules, gate engine, reporters, exit codes).

pub mod coverage;
pub mod enforcement;
pub mod scanner;
