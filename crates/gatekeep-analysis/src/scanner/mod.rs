//! Scanner subsystem: classifies the paths of a change set.
//!
//! The scanner never reads file contents. Its only filesystem access is a
//! listing of the migrations directory.

pub mod scanner;
pub mod types;

pub use scanner::ChangeSetScanner;
pub use types::ChangeSetScan;
