//! Enforcement layer: turns the change set and coverage artifact into a
//! pass/fail verdict.
//!
//! Subsystems:
//! - `rules`: the `GateRule` capability and the built-in rules
//! - `engine`: ordered, isolated rule evaluation and aggregation
//! - `reporters`: text, JSON, and JUnit XML renderings of a verdict
//! - `exit`: verdict to process exit code mapping

pub mod engine;
pub mod exit;
pub mod reporters;
pub mod rules;
pub mod types;

pub use engine::GateEngine;
pub use types::{Finding, GateVerdict, RuleResult, Severity};
