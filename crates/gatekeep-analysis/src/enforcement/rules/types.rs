//! Rule capability and the input handed to every rule.

use gatekeep_core::errors::RuleError;
use gatekeep_core::GateConfig;

use crate::enforcement::types::RuleResult;
use crate::scanner::ChangeSetScan;

/// Everything a rule may look at. Built once per run and shared read-only.
///
/// Rules see the change set only through the scan, so every rule agrees on
/// which paths are schema files, migrations, and marker candidates.
#[derive(Debug, Clone, Copy)]
pub struct GateInput<'a> {
    pub config: &'a GateConfig,
    pub scan: &'a ChangeSetScan,
}

impl<'a> GateInput<'a> {
    pub fn new(config: &'a GateConfig, scan: &'a ChangeSetScan) -> Self {
        Self { config, scan }
    }
}

/// One independent check contributing to the verdict.
///
/// Rules hold no mutable state: the same input always yields the same result.
/// An `Err` is not a crash; the engine turns it into a failing result.
pub trait GateRule: Send + Sync {
    /// Stable identifier used in reports and `enabled_rules`.
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn evaluate(&self, input: &GateInput<'_>) -> Result<RuleResult, RuleError>;
}
