//! Principal filter: decides whether the session issuer of an event is in
//! scope for simulation.

use crate::config::Config;
use crate::error::{SimulatorError, SimulatorResult};
use regex::{Regex, RegexBuilder};

/// Compiled once per configuration load; the configuration is static across
/// invocations, so the per-event cost is a single regex test.
#[derive(Debug, Clone)]
pub struct PrincipalFilter {
    pattern: Option<Regex>,
}

impl PrincipalFilter {
    pub fn from_config(config: &Config) -> SimulatorResult<Self> {
        Self::new(config.principal_regex.as_deref())
    }

    /// Build a filter from an optional expression. Absent, empty, or the
    /// literal "none" (any case) means no filtering: every principal is in
    /// scope. Anything else must compile as a case-insensitive regex.
    pub fn new(expression: Option<&str>) -> SimulatorResult<Self> {
        let expression = match expression {
            None => return Ok(Self { pattern: None }),
            Some(e) if e.is_empty() || e.eq_ignore_ascii_case("none") => {
                return Ok(Self { pattern: None })
            }
            Some(e) => e,
        };

        let pattern = RegexBuilder::new(expression)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                SimulatorError::Config(format!("invalid regex {expression:?}: {e}"))
            })?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Partial (substring) match against the session issuer ARN. Pure and
    /// idempotent: the same ARN always yields the same decision.
    pub fn in_scope(&self, session_issuer_arn: &str) -> bool {
        match &self.pattern {
            None => true,
            Some(pattern) => pattern.is_match(session_issuer_arn),
        }
    }
}
