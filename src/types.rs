//! Data model for the policy-simulation pipeline: the inbound audit event,
//! the parsed policy document, simulation requests/results, and the report.
//!
//! All of these are request-scoped: created and dropped within a single
//! event-processing invocation, never shared across invocations.

use serde::{Deserialize, Serialize};

/// Audit record describing an attempt to attach or modify an IAM policy,
/// as delivered by the event source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditEvent {
    pub detail: EventDetail,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    /// Present when the underlying IAM call itself failed; processing
    /// short-circuits and no simulation is performed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub user_identity: UserIdentity,
    pub request_parameters: RequestParameters,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Identity that performed the call. Named in notifications.
    pub arn: String,
    /// Role whose policy is being changed. Subject of simulation.
    pub session_issuer: SessionIssuer,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionIssuer {
    pub arn: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    /// Raw policy document JSON as submitted to IAM.
    pub policy_document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
}

/// Parsed form of `RequestParameters::policy_document`.
///
/// A document with zero statements is valid and yields zero simulation
/// calls, not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyDocument {
    #[serde(rename = "Statement")]
    pub statement: Vec<Statement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Statement {
    #[serde(rename = "Effect")]
    pub effect: String,
    #[serde(rename = "Action", default)]
    pub action: Option<StringOrList>,
    #[serde(rename = "Resource", default)]
    pub resource: Option<StringOrList>,
}

/// IAM policy fields such as `Action` and `Resource` accept either a bare
/// string or an array of strings. This makes the normalization explicit
/// instead of juggling JSON value types inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Single(String),
    List(Vec<String>),
}

impl StringOrList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::Single(value) => vec![value],
            StringOrList::List(values) => values,
        }
    }
}

/// One call to the policy simulation oracle, derived from one statement
/// that carries at least one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub principal_arn: String,
    pub action_names: Vec<String>,
    pub resource_names: Vec<String>,
}

/// Authorization decision for a single resource, as reported by the oracle.
///
/// Only the plain `denied` decision marks a resource as a finding;
/// `explicitDeny` means the submitted policy itself forbids the access and
/// is not a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EvalDecision {
    #[serde(rename = "allowed")]
    Allowed,
    #[serde(rename = "denied")]
    Denied,
    #[serde(rename = "explicitDeny")]
    ExplicitDeny,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub resource_name: String,
    pub decision: EvalDecision,
}

/// Oracle response for one `SimulationRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// More results exist beyond the returned page. Paging is not
    /// implemented; this is surfaced as a warning notice instead.
    pub is_truncated: bool,
    pub evaluations: Vec<Evaluation>,
}

/// Aggregated verdict for one processed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub truncated: bool,
    /// Resources the oracle marked `denied` for the simulated principal.
    pub denied_matches: Vec<String>,
    /// ARN of the identity that performed the audited call.
    pub subject_principal: String,
    /// IAM entity the policy document is attached to (policy ARN when
    /// present, otherwise role name, otherwise empty).
    pub target_resource: String,
}

/// One notification item produced from a `Report`.
#[derive(Debug, Clone)]
pub struct Notice {
    pub subject: String,
    pub summary: String,
    /// Copy of the triggering event, attached to finding notices so the
    /// receiver has the full context.
    pub event: Option<AuditEvent>,
}

/// Terminal value of one event-processing invocation.
#[derive(Debug)]
pub enum Outcome {
    /// The audited IAM call failed upstream; its error message is the
    /// outcome and no simulation was performed.
    UpstreamFailure(String),
    /// The session issuer did not match the configured principal filter.
    Skipped,
    Completed {
        report: Report,
        notices_sent: usize,
    },
}
