//! This crate reacts to audit events describing an attempt to attach or
//! modify an IAM policy and determines whether the policy grants access to
//! resources outside an approved boundary:
//! - candidate Allow statements are extracted from the policy document
//! - each statement is simulated against the IAM policy simulator, one call
//!   in flight at a time
//! - per-statement verdicts are aggregated into a truncation-aware report
//! - findings are delivered as SNS notifications
//!
//! Event-source subscription and the notification transport are external
//! collaborators; the unit of work is one event in, zero-or-more
//! notifications out, and a `Result` back to the invoking runtime.

mod aggregate;
mod aws;
mod config;
mod dispatch;
mod error;
mod extraction;
mod filter;
mod handler;
mod types;

// Re-exports for a small, focused public API
pub use aggregate::{aggregate, compose_notices, resolve_target_resource};
pub use aws::simulator::IamPolicySimulator;
pub use aws::sns::SnsNotifier;
pub use config::{Config, NOTIFICATION_TOPIC_VAR, PRINCIPAL_REGEX_VAR};
pub use dispatch::{run_simulations, PolicyOracle};
pub use error::{SimulatorError, SimulatorResult};
pub use extraction::extract_requests;
pub use filter::PrincipalFilter;
pub use handler::{Notifier, PolicySimulator};
pub use types::{
    AuditEvent, EvalDecision, Evaluation, EventDetail, Notice, Outcome, PolicyDocument,
    Report, RequestParameters, SessionIssuer, SimulationRequest, SimulationResult,
    Statement, StringOrList, UserIdentity,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_sample_policy() {
        let policy = r#"{
            "Statement": [
                {"Effect": "Allow", "Action": "s3:GetObject", "Resource": ["arn:aws:s3:::bucket/*"]}
            ]
        }"#;
        let requests = extract_requests(policy, "arn:aws:iam::123:role/admin")
            .expect("should extract");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].action_names, vec!["s3:GetObject"]);
    }
}
