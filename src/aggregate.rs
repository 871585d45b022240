//! Verdict aggregation: merges simulation results into a report and
//! composes the notification items it calls for.

use crate::types::{
    AuditEvent, EvalDecision, Notice, Report, RequestParameters, SimulationResult,
};

/// Merge the ordered simulation results into a single report.
///
/// `truncated` is set when any result was truncated; it is a coverage
/// warning only and never interrupts matching. A resource is a match when
/// its decision is exactly `denied` — `explicitDeny` and `allowed` never
/// count.
pub fn aggregate(
    results: &[SimulationResult],
    subject_principal: &str,
    target_resource: &str,
) -> Report {
    let truncated = results.iter().any(|result| result.is_truncated);

    let mut denied_matches = Vec::new();
    for result in results {
        for evaluation in &result.evaluations {
            if evaluation.decision == EvalDecision::Denied {
                denied_matches.push(evaluation.resource_name.clone());
            }
        }
    }

    Report {
        truncated,
        denied_matches,
        subject_principal: subject_principal.to_string(),
        target_resource: target_resource.to_string(),
    }
}

/// Identify the IAM entity the policy document was attached to: the policy
/// ARN when present, otherwise the role name. When neither is populated the
/// identifier is left empty; that is not an error.
pub fn resolve_target_resource(parameters: &RequestParameters) -> String {
    parameters
        .policy_arn
        .clone()
        .or_else(|| parameters.role_name.clone())
        .unwrap_or_default()
}

/// Compose the notification items for a report: a truncation warning when
/// coverage may be incomplete, and a single combined finding notice listing
/// every matched resource. Both may apply to the same invocation; neither
/// applying means nothing is emitted.
pub fn compose_notices(report: &Report, event: &AuditEvent) -> Vec<Notice> {
    let mut notices = Vec::new();

    if report.truncated {
        notices.push(Notice {
            subject: "Principal policy rule results truncated".to_string(),
            summary: "Principal policy rule results were truncated. Paging is not currently supported.".to_string(),
            event: None,
        });
    }

    if !report.denied_matches.is_empty() {
        let subject = format!(
            "Principal {} allowed access to restricted resource via {}",
            report.subject_principal, report.target_resource
        );
        let summary = format!("{}: {}", subject, report.denied_matches.join(", "));
        notices.push(Notice {
            subject,
            summary,
            event: Some(event.clone()),
        });
    }

    notices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventDetail, Evaluation, SessionIssuer, UserIdentity};

    const PRINCIPAL: &str = "arn:aws:sts::123:assumed-role/admin/session";

    fn result(truncated: bool, evaluations: Vec<(&str, EvalDecision)>) -> SimulationResult {
        SimulationResult {
            is_truncated: truncated,
            evaluations: evaluations
                .into_iter()
                .map(|(resource, decision)| Evaluation {
                    resource_name: resource.to_string(),
                    decision,
                })
                .collect(),
        }
    }

    fn event(policy_arn: Option<&str>, role_name: Option<&str>) -> AuditEvent {
        AuditEvent {
            detail: EventDetail {
                error_code: None,
                error_message: None,
                user_identity: UserIdentity {
                    arn: PRINCIPAL.to_string(),
                    session_issuer: SessionIssuer {
                        arn: "arn:aws:iam::123:role/admin".to_string(),
                    },
                },
                request_parameters: RequestParameters {
                    policy_document: "{}".to_string(),
                    policy_arn: policy_arn.map(String::from),
                    role_name: role_name.map(String::from),
                    policy_name: None,
                },
            },
        }
    }

    #[test]
    fn test_only_exact_denied_decision_matches() {
        let results = vec![result(
            false,
            vec![
                ("arn:aws:s3:::open", EvalDecision::Allowed),
                ("arn:aws:s3:::blocked", EvalDecision::Denied),
                ("arn:aws:s3:::forbidden", EvalDecision::ExplicitDeny),
            ],
        )];
        let report = aggregate(&results, PRINCIPAL, "worker");
        assert_eq!(report.denied_matches, vec!["arn:aws:s3:::blocked"]);
        assert!(!report.truncated);
    }

    #[test]
    fn test_matches_collected_across_results() {
        let results = vec![
            result(false, vec![("arn:aws:s3:::a", EvalDecision::Denied)]),
            result(false, vec![("arn:aws:s3:::b", EvalDecision::Denied)]),
        ];
        let report = aggregate(&results, PRINCIPAL, "worker");
        assert_eq!(report.denied_matches, vec!["arn:aws:s3:::a", "arn:aws:s3:::b"]);
    }

    #[test]
    fn test_any_truncated_result_marks_report_truncated() {
        let results = vec![
            result(false, vec![]),
            result(true, vec![]),
            result(false, vec![]),
        ];
        let report = aggregate(&results, PRINCIPAL, "worker");
        assert!(report.truncated);
        assert!(report.denied_matches.is_empty());
    }

    #[test]
    fn test_empty_results_yield_empty_report() {
        let report = aggregate(&[], PRINCIPAL, "worker");
        assert!(!report.truncated);
        assert!(report.denied_matches.is_empty());
    }

    #[test]
    fn test_target_resource_prefers_policy_arn() {
        let with_both = event(Some("arn:aws:iam::123:policy/limits"), Some("worker"));
        assert_eq!(
            resolve_target_resource(&with_both.detail.request_parameters),
            "arn:aws:iam::123:policy/limits"
        );

        let role_only = event(None, Some("worker"));
        assert_eq!(
            resolve_target_resource(&role_only.detail.request_parameters),
            "worker"
        );

        let neither = event(None, None);
        assert_eq!(resolve_target_resource(&neither.detail.request_parameters), "");
    }

    #[test]
    fn test_no_notices_when_nothing_to_report() {
        let report = aggregate(&[], PRINCIPAL, "worker");
        let notices = compose_notices(&report, &event(None, Some("worker")));
        assert!(notices.is_empty());
    }

    #[test]
    fn test_finding_notice_lists_all_matches_and_attaches_event() {
        let results = vec![result(
            false,
            vec![
                ("arn:aws:s3:::bucket/*", EvalDecision::Denied),
                ("arn:aws:sqs:us-east-1:123:queue", EvalDecision::Denied),
            ],
        )];
        let report = aggregate(&results, PRINCIPAL, "worker");
        let notices = compose_notices(&report, &event(None, Some("worker")));

        assert_eq!(notices.len(), 1);
        assert!(notices[0].subject.contains(PRINCIPAL));
        assert!(notices[0].subject.contains("worker"));
        assert!(notices[0]
            .summary
            .contains("arn:aws:s3:::bucket/*, arn:aws:sqs:us-east-1:123:queue"));
        assert!(notices[0].event.is_some());
    }

    #[test]
    fn test_truncation_and_finding_notices_can_coexist() {
        let results = vec![result(true, vec![("arn:aws:s3:::bucket/*", EvalDecision::Denied)])];
        let report = aggregate(&results, PRINCIPAL, "worker");
        let notices = compose_notices(&report, &event(None, Some("worker")));

        assert_eq!(notices.len(), 2);
        assert!(notices[0].subject.contains("truncated"));
        assert!(notices[0].event.is_none());
        assert!(notices[1].subject.contains("restricted resource"));
    }
}
