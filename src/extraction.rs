//! Statement extraction: turns a raw policy document into the ordered list
//! of simulation requests.

use crate::error::{SimulatorError, SimulatorResult};
use crate::types::{PolicyDocument, SimulationRequest, StringOrList};

/// Parse `policy_text` and produce one `SimulationRequest` per statement
/// that carries at least one action, in document order. Document order is
/// also submission order, which downstream aggregation depends on.
///
/// Actions are taken only from `Effect: Allow` statements with an `Action`
/// field; a Deny statement or an Allow statement without actions contributes
/// no request. Resources are normalized for every statement regardless of
/// effect, so a missing `Resource` field anywhere in the document is a
/// malformed-policy error even when the statement would produce no request.
/// Duplicate actions are tolerated and simply produce redundant work.
pub fn extract_requests(
    policy_text: &str,
    principal_arn: &str,
) -> SimulatorResult<Vec<SimulationRequest>> {
    let document: PolicyDocument = serde_json::from_str(policy_text).map_err(|e| {
        SimulatorError::MalformedPolicy(format!("failed to parse policy document: {e}"))
    })?;

    let mut requests = Vec::new();
    for statement in document.statement {
        let actions = if statement.effect == "Allow" {
            statement
                .action
                .map(StringOrList::into_vec)
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        let resources = statement
            .resource
            .ok_or_else(|| {
                SimulatorError::MalformedPolicy(
                    "statement is missing a Resource field".to_string(),
                )
            })?
            .into_vec();

        if actions.is_empty() {
            continue;
        }

        requests.push(SimulationRequest {
            principal_arn: principal_arn.to_string(),
            action_names: actions,
            resource_names: resources,
        });
    }
    Ok(requests)
}
