//! Oracle adapter over the IAM `SimulatePrincipalPolicy` API.

use crate::dispatch::PolicyOracle;
use crate::error::{SimulatorError, SimulatorResult};
use crate::types::{EvalDecision, Evaluation, SimulationRequest, SimulationResult};
use async_trait::async_trait;
use aws_sdk_iam::Client as IamClient;

pub struct IamPolicySimulator {
    client: IamClient,
}

impl IamPolicySimulator {
    pub fn new(client: IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PolicyOracle for IamPolicySimulator {
    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> SimulatorResult<SimulationResult> {
        let response = self
            .client
            .simulate_principal_policy()
            .policy_source_arn(&request.principal_arn)
            .set_action_names(Some(request.action_names.clone()))
            .set_resource_arns(Some(request.resource_names.clone()))
            .send()
            .await
            .map_err(|e| {
                SimulatorError::Oracle(format!("SimulatePrincipalPolicy failed: {e:?}"))
            })?;

        let mut evaluations = Vec::new();
        for result in response.evaluation_results() {
            let decision = match result.eval_decision().as_str() {
                "allowed" => EvalDecision::Allowed,
                "explicitDeny" => EvalDecision::ExplicitDeny,
                // The simulator reports an implicit denial for actions the
                // candidate policy simply does not grant.
                "implicitDeny" | "denied" => EvalDecision::Denied,
                other => {
                    return Err(SimulatorError::Oracle(format!(
                        "unexpected evaluation decision {other:?}"
                    )))
                }
            };
            evaluations.push(Evaluation {
                resource_name: result
                    .eval_resource_name()
                    .unwrap_or_default()
                    .to_string(),
                decision,
            });
        }

        Ok(SimulationResult {
            is_truncated: response.is_truncated(),
            evaluations,
        })
    }
}
