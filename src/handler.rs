//! Service layer: wires the pipeline together and drives one event through
//! filter, extraction, dispatch, aggregation, and notification.

use crate::aggregate::{aggregate, compose_notices, resolve_target_resource};
use crate::aws::simulator::IamPolicySimulator;
use crate::aws::sns::SnsNotifier;
use crate::config::{Config, NOTIFICATION_TOPIC_VAR};
use crate::dispatch::{run_simulations, PolicyOracle};
use crate::error::{SimulatorError, SimulatorResult};
use crate::extraction::extract_requests;
use crate::filter::PrincipalFilter;
use crate::types::{AuditEvent, Notice, Outcome};
use async_trait::async_trait;
use log::{info, warn};

/// Notification channel seam. Delivery is fire-and-forget per item; the
/// production implementation publishes to SNS.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: &Notice) -> SimulatorResult<()>;
}

/// Holds the compiled filter and the external collaborators for the
/// lifetime of the process. Events are handled one at a time; no state is
/// shared across invocations.
pub struct PolicySimulator {
    filter: PrincipalFilter,
    oracle: Box<dyn PolicyOracle>,
    notifier: Box<dyn Notifier>,
}

impl PolicySimulator {
    /// Build the production service: loads AWS configuration via the
    /// default credential provider chain and wires the IAM simulator and
    /// SNS notification adapters.
    pub async fn new(config: &Config) -> SimulatorResult<Self> {
        let filter = PrincipalFilter::from_config(config)?;
        let topic_arn = config.notification_topic_arn.clone().ok_or_else(|| {
            SimulatorError::Config(format!("{NOTIFICATION_TOPIC_VAR} is not set"))
        })?;

        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;

        Ok(Self {
            filter,
            oracle: Box::new(IamPolicySimulator::new(aws_sdk_iam::Client::new(&aws_config))),
            notifier: Box::new(SnsNotifier::new(
                aws_sdk_sns::Client::new(&aws_config),
                topic_arn,
            )),
        })
    }

    /// Build a service with explicit collaborators. Used by tests and by
    /// hosts that manage their own clients.
    pub fn with_collaborators(
        filter: PrincipalFilter,
        oracle: Box<dyn PolicyOracle>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            filter,
            oracle,
            notifier,
        }
    }

    /// Process one audit event end to end.
    ///
    /// Two paths complete successfully without simulating: an event whose
    /// underlying IAM call already failed upstream, and an event whose
    /// session issuer is out of scope for the configured filter. Everything
    /// else either produces a report (with zero or more notices) or fails
    /// with a typed error.
    pub async fn handle_event(&self, event: &AuditEvent) -> SimulatorResult<Outcome> {
        if let Some(code) = &event.detail.error_code {
            let message = event
                .detail
                .error_message
                .clone()
                .unwrap_or_else(|| code.clone());
            info!("upstream call failed with {code}, skipping simulation");
            return Ok(Outcome::UpstreamFailure(message));
        }

        let session_issuer = &event.detail.user_identity.session_issuer.arn;
        if !self.filter.in_scope(session_issuer) {
            info!("skipping principal {session_issuer}");
            return Ok(Outcome::Skipped);
        }

        let requests = extract_requests(
            &event.detail.request_parameters.policy_document,
            session_issuer,
        )?;
        let results = run_simulations(self.oracle.as_ref(), &requests).await?;

        let target_resource = resolve_target_resource(&event.detail.request_parameters);
        let report = aggregate(&results, &event.detail.user_identity.arn, &target_resource);
        let notices = compose_notices(&report, event);

        // Every notice is attempted; the first delivery failure becomes the
        // invocation's outcome only after the rest have been issued.
        let mut first_failure = None;
        for notice in &notices {
            if let Err(e) = self.notifier.notify(notice).await {
                warn!("notification delivery failed: {e}");
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }
        if let Some(failure) = first_failure {
            return Err(failure);
        }

        Ok(Outcome::Completed {
            report,
            notices_sent: notices.len(),
        })
    }
}
