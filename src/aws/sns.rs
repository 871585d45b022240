//! Notification adapter that publishes notices to an SNS topic.

use crate::error::{SimulatorError, SimulatorResult};
use crate::handler::Notifier;
use crate::types::Notice;
use async_trait::async_trait;
use aws_sdk_sns::Client as SnsClient;

pub struct SnsNotifier {
    client: SnsClient,
    topic_arn: String,
}

impl SnsNotifier {
    pub fn new(client: SnsClient, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn notify(&self, notice: &Notice) -> SimulatorResult<()> {
        // Message body carries the summary and, for finding notices, a copy
        // of the triggering event.
        let body = serde_json::json!({
            "subject": notice.subject,
            "summary": notice.summary,
            "event": notice.event,
        });
        let message = serde_json::to_string(&body).map_err(|e| {
            SimulatorError::Notification(format!("failed to serialize notice: {e}"))
        })?;

        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(&notice.subject)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                SimulatorError::Notification(format!(
                    "failed to publish to {}: {e:?}",
                    self.topic_arn
                ))
            })?;
        Ok(())
    }
}
