//! Runtime configuration, loaded from the hosting environment.

use std::env;

/// Environment variable holding the principal filter expression.
pub const PRINCIPAL_REGEX_VAR: &str = "principalRegex";

/// Environment variable holding the SNS topic notifications are published to.
pub const NOTIFICATION_TOPIC_VAR: &str = "notificationTopicArn";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Case-insensitive regex tested against the session issuer ARN.
    /// Absent, empty, or the literal "none" (any case) disables filtering.
    pub principal_regex: Option<String>,
    /// Topic ARN for the SNS notification adapter.
    pub notification_topic_arn: Option<String>,
}

impl Config {
    /// Read configuration from the process environment. Missing variables
    /// are not an error here; validation happens where the value is used.
    pub fn from_env() -> Self {
        Self {
            principal_regex: env::var(PRINCIPAL_REGEX_VAR).ok(),
            notification_topic_arn: env::var(NOTIFICATION_TOPIC_VAR).ok(),
        }
    }
}
