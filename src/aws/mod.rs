//! AWS SDK adapters: the IAM policy-simulation oracle and the SNS
//! notification channel.

pub mod simulator;
pub mod sns;
