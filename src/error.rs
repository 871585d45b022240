//! Error taxonomy. Every variant is a terminal outcome of the invocation;
//! there is no swallow-and-continue and no retry at this layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulatorError {
    /// The configured principal filter expression does not compile.
    #[error("Invalid principal filter configuration: {0}")]
    Config(String),
    /// The policy document is not valid JSON or is missing required shape.
    #[error("Malformed policy document: {0}")]
    MalformedPolicy(String),
    /// A simulation call failed; the remaining batch is aborted and no
    /// partial report is produced.
    #[error("Policy simulation failed: {0}")]
    Oracle(String),
    /// A notification could not be delivered. Surfaced only after every
    /// notice for the invocation has been attempted.
    #[error("Notification delivery failed: {0}")]
    Notification(String),
}

pub type SimulatorResult<T> = Result<T, SimulatorError>;
