use thiserror::Error;

/// Activation-time rejections. Everything here surfaces before monitoring
/// begins; the merge and snapshot protocols themselves have no failure
/// states.
#[derive(Debug, Error)]
pub enum ActivateError {
    #[error("reporting cycle must be at least one second, got {cycle_secs}")]
    InvalidCycle { cycle_secs: u64 },
    #[error("class pattern must not be empty")]
    EmptyClassPattern,
    #[error("method pattern must not be empty")]
    EmptyMethodPattern,
    #[error("invalid regex pattern {pattern:?}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to attach probe")]
    Probe(#[source] anyhow::Error),
}
