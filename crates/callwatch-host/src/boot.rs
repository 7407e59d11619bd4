use anyhow::Result;

/// Initialise host-level tracing. Call once early; a second call fails
/// because the global subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
