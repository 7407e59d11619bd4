use std::io::Write;

use anyhow::Result;

/// Output boundary receiving rendered reports. Fire-and-forget from the
/// reporter's point of view: a failed emit is logged and the scheduler
/// keeps ticking. Successive emits from one session preserve their order.
pub trait ReportSink: Send + Sync {
    fn emit(&self, text: &str) -> Result<()>;
}

/// Writes reports to the process's stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&self, text: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
