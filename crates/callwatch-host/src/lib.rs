pub mod boot;
pub mod config;
pub mod error;
pub mod pattern;
pub mod probe;
pub mod session;
pub mod sink;

mod reporter;

pub use config::MonitorConfig;
pub use error::ActivateError;
pub use pattern::CompiledPattern;
pub use probe::{AdviceContext, AdviceListener, AttachOutcome, ProbeEngine, ProbeHandle, ProbeSpec};
pub use session::{Monitor, MonitorSession};
pub use sink::{ReportSink, StdoutSink};
