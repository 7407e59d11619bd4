use std::sync::Arc;

use callwatch_core::{Aggregator, InvocationTracker};
use humantime::format_duration;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::MonitorConfig;
use crate::error::ActivateError;
use crate::pattern::CompiledPattern;
use crate::probe::{MonitorAdvice, ProbeEngine, ProbeHandle, ProbeSpec};
use crate::reporter;
use crate::sink::ReportSink;

/// Lifecycle controller. Owns the collaborator boundaries and turns a
/// validated configuration into a running monitoring session.
pub struct Monitor {
    engine: Arc<dyn ProbeEngine>,
    sink: Arc<dyn ReportSink>,
}

impl Monitor {
    pub fn new(engine: Arc<dyn ProbeEngine>, sink: Arc<dyn ReportSink>) -> Self {
        Self { engine, sink }
    }

    /// Validate the configuration, attach the probe, and start the periodic
    /// reporter. Rejections happen here, synchronously, before any
    /// monitoring side effect. Must be called from within a tokio runtime;
    /// the reporter task is spawned on it.
    pub fn activate(&self, config: MonitorConfig) -> Result<MonitorSession, ActivateError> {
        config.validate()?;
        let pattern = CompiledPattern::compile(&config)?;

        let aggregator = Arc::new(Aggregator::new());
        let tracker = Arc::new(InvocationTracker::new(Arc::clone(&aggregator)));
        let listener = Arc::new(MonitorAdvice::new(tracker));
        let spec = ProbeSpec {
            pattern,
            include_subtypes: config.include_subtypes,
        };
        let attached = self
            .engine
            .attach(spec, listener)
            .map_err(ActivateError::Probe)?;

        info!(
            class = %config.class_pattern,
            method = %config.method_pattern,
            cycle = %format_duration(config.cycle()),
            "monitoring activated"
        );
        let banner = format!(
            "result: matching-class={},matching-method={}.\n",
            attached.matched_classes, attached.matched_methods
        );
        if let Err(err) = self.sink.emit(&banner) {
            warn!(error = %err, "activation banner delivery failed");
        }

        let cancel = CancellationToken::new();
        let _ = reporter::spawn(
            Arc::clone(&aggregator),
            Arc::clone(&self.sink),
            config.cycle(),
            cancel.clone(),
        );

        Ok(MonitorSession {
            engine: Arc::clone(&self.engine),
            aggregator,
            cancel,
            probe: Mutex::new(Some(attached.handle)),
        })
    }
}

/// One running monitoring session. Sessions own all of their state, so any
/// number of them (distinct patterns, distinct cycles) coexist without
/// interference.
pub struct MonitorSession {
    engine: Arc<dyn ProbeEngine>,
    aggregator: Arc<Aggregator>,
    cancel: CancellationToken,
    probe: Mutex<Option<ProbeHandle>>,
}

impl MonitorSession {
    /// Tear monitoring down: stop the reporter and detach the probe. Safe
    /// to call any number of times; only the first call does anything. The
    /// aggregator keeps accepting in-flight merges until the session is
    /// dropped.
    pub fn deactivate(&self) {
        self.cancel.cancel();
        if let Some(handle) = self.probe.lock().take() {
            self.engine.detach(handle);
            info!("monitoring deactivated");
        }
    }

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn aggregator(&self) -> &Arc<Aggregator> {
        &self.aggregator
    }
}

impl std::fmt::Debug for MonitorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorSession")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl Drop for MonitorSession {
    fn drop(&mut self) {
        self.deactivate();
    }
}
