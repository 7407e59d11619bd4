#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use callwatch_host::{AdviceListener, AttachOutcome, ProbeEngine, ProbeHandle, ProbeSpec, ReportSink};
use parking_lot::Mutex;

/// In-process stand-in for the instrumentation engine: counts matches
/// against a fixed operation inventory and hands the listener back out so
/// tests can drive advice by hand.
pub struct StubEngine {
    operations: Vec<(String, String)>,
    listener: Mutex<Option<Arc<dyn AdviceListener>>>,
    attaches: AtomicUsize,
    detaches: AtomicUsize,
}

impl StubEngine {
    pub fn new(operations: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            operations: operations
                .iter()
                .map(|(class, method)| (class.to_string(), method.to_string()))
                .collect(),
            listener: Mutex::new(None),
            attaches: AtomicUsize::new(0),
            detaches: AtomicUsize::new(0),
        })
    }

    pub fn listener(&self) -> Arc<dyn AdviceListener> {
        self.listener.lock().clone().expect("probe not attached")
    }

    pub fn attach_count(&self) -> usize {
        self.attaches.load(Ordering::SeqCst)
    }

    pub fn detach_count(&self) -> usize {
        self.detaches.load(Ordering::SeqCst)
    }
}

impl ProbeEngine for StubEngine {
    fn attach(&self, spec: ProbeSpec, listener: Arc<dyn AdviceListener>) -> Result<AttachOutcome> {
        self.attaches.fetch_add(1, Ordering::SeqCst);
        let matched: Vec<&(String, String)> = self
            .operations
            .iter()
            .filter(|(class, method)| {
                spec.pattern.matches_class(class) && spec.pattern.matches_method(method)
            })
            .collect();
        let classes: HashSet<&str> = matched.iter().map(|(class, _)| class.as_str()).collect();
        *self.listener.lock() = Some(listener);
        Ok(AttachOutcome {
            handle: ProbeHandle(1),
            matched_classes: classes.len(),
            matched_methods: matched.len(),
        })
    }

    fn detach(&self, _handle: ProbeHandle) {
        self.detaches.fetch_add(1, Ordering::SeqCst);
    }
}

/// Collects every emitted report for later assertion.
#[derive(Default)]
pub struct MemorySink {
    reports: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Drain everything emitted so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.reports.lock())
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, text: &str) -> Result<()> {
        self.reports.lock().push(text.to_string());
        Ok(())
    }
}

/// Give spawned tasks a chance to run between deterministic time steps.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Split one rendered table row into trimmed cell texts.
pub fn cells(line: &str) -> Vec<String> {
    line.trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}
