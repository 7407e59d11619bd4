use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use dashmap::DashMap;

use crate::aggregator::Aggregator;
use crate::cell::Outcome;
use crate::identity::OperationIdentity;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Correlates the begin and end advice of one logical invocation. Unique
/// per process; invocations may nest or run on any number of threads, so
/// the token, not the thread, is the correlation key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InvocationToken(u64);

impl InvocationToken {
    pub fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// Pairs begin advice with its matching end advice and feeds the measured
/// outcome into the aggregator.
#[derive(Debug)]
pub struct InvocationTracker {
    aggregator: Arc<Aggregator>,
    inflight: DashMap<InvocationToken, Instant>,
}

impl InvocationTracker {
    pub fn new(aggregator: Arc<Aggregator>) -> Self {
        Self {
            aggregator,
            inflight: DashMap::new(),
        }
    }

    pub fn begin(&self, token: InvocationToken) {
        self.inflight.insert(token, Instant::now());
    }

    /// Complete an invocation. An end with no recorded begin (tracking
    /// attached mid-invocation) contributes nothing; it is not an error.
    pub fn end(&self, token: InvocationToken, identity: OperationIdentity, succeeded: bool) {
        let Some((_, started)) = self.inflight.remove(&token) else {
            return;
        };
        let outcome = Outcome {
            succeeded,
            elapsed: started.elapsed(),
        };
        self.aggregator.merge(identity, outcome);
    }

    pub fn inflight(&self) -> usize {
        self.inflight.len()
    }
}
