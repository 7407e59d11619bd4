use std::sync::Arc;

use anyhow::Result;
use callwatch_core::{InvocationToken, InvocationTracker, OperationIdentity};

use crate::pattern::CompiledPattern;

/// Attach request handed to the instrumentation engine: the compiled
/// patterns plus the flags the engine needs. Subtype instrumentation is the
/// engine's business; it knows the class hierarchy, this crate does not.
#[derive(Clone, Debug)]
pub struct ProbeSpec {
    pub pattern: CompiledPattern,
    pub include_subtypes: bool,
}

/// Opaque handle identifying one attached probe, used to detach it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProbeHandle(pub u64);

/// What the engine reports back from a successful attach.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttachOutcome {
    pub handle: ProbeHandle,
    pub matched_classes: usize,
    pub matched_methods: usize,
}

/// Boundary to the instrumentation engine that intercepts live invocations
/// and delivers begin/end advice.
pub trait ProbeEngine: Send + Sync {
    fn attach(&self, spec: ProbeSpec, listener: Arc<dyn AdviceListener>) -> Result<AttachOutcome>;
    fn detach(&self, handle: ProbeHandle);
}

/// One logical invocation as seen by the engine. The context is stable for
/// the invocation's duration and is the begin/end correlation key, so
/// nested and concurrent invocations never cross wires.
#[derive(Clone, Debug)]
pub struct AdviceContext {
    token: InvocationToken,
    identity: OperationIdentity,
}

impl AdviceContext {
    pub fn open(identity: OperationIdentity) -> Self {
        Self {
            token: InvocationToken::next(),
            identity,
        }
    }

    pub fn token(&self) -> InvocationToken {
        self.token
    }

    pub fn identity(&self) -> &OperationIdentity {
        &self.identity
    }
}

/// Advice delivered by the engine for each intercepted invocation. An
/// invocation that returns (including void) ends with `succeeded = true`;
/// one that raises ends with `succeeded = false`. Exactly one end fires per
/// completed invocation.
pub trait AdviceListener: Send + Sync {
    fn on_begin(&self, ctx: &AdviceContext);
    fn on_end(&self, ctx: &AdviceContext, succeeded: bool);
}

/// The session's listener: timestamps begins and feeds completed outcomes
/// through the tracker into the aggregator.
pub(crate) struct MonitorAdvice {
    tracker: Arc<InvocationTracker>,
}

impl MonitorAdvice {
    pub(crate) fn new(tracker: Arc<InvocationTracker>) -> Self {
        Self { tracker }
    }
}

impl AdviceListener for MonitorAdvice {
    fn on_begin(&self, ctx: &AdviceContext) {
        self.tracker.begin(ctx.token());
    }

    fn on_end(&self, ctx: &AdviceContext, succeeded: bool) {
        self.tracker.end(ctx.token(), ctx.identity().clone(), succeeded);
    }
}
