use std::sync::Arc;
use std::time::Duration;

use callwatch_core::{Aggregator, ReportRow, render_report};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::sink::ReportSink;

/// Spawn the periodic reporting task for one session. The first tick fires
/// immediately (it no-ops until something has been recorded); ticks are
/// wall-clock paced and a tick that is still running when the next is due
/// is skipped, keeping reporter execution serialized.
pub(crate) fn spawn(
    aggregator: Arc<Aggregator>,
    sink: Arc<dyn ReportSink>,
    cycle: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(cycle);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => run_tick(&aggregator, sink.as_ref()),
            }
        }
        debug!("reporter stopped");
    })
}

/// One snapshot-and-render cycle. Quiet intervals produce no output at all,
/// whether the aggregator is empty or merely saw no activity.
pub(crate) fn run_tick(aggregator: &Aggregator, sink: &dyn ReportSink) {
    if aggregator.is_empty() {
        return;
    }
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let rows: Vec<ReportRow> = aggregator
        .drain()
        .into_iter()
        .map(|(identity, cell)| ReportRow { identity, cell })
        .collect();
    if rows.is_empty() {
        return;
    }
    let report = render_report(&timestamp, &rows);
    if let Err(err) = sink.emit(&report) {
        warn!(error = %err, "report delivery failed");
    }
}
