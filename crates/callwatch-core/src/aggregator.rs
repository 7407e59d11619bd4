use std::sync::Arc;

use dashmap::DashMap;

use crate::cell::{Outcome, StatCell, StatHolder};
use crate::identity::OperationIdentity;

/// Concurrent mapping from operation identity to its stat holder.
///
/// Holders are created lazily, exactly once per identity, the first time
/// that identity completes an invocation; entries are never removed for the
/// life of the monitoring session. The map itself is only touched to look
/// up or insert holders; all counter mutation goes through the holder's
/// atomic swap, so merges never contend on the map.
#[derive(Debug, Default)]
pub struct Aggregator {
    cells: DashMap<OperationIdentity, Arc<StatHolder>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    /// Record one completed invocation. Racing first-use inserts for the
    /// same identity are resolved by the map: the loser adopts the winning
    /// holder, and both outcomes land in the same cell.
    pub fn merge(&self, identity: OperationIdentity, outcome: Outcome) {
        if let Some(holder) = self.cells.get(&identity) {
            holder.apply(&outcome);
            return;
        }
        let holder = self
            .cells
            .entry(identity)
            .or_insert_with(|| Arc::new(StatHolder::default()))
            .clone();
        holder.apply(&outcome);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Snapshot-and-reset every holder, returning the identities that saw
    /// activity since the previous drain. Each entry's interval closes at
    /// its own swap instant; iteration order carries no meaning.
    pub fn drain(&self) -> Vec<(OperationIdentity, StatCell)> {
        let mut captured = Vec::with_capacity(self.cells.len());
        for entry in self.cells.iter() {
            let cell = entry.value().take();
            if cell.total == 0 {
                continue;
            }
            captured.push((entry.key().clone(), cell));
        }
        captured
    }
}
