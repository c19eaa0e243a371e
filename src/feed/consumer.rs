use std::sync::Arc;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::{Stream, StreamExt};
use tracing::info;

use crate::feed::board::{ApplyOutcome, FeedUpdate, SessionBoard};
use crate::model::attendance::Instant;
use crate::settings::SettingsStore;

pub type FeedSender = UnboundedSender<FeedUpdate>;

pub fn channel() -> (FeedSender, UnboundedReceiver<FeedUpdate>) {
    mpsc::unbounded()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    pub applied: usize,
    pub stale: usize,
}

/// Drains feed updates one at a time until every sender is gone.
///
/// Each update re-derives its own key only; settings are snapshotted per
/// update so a configuration swap applies from the next arrival on.
pub async fn run_consumer<S, C>(
    mut updates: S,
    board: Arc<SessionBoard>,
    settings: Arc<SettingsStore>,
    clock: C,
) -> ConsumerStats
where
    S: Stream<Item = FeedUpdate> + Unpin,
    C: Fn() -> Instant,
{
    let mut stats = ConsumerStats::default();
    while let Some(update) = updates.next().await {
        match board.apply(update, &settings.snapshot(), &clock()) {
            ApplyOutcome::Applied { .. } => stats.applied += 1,
            ApplyOutcome::Stale { .. } => stats.stale += 1,
        }
    }
    info!(
        applied = stats.applied,
        stale = stats.stale,
        "Attendance feed closed"
    );
    stats
}
