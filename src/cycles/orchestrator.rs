use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, warn};

use super::CycleRunner;
use crate::models::{CycleOutcome, CycleStats};

/// Runs independent cycles concurrently and collects every outcome
///
/// One cycle failing never cancels its siblings. With a deadline, cycles still
/// running when it passes are aborted and reported as timed out. Dropping the
/// batch future aborts every cycle still in flight.
pub struct CycleOrchestrator {
    runner: Arc<dyn CycleRunner>,
}

impl CycleOrchestrator {
    pub fn new(runner: Arc<dyn CycleRunner>) -> Self {
        Self { runner }
    }

    /// Run `cycle_count` cycles (ids `1..=cycle_count`) and wait for all of them
    pub async fn run_batch(&self, text: &str, cycle_count: usize) -> Vec<CycleOutcome> {
        self.run_batch_until(text, cycle_count, None).await
    }

    /// Like [`run_batch`](Self::run_batch), but stop waiting at `deadline`
    pub async fn run_batch_until(
        &self,
        text: &str,
        cycle_count: usize,
        deadline: Option<Instant>,
    ) -> Vec<CycleOutcome> {
        info!("Starting {} analysis cycles", cycle_count);
        let text: Arc<str> = Arc::from(text);

        // owned by this future: dropping it aborts the tasks
        let mut tasks = JoinSet::new();
        for cycle_id in 1..=cycle_count {
            let runner = Arc::clone(&self.runner);
            let text = Arc::clone(&text);
            tasks.spawn(async move {
                match AssertUnwindSafe(runner.run(&text, cycle_id)).catch_unwind().await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!("Cycle {} panicked", cycle_id);
                        CycleOutcome::failure(cycle_id, "cycle task ended abnormally: panicked")
                    }
                }
            });
        }

        let mut finished: BTreeMap<usize, CycleOutcome> = BTreeMap::new();
        let mut timed_out = false;
        loop {
            let joined = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        timed_out = true;
                        break;
                    }
                },
                None => tasks.join_next().await,
            };

            match joined {
                Some(Ok(outcome)) => {
                    finished.insert(outcome.cycle_id(), outcome);
                }
                Some(Err(e)) => warn!("Cycle task ended abnormally: {}", e),
                None => break,
            }
        }
        tasks.abort_all();

        let outcomes: Vec<CycleOutcome> = (1..=cycle_count)
            .map(|cycle_id| match finished.remove(&cycle_id) {
                Some(outcome) => outcome,
                None if timed_out => {
                    warn!("Cycle {} timed out", cycle_id);
                    CycleOutcome::failure(cycle_id, "timed out before completing")
                }
                None => CycleOutcome::failure(cycle_id, "cycle task ended abnormally"),
            })
            .collect();

        let stats = CycleStats::from_outcomes(&outcomes);
        info!(
            "Cycles finished: {} succeeded, {} failed",
            stats.successful, stats.failed
        );

        outcomes
    }
}
