use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::prober::Signal;

/// Timer that reports a slow run once its budget is spent.
pub struct DeadlineGuard {
    budget: Duration,
}

impl DeadlineGuard {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    /// Spawn the timer. It sends [`Signal::Slow`] once, unless the race was
    /// already decided and the receiver is gone.
    pub fn spawn(self, done: mpsc::Sender<Signal>) -> JoinHandle<()> {
        tokio::spawn(async move {
            // budgets past tokio's timer range sleep until the far future
            sleep(self.budget).await;
            tracing::debug!(budget_secs = self.budget.as_secs(), "Deadline reached");
            let _ = done.send(Signal::Slow).await;
        })
    }
}
