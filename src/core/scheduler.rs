//! # Scheduler
//!
//! Runs `Effect::Schedule` requests: waits on a tokio timer, then sends the
//! action back to the event loop over a channel.
//!
//! Every task is guarded by a child of one root [`CancellationToken`]. Dropping
//! the scheduler (or calling [`Scheduler::cancel_all`]) cancels the root, so no
//! timer outlives the UI that asked for it.

use std::sync::mpsc;
use std::time::Duration;

use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::core::action::Action;

/// Handle to one pending delivery.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    token: CancellationToken,
}

impl ScheduledTask {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

pub struct Scheduler {
    tx: mpsc::Sender<Action>,
    root: CancellationToken,
}

impl Scheduler {
    pub fn new(tx: mpsc::Sender<Action>) -> Self {
        Self {
            tx,
            root: CancellationToken::new(),
        }
    }

    /// Deliver `action` after `delay` unless cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, delay: Duration, action: Action) -> ScheduledTask {
        let token = self.root.child_token();
        let task_token = token.clone();
        let tx = self.tx.clone();

        debug!("Scheduling {:?} in {:?}", action, delay);
        tokio::spawn(async move {
            tokio::select! {
                biased;

                _ = task_token.cancelled() => {
                    debug!("Scheduled action cancelled: {:?}", action);
                }

                _ = tokio::time::sleep(delay) => {
                    if tx.send(action).is_err() {
                        warn!("Failed to deliver scheduled action: receiver dropped");
                    }
                }
            }
        });

        ScheduledTask { token }
    }

    /// Cancel every pending task. Later `schedule` calls are cancelled immediately.
    pub fn cancel_all(&self) {
        self.root.cancel();
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing_cleared() -> Action {
        Action::TypingCleared {
            conversation_id: "1".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_after_delay_not_before() {
        let (tx, rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);
        scheduler.schedule(Duration::from_secs(2), typing_cleared());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(typing_cleared()));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_never_delivers() {
        let (tx, rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);
        let task = scheduler.schedule(Duration::from_secs(1), typing_cleared());

        task.cancel();
        assert!(task.is_cancelled());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_stops_everything() {
        let (tx, rx) = mpsc::channel();
        let scheduler = Scheduler::new(tx);
        let first = scheduler.schedule(Duration::from_secs(1), typing_cleared());
        let second = scheduler.schedule(Duration::from_secs(2), Action::Quit);

        scheduler.cancel_all();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(first.is_cancelled() && second.is_cancelled());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_scheduler_cancels_pending() {
        let (tx, rx) = mpsc::channel();
        let task = {
            let scheduler = Scheduler::new(tx);
            scheduler.schedule(Duration::from_secs(1), typing_cleared())
        };
        assert!(task.is_cancelled());
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_receiver_is_not_fatal() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let scheduler = Scheduler::new(tx);
        scheduler.schedule(Duration::from_millis(10), typing_cleared());
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
