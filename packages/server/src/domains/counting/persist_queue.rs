//! Persist queue - fire-and-forget saves applied in order by one writer.
//!
//! Every state change enqueues a full snapshot. A single background task
//! drains the queue; when several snapshots are waiting only the newest is
//! written (last-write-wins), so a stale snapshot can never land after a
//! newer one. Save failures are logged and not retried.
//!
//! ```text
//! CountingGame ─enqueue(state)─► mpsc ─► writer task ─► StateGateway::save
//!                                        (coalesce)
//! ```

use std::sync::Mutex;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::domains::counting::models::GameState;
use crate::domains::counting::persistence::StateGateway;

enum PersistJob {
    Save(GameState),
    Flush(oneshot::Sender<()>),
}

pub struct PersistQueue {
    tx: Mutex<Option<mpsc::UnboundedSender<PersistJob>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl PersistQueue {
    /// Start the writer task. Must be called inside a tokio runtime.
    pub fn spawn(gateway: StateGateway) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_writer(gateway, rx));
        Self {
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Queue a snapshot for saving. Never blocks, never fails the caller.
    pub fn enqueue(&self, state: GameState) {
        if !self.send(PersistJob::Save(state)) {
            warn!("Persist queue is shut down, dropping state snapshot");
        }
    }

    /// Wait until every snapshot enqueued so far has been written (or failed).
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.send(PersistJob::Flush(ack_tx)) {
            let _ = ack_rx.await;
        }
    }

    /// Close the queue and wait for the final snapshot to be written.
    pub async fn shutdown(&self) {
        let tx = self.tx.lock().unwrap_or_else(|e| e.into_inner()).take();
        drop(tx);

        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                error!(error = %e, "Persist writer task failed");
            }
        }
    }

    fn send(&self, job: PersistJob) -> bool {
        let guard = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(tx) => tx.send(job).is_ok(),
            None => false,
        }
    }
}

async fn run_writer(gateway: StateGateway, mut rx: mpsc::UnboundedReceiver<PersistJob>) {
    while let Some(first) = rx.recv().await {
        let mut latest: Option<GameState> = None;
        let mut acks: Vec<oneshot::Sender<()>> = Vec::new();
        let mut skipped = 0usize;

        let mut absorb = |job: PersistJob| match job {
            PersistJob::Save(state) => {
                if latest.replace(state).is_some() {
                    skipped += 1;
                }
            }
            PersistJob::Flush(ack) => acks.push(ack),
        };

        absorb(first);
        while let Ok(job) = rx.try_recv() {
            absorb(job);
        }

        if let Some(state) = latest {
            match gateway.save(&state).await {
                Ok(()) => debug!(
                    key = %gateway.key(),
                    current_number = state.current_number,
                    coalesced = skipped,
                    "Saved game state"
                ),
                Err(e) => error!(key = %gateway.key(), error = %e, "Failed to save game state"),
            }
        }

        for ack in acks {
            let _ = ack.send(());
        }
    }
    debug!("Persist writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ChannelId;
    use crate::domains::counting::persistence::DEFAULT_STATE_KEY;
    use crate::kernel::test_dependencies::FailingStore;
    use crate::kernel::{BaseKeyValueStore, InMemoryStore};
    use std::sync::Arc;

    fn state(n: u64) -> GameState {
        GameState {
            channel_id: Some(ChannelId::new("c")),
            current_number: n,
            last_actor_id: None,
        }
    }

    #[tokio::test]
    async fn test_flush_waits_for_latest_snapshot() {
        let store = InMemoryStore::new();
        let gateway = StateGateway::new(Arc::new(store.clone()), DEFAULT_STATE_KEY);
        let queue = PersistQueue::spawn(gateway.clone());

        for n in 1..=20 {
            queue.enqueue(state(n));
        }
        queue.flush().await;

        assert_eq!(gateway.load().await.current_number, 20);
    }

    #[tokio::test]
    async fn test_shutdown_drains_pending_snapshot() {
        let store = InMemoryStore::new();
        let gateway = StateGateway::new(Arc::new(store.clone()), DEFAULT_STATE_KEY);
        let queue = PersistQueue::spawn(gateway.clone());

        queue.enqueue(state(7));
        queue.shutdown().await;

        assert_eq!(gateway.load().await.current_number, 7);
    }

    #[tokio::test]
    async fn test_enqueue_after_shutdown_is_dropped() {
        let store = InMemoryStore::new();
        let gateway = StateGateway::new(Arc::new(store.clone()), DEFAULT_STATE_KEY);
        let queue = PersistQueue::spawn(gateway);

        queue.shutdown().await;
        queue.enqueue(state(3));
        queue.flush().await;

        assert!(store.get(DEFAULT_STATE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_failures_do_not_stop_writer() {
        let store = Arc::new(FailingStore::new());
        let gateway = StateGateway::new(store.clone(), DEFAULT_STATE_KEY);
        let queue = PersistQueue::spawn(gateway);

        queue.enqueue(state(1));
        queue.flush().await;
        queue.enqueue(state(2));
        queue.flush().await;

        assert_eq!(store.set_attempts(), 2);
    }
}
