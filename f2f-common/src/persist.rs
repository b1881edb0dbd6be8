//! Persistence queue
//!
//! Stores mutate their in-memory state synchronously and then enqueue a
//! write here. A single background task applies queued writes strictly in
//! enqueue order, so the last write enqueued for a key is the one that
//! sticks. Failed writes are logged and dropped (no retry).
//!
//! `flush()` waits until every write enqueued before the call has been
//! applied; tests and graceful shutdown use it.

use crate::kv::KeyValueStore;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

#[derive(Debug)]
enum Command {
    Set { key: String, value: String },
    Remove { keys: Vec<String> },
    Flush(oneshot::Sender<()>),
}

/// Handle to the background writer
///
/// Cheap to clone; all clones feed the same queue. The writer task exits
/// once every handle has been dropped.
#[derive(Clone)]
pub struct Persister {
    store: Arc<dyn KeyValueStore>,
    tx: mpsc::UnboundedSender<Command>,
}

impl Persister {
    /// Start the writer task on the current tokio runtime
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(Arc::clone(&store), rx));
        Self { store, tx }
    }

    /// Backing store, for hydration reads
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Enqueue a JSON-encoded write
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.set(key, json),
            Err(e) => error!("Failed to encode '{}' for storage: {}", key, e),
        }
    }

    /// Enqueue a raw string write
    pub fn set(&self, key: &str, value: String) {
        self.enqueue(Command::Set {
            key: key.to_string(),
            value,
        });
    }

    /// Enqueue removal of keys
    pub fn remove(&self, keys: &[&str]) {
        self.enqueue(Command::Remove {
            keys: keys.iter().map(|k| k.to_string()).collect(),
        });
    }

    /// Wait for every previously enqueued write to be applied
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(done_tx)).is_err() {
            warn!("Persistence task stopped; nothing to flush");
            return;
        }
        let _ = done_rx.await;
    }

    fn enqueue(&self, command: Command) {
        if self.tx.send(command).is_err() {
            warn!("Persistence task stopped; write dropped");
        }
    }
}

async fn run_writer(store: Arc<dyn KeyValueStore>, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Set { key, value } => {
                if let Err(e) = store.set(&key, &value).await {
                    error!("Failed to persist '{}': {}", key, e);
                }
            }
            Command::Remove { keys } => {
                let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
                if let Err(e) = store.remove(&refs).await {
                    error!("Failed to remove {:?}: {}", keys, e);
                }
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Persistence task exiting");
}
