//! Background writer for progress snapshots.

use std::sync::Arc;

use learnpath_core::ProgressState;
use learnpath_storage::ProgressStorage;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error};

use crate::error::{ProgressError, Result};
use crate::event::ProgressEvent;

type WriteResult = std::result::Result<(), String>;

enum Command {
    Save(ProgressState),
    Flush(oneshot::Sender<WriteResult>),
}

/// Handle to the writer task. Snapshots are written in submission order;
/// when several are queued only the newest is written.
pub(crate) struct Persister {
    tx: mpsc::UnboundedSender<Command>,
}

impl Persister {
    /// Spawn the writer on the current tokio runtime.
    pub(crate) fn spawn(
        storage: Arc<dyn ProgressStorage>,
        events: broadcast::Sender<ProgressEvent>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(storage, rx, events));
        Self { tx }
    }

    /// Queue a snapshot without waiting for it.
    pub(crate) fn save(&self, state: ProgressState) {
        if self.tx.send(Command::Save(state)).is_err() {
            error!("Progress persister stopped; snapshot dropped");
        }
    }

    /// Wait for everything queued so far, returning the last write result.
    pub(crate) async fn flush(&self) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.tx
            .send(Command::Flush(ack))
            .map_err(|_| ProgressError::PersisterClosed)?;
        done.await
            .map_err(|_| ProgressError::PersisterClosed)?
            .map_err(ProgressError::Persist)
    }
}

async fn run(
    storage: Arc<dyn ProgressStorage>,
    mut rx: mpsc::UnboundedReceiver<Command>,
    events: broadcast::Sender<ProgressEvent>,
) {
    let mut last: WriteResult = Ok(());

    while let Some(command) = rx.recv().await {
        let mut latest = None;
        let mut waiters = Vec::new();
        collect(command, &mut latest, &mut waiters);
        while let Ok(command) = rx.try_recv() {
            collect(command, &mut latest, &mut waiters);
        }

        if let Some(state) = latest {
            last = match storage.save(&state).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    error!("Failed to persist progress: {}", e);
                    let message = e.to_string();
                    let _ = events.send(ProgressEvent::PersistFailed {
                        message: message.clone(),
                    });
                    Err(message)
                }
            };
        }

        for waiter in waiters {
            let _ = waiter.send(last.clone());
        }
    }

    debug!("Progress persister stopped");
}

fn collect(
    command: Command,
    latest: &mut Option<ProgressState>,
    waiters: &mut Vec<oneshot::Sender<WriteResult>>,
) {
    match command {
        Command::Save(state) => *latest = Some(state),
        Command::Flush(ack) => waiters.push(ack),
    }
}
