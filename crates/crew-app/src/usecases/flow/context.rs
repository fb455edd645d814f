use std::sync::Arc;

use crew_core::navigation::FlowSnapshot;
use tokio::sync::{watch, Mutex};

use super::state::FlowState;

/// Shared flow context: the resolver state plus the published snapshot.
///
/// The lock is held only for synchronous closures and never across a service
/// or flag store call, so every guard is checked and set in one lock scope.
/// Each `update` republishes the snapshot when it changed.
pub struct FlowContext {
    state: Mutex<FlowState>,
    snapshot_tx: watch::Sender<FlowSnapshot>,
}

impl FlowContext {
    pub fn new(initial_state: FlowState) -> Self {
        let (snapshot_tx, _) = watch::channel(initial_state.snapshot());
        Self {
            state: Mutex::new(initial_state),
            snapshot_tx,
        }
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn read<R>(&self, f: impl FnOnce(&FlowState) -> R) -> R {
        let guard = self.state.lock().await;
        f(&guard)
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut FlowState) -> R) -> R {
        let mut guard = self.state.lock().await;
        let result = f(&mut guard);
        let next = guard.snapshot();
        // published under the lock so receivers observe updates in order
        self.snapshot_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        result
    }

    pub async fn get_state(&self) -> FlowState {
        self.state.lock().await.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        *self.snapshot_tx.borrow()
    }
}

impl Default for FlowContext {
    fn default() -> Self {
        Self::new(FlowState::default())
    }
}
