//! Serialisation point for graph mutations.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Shared lock serialising all mutations across the three record types.
///
/// A single mutation can rewrite records of every type, so each service
/// takes this gate before touching its stores. Clones share the same lock.
#[derive(Debug, Clone, Default)]
pub struct MutationGate {
    inner: Arc<Mutex<()>>,
}

impl MutationGate {
    /// Create a fresh gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the gate for the duration of one mutation.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_one_lock() {
        let gate = MutationGate::new();
        let clone = gate.clone();

        let guard = gate.lock().await;
        assert!(clone.inner.try_lock().is_err());
        drop(guard);
        assert!(clone.inner.try_lock().is_ok());
    }
}
