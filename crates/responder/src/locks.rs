//! Per-user critical sections.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed mutex registry serializing the read-window → complete → append
/// sequence per user id.
///
/// Without this, two concurrent requests for the same user could read the
/// same history window and interleave their turn pairs.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl UserLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the critical section for a user. Held until the returned
    /// guard is dropped.
    pub async fn acquire(&self, user_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(user_id).or_default().clone()
        };

        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_same_user_serializes() {
        let locks = Arc::new(UserLocks::new());

        let guard = locks.acquire(1).await;

        let locks2 = locks.clone();
        let blocked = tokio::spawn(async move { locks2.acquire(1).await });

        // The second acquire must not complete while the guard is held.
        tokio::task::yield_now().await;
        assert!(!blocked.is_finished());

        drop(guard);
        timeout(Duration::from_secs(1), blocked)
            .await
            .expect("second acquire should proceed once the guard drops")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_users_do_not_block() {
        let locks = UserLocks::new();

        let _one = locks.acquire(1).await;
        let two = timeout(Duration::from_secs(1), locks.acquire(2)).await;
        assert!(two.is_ok());
    }
}
