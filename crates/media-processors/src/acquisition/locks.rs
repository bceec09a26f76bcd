use crate::types::MediaId;
use async_lock::{Mutex, MutexGuardArc};
use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// Per-media-id mutual exclusion. Concurrent acquisitions of the same id
/// queue behind each other so only the first one touches the network.
#[derive(Default)]
pub struct KeyedLocks {
    locks: std::sync::Mutex<HashMap<MediaId, Weak<Mutex<()>>>>,
}

pub struct KeyedGuard {
    _guard: MutexGuardArc<()>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, media_id: &MediaId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        locks.retain(|_, lock| lock.strong_count() > 0);

        if let Some(lock) = locks.get(media_id).and_then(Weak::upgrade) {
            return lock;
        }

        let lock = Arc::new(Mutex::new(()));
        locks.insert(media_id.clone(), Arc::downgrade(&lock));

        lock
    }

    pub async fn lock(&self, media_id: &MediaId) -> KeyedGuard {
        let lock = self.lock_for(media_id);

        KeyedGuard {
            _guard: lock.lock_arc().await,
        }
    }

    #[cfg(test)]
    pub(crate) fn active(&self) -> usize {
        let locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        locks.values().filter(|lock| lock.strong_count() > 0).count()
    }
}
