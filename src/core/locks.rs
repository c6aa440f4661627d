use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

// KeyedLocks hands out one async mutex per key so that at most one mutating
// operation is in flight per book id and per member id at a time.
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("keyed locks poisoned");
            locks.entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

impl Default for KeyedLocks {
    fn default() -> Self {
        KeyedLocks::new()
    }
}

// EngineLocks fixes the acquisition discipline for mutating operations:
// book lock before member lock, always, so two operations touching the same
// pair cannot deadlock.
pub struct EngineLocks {
    books: KeyedLocks,
    members: KeyedLocks,
}

impl EngineLocks {
    pub fn new() -> Self {
        Self {
            books: KeyedLocks::new(),
            members: KeyedLocks::new(),
        }
    }

    pub async fn book(&self, book_id: &str) -> OwnedMutexGuard<()> {
        self.books.acquire(book_id).await
    }

    pub async fn member(&self, member_id: &str) -> OwnedMutexGuard<()> {
        self.members.acquire(member_id).await
    }

    // book before member
    pub async fn book_then_member(&self, book_id: &str, member_id: &str) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        let book_guard = self.books.acquire(book_id).await;
        let member_guard = self.members.acquire(member_id).await;
        (book_guard, member_guard)
    }
}

impl Default for EngineLocks {
    fn default() -> Self {
        EngineLocks::new()
    }
}
