use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::core::library::{CirculationError, CirculationResult, PaginatedResult};
use crate::core::repository::{paginate, Repository};
use crate::hold::domain::model::HoldEntity;
use crate::hold::repository::{HoldRepository, WaitlistRepository};

// In-memory hold store; holds are kept after cancellation for auditing.
#[derive(Debug, Default)]
pub struct MemoryHoldRepository {
    holds: RwLock<HashMap<String, HoldEntity>>,
}

impl MemoryHoldRepository {
    pub fn new() -> Self {
        Self {
            holds: RwLock::new(HashMap::new()),
        }
    }
}

fn matches(hold: &HoldEntity, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(field, expected)| match field.as_str() {
        "hold_id" => hold.hold_id == *expected,
        "book_id" => hold.book_id == *expected,
        "member_id" => hold.member_id == *expected,
        "status" => hold.status.to_string() == *expected,
        _ => false,
    })
}

#[async_trait]
impl Repository<HoldEntity> for MemoryHoldRepository {
    async fn create(&self, entity: &HoldEntity) -> CirculationResult<usize> {
        let mut holds = self.holds.write().await;
        if holds.contains_key(&entity.hold_id) {
            return Err(CirculationError::conflict(
                format!("hold {} already exists", entity.hold_id).as_str()));
        }
        holds.insert(entity.hold_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &HoldEntity) -> CirculationResult<usize> {
        let mut holds = self.holds.write().await;
        match holds.get_mut(&entity.hold_id) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(CirculationError::conflict(
                        format!("stale version {} for hold {}", entity.version, entity.hold_id).as_str()));
                }
                let mut updated = entity.clone();
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                *existing = updated;
                Ok(1)
            }
            None => Err(CirculationError::not_found(
                format!("hold not found for {}", entity.hold_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> CirculationResult<HoldEntity> {
        let holds = self.holds.read().await;
        holds.get(id).cloned().ok_or_else(|| CirculationError::not_found(
            format!("hold not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> CirculationResult<usize> {
        let mut holds = self.holds.write().await;
        match holds.remove(id) {
            Some(_) => Ok(1),
            None => Err(CirculationError::not_found(
                format!("hold not found for {}", id).as_str())),
        }
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> CirculationResult<PaginatedResult<HoldEntity>> {
        let holds = self.holds.read().await;
        let mut records: Vec<HoldEntity> = holds.values()
            .filter(|hold| matches(hold, predicate))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.hold_id.cmp(&b.hold_id));
        Ok(paginate(records, page, page_size))
    }
}

#[async_trait]
impl HoldRepository for MemoryHoldRepository {
    async fn find_active(&self, member_id: &str, book_id: &str) -> CirculationResult<Option<HoldEntity>> {
        let holds = self.holds.read().await;
        Ok(holds.values()
            .find(|hold| hold.member_id == member_id && hold.book_id == book_id && hold.is_active())
            .cloned())
    }

    async fn find_all(&self) -> CirculationResult<Vec<HoldEntity>> {
        let holds = self.holds.read().await;
        let mut records: Vec<HoldEntity> = holds.values().cloned().collect();
        records.sort_by(|a, b| a.held_at.cmp(&b.held_at).then(a.hold_id.cmp(&b.hold_id)));
        Ok(records)
    }
}

// In-memory per-book FIFO waitlists.
#[derive(Debug, Default)]
pub struct MemoryWaitlistRepository {
    queues: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryWaitlistRepository {
    pub fn new() -> Self {
        Self {
            queues: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl WaitlistRepository for MemoryWaitlistRepository {
    async fn queue(&self, book_id: &str) -> CirculationResult<Vec<String>> {
        let queues = self.queues.read().await;
        Ok(queues.get(book_id).cloned().unwrap_or_default())
    }

    async fn contains(&self, book_id: &str, member_id: &str) -> CirculationResult<bool> {
        let queues = self.queues.read().await;
        Ok(queues.get(book_id).map(|q| q.iter().any(|m| m == member_id)).unwrap_or(false))
    }

    async fn enqueue(&self, book_id: &str, member_id: &str) -> CirculationResult<Vec<String>> {
        let mut queues = self.queues.write().await;
        let queue = queues.entry(book_id.to_string()).or_default();
        if !queue.iter().any(|m| m == member_id) {
            queue.push(member_id.to_string());
        }
        Ok(queue.clone())
    }

    async fn dequeue(&self, book_id: &str) -> CirculationResult<Option<String>> {
        let mut queues = self.queues.write().await;
        match queues.get_mut(book_id) {
            Some(queue) if !queue.is_empty() => Ok(Some(queue.remove(0))),
            _ => Ok(None),
        }
    }

    async fn remove(&self, book_id: &str, member_id: &str) -> CirculationResult<bool> {
        let mut queues = self.queues.write().await;
        match queues.get_mut(book_id) {
            Some(queue) => {
                let before = queue.len();
                queue.retain(|m| m != member_id);
                Ok(queue.len() < before)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{CirculationError, HoldStatus};
    use crate::hold::domain::model::HoldEntity;
    use crate::hold::repository::{HoldRepository, WaitlistRepository};
    use crate::hold::repository::memory_hold_repository::{MemoryHoldRepository, MemoryWaitlistRepository};
    use crate::core::repository::Repository;

    #[tokio::test]
    async fn test_should_create_and_find_active_hold() {
        let repo = MemoryHoldRepository::new();
        let hold = HoldEntity::new("book-1", "member-1");
        repo.create(&hold).await.expect("should create");
        let found = repo.find_active("member-1", "book-1").await.expect("should find");
        assert_eq!(Some(hold.hold_id.to_string()), found.map(|h| h.hold_id));
    }

    #[tokio::test]
    async fn test_should_exclude_canceled_holds_from_active_lookup() {
        let repo = MemoryHoldRepository::new();
        let mut hold = HoldEntity::new("book-1", "member-1");
        repo.create(&hold).await.expect("should create");
        hold.status = HoldStatus::Canceled;
        repo.update(&hold).await.expect("should update");
        assert!(repo.find_active("member-1", "book-1").await.expect("should find").is_none());
    }

    #[tokio::test]
    async fn test_should_reject_stale_hold_update() {
        let repo = MemoryHoldRepository::new();
        let mut hold = HoldEntity::new("book-1", "member-1");
        repo.create(&hold).await.expect("should create");
        repo.update(&hold).await.expect("should update");
        hold.version = 5;
        assert!(matches!(repo.update(&hold).await,
                         Err(CirculationError::Conflict { message: _ })));
    }

    #[tokio::test]
    async fn test_should_keep_waitlist_fifo_without_duplicates() {
        let repo = MemoryWaitlistRepository::new();
        repo.enqueue("book-1", "a").await.expect("enqueue");
        repo.enqueue("book-1", "b").await.expect("enqueue");
        repo.enqueue("book-1", "a").await.expect("enqueue");
        assert_eq!(vec!["a".to_string(), "b".to_string()],
                   repo.queue("book-1").await.expect("queue"));
        assert_eq!(Some("a".to_string()), repo.dequeue("book-1").await.expect("dequeue"));
        assert_eq!(Some("b".to_string()), repo.dequeue("book-1").await.expect("dequeue"));
        assert_eq!(None, repo.dequeue("book-1").await.expect("dequeue"));
    }

    #[tokio::test]
    async fn test_should_remove_member_from_waitlist() {
        let repo = MemoryWaitlistRepository::new();
        repo.enqueue("book-1", "a").await.expect("enqueue");
        repo.enqueue("book-1", "b").await.expect("enqueue");
        assert!(repo.remove("book-1", "a").await.expect("remove"));
        assert!(!repo.remove("book-1", "a").await.expect("remove"));
        assert_eq!(vec!["b".to_string()], repo.queue("book-1").await.expect("queue"));
    }
}
