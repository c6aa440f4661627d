use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::circulation::domain::model::LoanEntity;
use crate::circulation::repository::LoanRepository;
use crate::core::library::{CirculationError, CirculationResult, PaginatedResult};
use crate::core::repository::{paginate, Repository};

// In-memory loan ledger keyed by loan id; historical records are kept
// forever for reporting.
#[derive(Debug, Default)]
pub struct MemoryLoanRepository {
    loans: RwLock<HashMap<String, LoanEntity>>,
}

impl MemoryLoanRepository {
    pub fn new() -> Self {
        Self {
            loans: RwLock::new(HashMap::new()),
        }
    }
}

fn matches(loan: &LoanEntity, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(field, expected)| match field.as_str() {
        "loan_id" => loan.loan_id == *expected,
        "book_id" => loan.book_id == *expected,
        "member_id" => loan.member_id == *expected,
        "status" => loan.status.to_string() == *expected,
        _ => false,
    })
}

fn sorted(mut records: Vec<LoanEntity>) -> Vec<LoanEntity> {
    // borrow order first so reports and fallbacks see a stable history
    records.sort_by(|a, b| a.borrowed_at.cmp(&b.borrowed_at)
        .then_with(|| a.loan_id.cmp(&b.loan_id)));
    records
}

#[async_trait]
impl Repository<LoanEntity> for MemoryLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> CirculationResult<usize> {
        let mut loans = self.loans.write().await;
        if loans.contains_key(&entity.loan_id) {
            return Err(CirculationError::conflict(
                format!("loan {} already exists", entity.loan_id).as_str()));
        }
        loans.insert(entity.loan_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &LoanEntity) -> CirculationResult<usize> {
        let mut loans = self.loans.write().await;
        match loans.get_mut(&entity.loan_id) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(CirculationError::conflict(
                        format!("stale version {} for loan {}", entity.version, entity.loan_id).as_str()));
                }
                let mut updated = entity.clone();
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                *existing = updated;
                Ok(1)
            }
            None => Err(CirculationError::not_found(
                format!("loan not found for {}", entity.loan_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> CirculationResult<LoanEntity> {
        let loans = self.loans.read().await;
        loans.get(id).cloned().ok_or_else(|| CirculationError::not_found(
            format!("loan not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> CirculationResult<usize> {
        let mut loans = self.loans.write().await;
        match loans.remove(id) {
            Some(_) => Ok(1),
            None => Err(CirculationError::not_found(
                format!("loan not found for {}", id).as_str())),
        }
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> CirculationResult<PaginatedResult<LoanEntity>> {
        let loans = self.loans.read().await;
        let records: Vec<LoanEntity> = loans.values()
            .filter(|loan| matches(loan, predicate))
            .cloned()
            .collect();
        Ok(paginate(sorted(records), page, page_size))
    }
}

#[async_trait]
impl LoanRepository for MemoryLoanRepository {
    async fn find_active(&self, member_id: &str, book_id: &str) -> CirculationResult<Option<LoanEntity>> {
        let loans = self.loans.read().await;
        Ok(loans.values()
            .find(|loan| loan.member_id == member_id && loan.book_id == book_id && loan.is_active())
            .cloned())
    }

    async fn find_by_member(&self, member_id: &str) -> CirculationResult<Vec<LoanEntity>> {
        let loans = self.loans.read().await;
        let records: Vec<LoanEntity> = loans.values()
            .filter(|loan| loan.member_id == member_id)
            .cloned()
            .collect();
        Ok(sorted(records))
    }

    async fn find_all(&self) -> CirculationResult<Vec<LoanEntity>> {
        let loans = self.loans.read().await;
        let records: Vec<LoanEntity> = loans.values().cloned().collect();
        Ok(sorted(records))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::circulation::domain::model::LoanEntity;
    use crate::circulation::repository::LoanRepository;
    use crate::circulation::repository::memory_loan_repository::MemoryLoanRepository;
    use crate::core::library::LoanStatus;
    use crate::core::repository::Repository;

    fn loan(book_id: &str, member_id: &str) -> LoanEntity {
        let now = Utc::now().naive_utc();
        LoanEntity::new(book_id, member_id, now, now + Duration::days(14))
    }

    #[tokio::test]
    async fn test_should_find_active_loan_for_pair() {
        let repo = MemoryLoanRepository::new();
        let active = loan("b1", "m1");
        repo.create(&active).await.expect("create");
        let found = repo.find_active("m1", "b1").await.expect("find");
        assert_eq!(Some(active.loan_id.clone()), found.map(|l| l.loan_id));
        assert!(repo.find_active("m1", "b2").await.expect("find").is_none());
    }

    #[tokio::test]
    async fn test_should_ignore_returned_loans_for_active_lookup() {
        let repo = MemoryLoanRepository::new();
        let mut returned = loan("b1", "m1");
        repo.create(&returned).await.expect("create");
        returned.status = LoanStatus::Returned;
        returned.returned_at = Some(Utc::now().naive_utc());
        repo.update(&returned).await.expect("update");
        assert!(repo.find_active("m1", "b1").await.expect("find").is_none());
        // history is retained
        assert_eq!(1, repo.find_by_member("m1").await.expect("find").len());
    }

    #[tokio::test]
    async fn test_should_list_history_in_borrow_order() {
        let repo = MemoryLoanRepository::new();
        let now = Utc::now().naive_utc();
        let mut first = loan("b1", "m1");
        first.borrowed_at = now - Duration::days(10);
        let mut second = loan("b2", "m1");
        second.borrowed_at = now - Duration::days(5);
        repo.create(&second).await.expect("create");
        repo.create(&first).await.expect("create");
        let history = repo.find_by_member("m1").await.expect("find");
        assert_eq!(vec!["b1".to_string(), "b2".to_string()],
                   history.iter().map(|l| l.book_id.clone()).collect::<Vec<String>>());
    }
}
