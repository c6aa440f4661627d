use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::core::library::{CirculationError, CirculationResult, PaginatedResult};
use crate::core::repository::{paginate, Repository};
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;

#[derive(Debug, Default)]
pub struct MemoryMemberRepository {
    members: RwLock<HashMap<String, MemberEntity>>,
}

impl MemoryMemberRepository {
    pub fn new() -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
        }
    }
}

fn matches(member: &MemberEntity, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(field, expected)| match field.as_str() {
        "member_id" => member.member_id == *expected,
        "name" => member.name == *expected,
        "email" => member.email == *expected,
        "active" => member.active.to_string() == *expected,
        _ => false,
    })
}

#[async_trait]
impl Repository<MemberEntity> for MemoryMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> CirculationResult<usize> {
        let mut members = self.members.write().await;
        if members.contains_key(&entity.member_id) {
            return Err(CirculationError::conflict(
                format!("member {} already exists", entity.member_id).as_str()));
        }
        members.insert(entity.member_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &MemberEntity) -> CirculationResult<usize> {
        let mut members = self.members.write().await;
        match members.get_mut(&entity.member_id) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(CirculationError::conflict(
                        format!("stale version {} for member {}", entity.version, entity.member_id).as_str()));
                }
                let mut updated = entity.clone();
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                *existing = updated;
                Ok(1)
            }
            None => Err(CirculationError::not_found(
                format!("member not found for {}", entity.member_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> CirculationResult<MemberEntity> {
        let members = self.members.read().await;
        members.get(id).cloned().ok_or_else(|| CirculationError::not_found(
            format!("member not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> CirculationResult<usize> {
        let mut members = self.members.write().await;
        match members.remove(id) {
            Some(_) => Ok(1),
            None => Err(CirculationError::not_found(
                format!("member not found for {}", id).as_str())),
        }
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> CirculationResult<PaginatedResult<MemberEntity>> {
        let members = self.members.read().await;
        let mut records: Vec<MemberEntity> = members.values()
            .filter(|member| matches(member, predicate))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.member_id.cmp(&b.member_id));
        Ok(paginate(records, page, page_size))
    }
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn find_all(&self) -> CirculationResult<Vec<MemberEntity>> {
        let members = self.members.read().await;
        let mut records: Vec<MemberEntity> = members.values().cloned().collect();
        records.sort_by(|a, b| a.member_id.cmp(&b.member_id));
        Ok(records)
    }

    async fn count(&self, active_only: bool) -> CirculationResult<usize> {
        let members = self.members.read().await;
        Ok(members.values().filter(|m| !active_only || m.active).count())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::library::CirculationError;
    use crate::core::repository::Repository;
    use crate::members::domain::model::MemberEntity;
    use crate::members::repository::MemberRepository;
    use crate::members::repository::memory_member_repository::MemoryMemberRepository;

    #[tokio::test]
    async fn test_should_create_and_get_member() {
        let repo = MemoryMemberRepository::new();
        let member = MemberEntity::new("Matthew", "matthew@example.com");
        repo.create(&member).await.expect("should create");
        let loaded = repo.get(member.member_id.as_str()).await.expect("should get");
        assert_eq!("Matthew", loaded.name.as_str());
        assert!(matches!(repo.create(&member).await, Err(CirculationError::Conflict { message: _ })));
    }

    #[tokio::test]
    async fn test_should_count_active_members() {
        let repo = MemoryMemberRepository::new();
        let mut inactive = MemberEntity::new("Rood", "rood@example.com");
        inactive.active = false;
        repo.create(&MemberEntity::new("Matthew", "matthew@example.com")).await.expect("create");
        repo.create(&inactive).await.expect("create");
        assert_eq!(2, repo.count(false).await.expect("count"));
        assert_eq!(1, repo.count(true).await.expect("count"));
    }

    #[tokio::test]
    async fn test_should_query_by_email() {
        let repo = MemoryMemberRepository::new();
        let member = MemberEntity::new("Eliza", "eliza@example.com");
        repo.create(&member).await.expect("create");
        let res = repo.query(
            &HashMap::from([("email".to_string(), "eliza@example.com".to_string())]), None, 10).await.expect("query");
        assert_eq!(1, res.records.len());
    }
}
