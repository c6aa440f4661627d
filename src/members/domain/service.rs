use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::warn;
use crate::core::events::DomainEvent;
use crate::core::library::{CirculationError, CirculationResult};
use crate::gateway::events::EventPublisher;
use crate::members::domain::MemberService;
use crate::members::domain::model::MemberEntity;
use crate::members::dto::MemberDto;
use crate::members::repository::MemberRepository;

pub struct MemberServiceImpl {
    member_repository: Arc<dyn MemberRepository>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl MemberServiceImpl {
    pub fn new(member_repository: Arc<dyn MemberRepository>,
               events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            member_repository,
            events_publisher,
        }
    }
}

fn validate_member(member: &MemberDto) -> CirculationResult<()> {
    if member.name.trim().is_empty() {
        return Err(CirculationError::validation("member name must not be empty", Some("400".to_string())));
    }
    if !member.email.contains('@') || !member.email.contains('.') {
        return Err(CirculationError::validation(
            format!("invalid email address {}", member.email).as_str(), Some("400".to_string())));
    }
    Ok(())
}

#[async_trait]
impl MemberService for MemberServiceImpl {
    async fn add_member(&self, member: &MemberDto) -> CirculationResult<MemberDto> {
        if let Err(err) = validate_member(member) {
            warn!(member_id = member.member_id.as_str(), "rejected member registration: {}", err);
            return Err(err);
        }
        self.member_repository.create(&MemberEntity::from(member)).await?;
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "member_added", "members", member.member_id.as_str(), &HashMap::new(), &member.clone())?).await?;
        Ok(member.clone())
    }

    async fn update_member(&self, member: &MemberDto) -> CirculationResult<MemberDto> {
        validate_member(member)?;
        self.member_repository.update(&MemberEntity::from(member)).await?;
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "member_updated", "members", member.member_id.as_str(), &HashMap::new(), &member.clone())?).await?;
        Ok(member.clone())
    }

    async fn find_member_by_id(&self, id: &str) -> CirculationResult<MemberDto> {
        self.member_repository.get(id).await.map(|m| MemberDto::from(&m))
    }

    async fn member_count(&self, active_only: bool) -> CirculationResult<usize> {
        self.member_repository.count(active_only).await
    }
}

impl From<&MemberEntity> for MemberDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            version: other.version,
            name: other.name.to_string(),
            email: other.email.to_string(),
            active: other.active,
            balance: other.balance,
            preference_tags: other.preference_tags.clone(),
            preference_authors: other.preference_authors.clone(),
            loans: other.loans.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&MemberDto> for MemberEntity {
    fn from(other: &MemberDto) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            version: other.version,
            name: other.name.to_string(),
            email: other.email.to_string(),
            active: other.active,
            balance: other.balance,
            preference_tags: other.preference_tags.clone(),
            preference_authors: other.preference_authors.clone(),
            loans: other.loans.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::CirculationError;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;
    use crate::members::domain::MemberService;
    use crate::members::domain::service::MemberServiceImpl;
    use crate::members::dto::MemberDto;
    use crate::members::factory::create_member_repository;

    fn build_service() -> MemberServiceImpl {
        MemberServiceImpl::new(create_member_repository(), create_publisher(GatewayPublisherVia::Logs))
    }

    #[tokio::test]
    async fn test_should_add_and_find_member() {
        let svc = build_service();
        let member = MemberDto::new("Matthew", "matthew@example.com");
        svc.add_member(&member).await.expect("should add");
        let found = svc.find_member_by_id(member.member_id.as_str()).await.expect("should find");
        assert_eq!("Matthew", found.name.as_str());
    }

    #[tokio::test]
    async fn test_should_reject_invalid_email() {
        let svc = build_service();
        let member = MemberDto::new("Matthew", "not-an-email");
        assert!(matches!(svc.add_member(&member).await, Err(CirculationError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_count_members() {
        let svc = build_service();
        svc.add_member(&MemberDto::new("Matthew", "matthew@example.com")).await.expect("add");
        let mut inactive = MemberDto::new("Rood", "rood@example.com");
        inactive.active = false;
        svc.add_member(&inactive).await.expect("add");
        assert_eq!(2, svc.member_count(false).await.expect("count"));
        assert_eq!(1, svc.member_count(true).await.expect("count"));
    }
}
