use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::core::library::{CirculationError, CirculationResult, PaginatedResult};
use crate::core::repository::{paginate, Repository};
use crate::ratings::domain::model::RatingEntity;
use crate::ratings::repository::RatingRepository;

// In-memory rating store keyed by book id.
#[derive(Debug, Default)]
pub struct MemoryRatingRepository {
    ratings: RwLock<HashMap<String, RatingEntity>>,
}

impl MemoryRatingRepository {
    pub fn new() -> Self {
        Self {
            ratings: RwLock::new(HashMap::new()),
        }
    }
}

fn matches(rating: &RatingEntity, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(field, expected)| match field.as_str() {
        "book_id" => rating.book_id == *expected,
        _ => false,
    })
}

#[async_trait]
impl Repository<RatingEntity> for MemoryRatingRepository {
    async fn create(&self, entity: &RatingEntity) -> CirculationResult<usize> {
        let mut ratings = self.ratings.write().await;
        if ratings.contains_key(&entity.book_id) {
            return Err(CirculationError::conflict(
                format!("rating for {} already exists", entity.book_id).as_str()));
        }
        ratings.insert(entity.book_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &RatingEntity) -> CirculationResult<usize> {
        let mut ratings = self.ratings.write().await;
        match ratings.get_mut(&entity.book_id) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(CirculationError::conflict(
                        format!("stale version {} for rating {}", entity.version, entity.book_id).as_str()));
                }
                let mut updated = entity.clone();
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                *existing = updated;
                Ok(1)
            }
            None => Err(CirculationError::not_found(
                format!("rating not found for {}", entity.book_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> CirculationResult<RatingEntity> {
        let ratings = self.ratings.read().await;
        ratings.get(id).cloned().ok_or_else(|| CirculationError::not_found(
            format!("rating not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> CirculationResult<usize> {
        let mut ratings = self.ratings.write().await;
        match ratings.remove(id) {
            Some(_) => Ok(1),
            None => Err(CirculationError::not_found(
                format!("rating not found for {}", id).as_str())),
        }
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> CirculationResult<PaginatedResult<RatingEntity>> {
        let ratings = self.ratings.read().await;
        let mut records: Vec<RatingEntity> = ratings.values()
            .filter(|rating| matches(rating, predicate))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.book_id.cmp(&b.book_id));
        Ok(paginate(records, page, page_size))
    }
}

#[async_trait]
impl RatingRepository for MemoryRatingRepository {
    async fn find_by_book(&self, book_id: &str) -> CirculationResult<Option<RatingEntity>> {
        let ratings = self.ratings.read().await;
        Ok(ratings.get(book_id).cloned())
    }

    async fn find_all(&self) -> CirculationResult<Vec<RatingEntity>> {
        let ratings = self.ratings.read().await;
        let mut records: Vec<RatingEntity> = ratings.values().cloned().collect();
        records.sort_by(|a, b| a.book_id.cmp(&b.book_id));
        Ok(records)
    }
}
