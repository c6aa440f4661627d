use std::collections::HashMap;
use async_trait::async_trait;
use tracing::warn;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, SearchQuery};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::events::DomainEvent;
use crate::core::library::{Availability, CirculationError, CirculationResult};
use crate::gateway::events::EventPublisher;
use crate::utils::isbn::is_valid_catalog_code;
use crate::utils::query::{fold_diacritics, normalize_query};
use std::sync::Arc;

pub struct CatalogServiceImpl {
    book_repository: Arc<dyn BookRepository>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub fn new(book_repository: Arc<dyn BookRepository>,
               events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            book_repository,
            events_publisher,
        }
    }
}

fn validate_book(book: &BookDto) -> CirculationResult<()> {
    if book.title.trim().is_empty() {
        return Err(CirculationError::validation("book title must not be empty", Some("400".to_string())));
    }
    if book.author.trim().is_empty() {
        return Err(CirculationError::validation("book author must not be empty", Some("400".to_string())));
    }
    if book.copies_total <= 0 {
        return Err(CirculationError::validation(
            format!("copies_total must be positive for {}", book.book_id).as_str(), Some("400".to_string())));
    }
    if book.copies_available < 0 || book.copies_available > book.copies_total {
        return Err(CirculationError::validation(
            format!("copies_available {} outside [0, {}] for {}",
                    book.copies_available, book.copies_total, book.book_id).as_str(),
            Some("400".to_string())));
    }
    if !is_valid_catalog_code(book.isbn.as_str()) {
        return Err(CirculationError::validation(
            format!("invalid isbn or code {}", book.isbn).as_str(), Some("400".to_string())));
    }
    Ok(())
}

fn matches_query(book: &BookDto, query: &SearchQuery) -> bool {
    if let Some(ref title) = query.title {
        let needle = normalize_query(title.as_str()).normalized;
        let in_title = fold_diacritics(book.title.as_str()).contains(needle.as_str());
        let in_author = fold_diacritics(book.author.as_str()).contains(needle.as_str());
        if !in_title && !in_author {
            return false;
        }
    }
    if let Some(ref author) = query.author {
        let needle = fold_diacritics(author.as_str());
        if !fold_diacritics(book.author.as_str()).contains(needle.as_str()) {
            return false;
        }
    }
    if let Some(ref genre) = query.genre {
        if !book.genre.eq_ignore_ascii_case(genre.as_str()) {
            return false;
        }
    }
    match query.availability {
        Some(Availability::Available) => book.copies_available > 0,
        Some(Availability::Unavailable) => book.copies_available == 0,
        None => true,
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> CirculationResult<BookDto> {
        if let Err(err) = validate_book(book) {
            warn!(book_id = book.book_id.as_str(), "rejected book admission: {}", err);
            return Err(err);
        }
        self.book_repository.create(&BookEntity::from(book)).await?;
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "book_added", "catalog", book.book_id.as_str(), &HashMap::new(), &book.clone())?).await?;
        Ok(book.clone())
    }

    async fn remove_book(&self, id: &str) -> CirculationResult<()> {
        self.book_repository.delete(id).await.map(|_| ())?;
        let data = id.to_string();
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "book_removed", "catalog", id, &HashMap::new(), &data)?).await?;
        Ok(())
    }

    async fn update_book(&self, book: &BookDto) -> CirculationResult<BookDto> {
        if let Err(err) = validate_book(book) {
            warn!(book_id = book.book_id.as_str(), "rejected book update: {}", err);
            return Err(err);
        }
        self.book_repository.update(&BookEntity::from(book)).await.map(|_| ())?;
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "book_updated", "catalog", book.book_id.as_str(), &HashMap::new(), &book.clone())?).await?;
        Ok(book.clone())
    }

    async fn find_book_by_id(&self, id: &str) -> CirculationResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn adjust_copies(&self, id: &str, delta: i64) -> CirculationResult<BookDto> {
        let adjusted = self.book_repository.adjust_copies(id, delta).await?;
        Ok(BookDto::from(&adjusted))
    }

    async fn is_available_by_title(&self, title: &str) -> CirculationResult<bool> {
        let books = self.book_repository.find_all().await?;
        Ok(books.iter()
            .any(|b| b.title.eq_ignore_ascii_case(title) && b.copies_available > 0))
    }

    async fn search_catalog(&self, query: &SearchQuery) -> CirculationResult<Vec<BookDto>> {
        let books = self.book_repository.find_all().await?;
        Ok(books.iter()
            .map(BookDto::from)
            .filter(|b| matches_query(b, query))
            .collect())
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            version: other.version,
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            genre: other.genre.to_string(),
            tags: other.tags.clone(),
            copies_total: other.copies_total,
            copies_available: other.copies_available,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            version: other.version,
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            genre: other.genre.to_string(),
            tags: other.tags.clone(),
            copies_total: other.copies_total,
            copies_available: other.copies_available,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
