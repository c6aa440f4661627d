use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{CirculationError, CirculationResult, PaginatedResult};
use crate::core::repository::{paginate, Repository};

// In-memory book store; the engine is the authority over catalog state and
// durable storage, when present, is a read-through/write-through collaborator.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: RwLock<HashMap<String, BookEntity>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
        }
    }
}

fn matches(book: &BookEntity, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(field, expected)| match field.as_str() {
        "book_id" => book.book_id == *expected,
        "isbn" => book.isbn == *expected,
        "title" => book.title == *expected,
        "author" => book.author == *expected,
        "genre" => book.genre == *expected,
        _ => false,
    })
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> CirculationResult<usize> {
        let mut books = self.books.write().await;
        if books.contains_key(&entity.book_id) {
            return Err(CirculationError::conflict(
                format!("book {} already exists", entity.book_id).as_str()));
        }
        books.insert(entity.book_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &BookEntity) -> CirculationResult<usize> {
        let mut books = self.books.write().await;
        match books.get_mut(&entity.book_id) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(CirculationError::conflict(
                        format!("stale version {} for book {}", entity.version, entity.book_id).as_str()));
                }
                let mut updated = entity.clone();
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                *existing = updated;
                Ok(1)
            }
            None => Err(CirculationError::not_found(
                format!("book not found for {}", entity.book_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> CirculationResult<BookEntity> {
        let books = self.books.read().await;
        books.get(id).cloned().ok_or_else(|| CirculationError::not_found(
            format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> CirculationResult<usize> {
        let mut books = self.books.write().await;
        match books.remove(id) {
            Some(_) => Ok(1),
            None => Err(CirculationError::not_found(
                format!("book not found for {}", id).as_str())),
        }
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> CirculationResult<PaginatedResult<BookEntity>> {
        let books = self.books.read().await;
        let mut records: Vec<BookEntity> = books.values()
            .filter(|book| matches(book, predicate))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.book_id.cmp(&b.book_id));
        Ok(paginate(records, page, page_size))
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn adjust_copies(&self, id: &str, delta: i64) -> CirculationResult<BookEntity> {
        let mut books = self.books.write().await;
        let book = books.get_mut(id).ok_or_else(|| CirculationError::not_found(
            format!("book not found for {}", id).as_str()))?;
        let adjusted = book.copies_available + delta;
        if adjusted < 0 || adjusted > book.copies_total {
            return Err(CirculationError::out_of_range(
                format!("copies for {} would become {} outside [0, {}]",
                        id, adjusted, book.copies_total).as_str()));
        }
        book.copies_available = adjusted;
        book.version += 1;
        book.updated_at = Utc::now().naive_utc();
        Ok(book.clone())
    }

    async fn find_all(&self) -> CirculationResult<Vec<BookEntity>> {
        let books = self.books.read().await;
        let mut records: Vec<BookEntity> = books.values().cloned().collect();
        records.sort_by(|a, b| a.book_id.cmp(&b.book_id));
        Ok(records)
    }
}
