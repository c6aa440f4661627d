pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDto, SearchQuery};
use crate::core::library::CirculationResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    // admits a book after validating its isbn or product code
    async fn add_book(&self, book: &BookDto) -> CirculationResult<BookDto>;
    async fn remove_book(&self, id: &str) -> CirculationResult<()>;
    async fn update_book(&self, book: &BookDto) -> CirculationResult<BookDto>;
    async fn find_book_by_id(&self, id: &str) -> CirculationResult<BookDto>;
    async fn adjust_copies(&self, id: &str, delta: i64) -> CirculationResult<BookDto>;
    // case-insensitive exact-title match; false when the title is unknown
    async fn is_available_by_title(&self, title: &str) -> CirculationResult<bool>;
    async fn search_catalog(&self, query: &SearchQuery) -> CirculationResult<Vec<BookDto>>;
}
