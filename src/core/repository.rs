use async_trait::async_trait;
use core::option::Option;
use std::collections::HashMap;
use crate::core::library::{CirculationResult, PaginatedResult};

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> CirculationResult<usize>;

    // updates an entity, guarded by the entity's version
    async fn update(&self, entity: &Entity) -> CirculationResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> CirculationResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> CirculationResult<usize>;

    // find by field predicates (exact match, AND semantics)
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> CirculationResult<PaginatedResult<Entity>>;
}

// Offset pagination over an already-filtered, deterministically ordered set
// of records; page tokens are numeric offsets.
pub fn paginate<T>(mut records: Vec<T>, page: Option<&str>, page_size: usize) -> PaginatedResult<T> {
    let offset = page.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0);
    let total = records.len();
    let records: Vec<T> = if offset >= total {
        records.clear();
        records
    } else {
        records.drain(..).skip(offset).take(page_size).collect()
    };
    let next_page = if offset + records.len() < total {
        Some((offset + records.len()).to_string())
    } else {
        None
    };
    PaginatedResult::new(page, page_size, next_page, records)
}
