use std::collections::HashSet;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::books::Book;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookEntity abstracts a catalog title with its copy counts; the invariant
// 0 <= copies_available <= copies_total holds after every operation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: String,
    pub version: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub tags: HashSet<String>,
    pub copies_total: i64,
    pub copies_available: i64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author: &str, genre: &str, copies_total: i64) -> Self {
        Self {
            book_id: Uuid::new_v4().to_string(),
            version: 0,
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            tags: HashSet::new(),
            copies_total,
            copies_available: copies_total,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookEntity {
    fn title(&self) -> String {
        self.title.to_string()
    }

    fn author(&self) -> String {
        self.author.to_string()
    }

    fn is_available(&self) -> bool {
        self.copies_available > 0
    }
}
