use std::collections::HashSet;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::Availability;
use crate::utils::date::serializer;

// BookDto is a data transfer object for the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
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

impl BookDto {
    pub fn new(isbn: &str, title: &str, author: &str, genre: &str, copies_total: i64) -> BookDto {
        BookDto {
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

// SearchQuery combines optional catalog filters with AND semantics; omitted
// filters always match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    // substring match against title OR author
    pub title: Option<String>,
    // substring match against author
    pub author: Option<String>,
    // exact case-insensitive genre match
    pub genre: Option<String>,
    pub availability: Option<Availability>,
}

impl SearchQuery {
    pub fn by_title(title: &str) -> Self {
        SearchQuery {
            title: Some(title.to_string()),
            ..SearchQuery::default()
        }
    }
}
