pub mod date;
pub mod isbn;
pub mod query;
