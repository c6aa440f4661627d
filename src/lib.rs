pub mod books;
pub mod catalog;
pub mod circulation;
pub mod core;
pub mod engine;
pub mod gateway;
pub mod hold;
pub mod members;
pub mod ratings;
pub mod recommendations;
pub mod reports;
pub mod utils;
