pub mod domain;
pub mod events;
pub mod library;
pub mod locks;
pub mod money;
pub mod repository;
