use crate::core::domain::Identifiable;

pub mod domain;
pub mod dto;
pub mod factory;
pub mod repository;

pub trait Book: Identifiable {
    fn title(&self) -> String;
    fn author(&self) -> String;
    fn is_available(&self) -> bool;
}
