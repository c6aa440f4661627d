use crate::core::domain::Identifiable;

pub mod domain;
pub mod dto;
pub mod factory;
pub mod repository;

pub trait Member: Identifiable {
    fn is_active(&self) -> bool;
}
