//! Storage adapters implementing [`crate::repos::GameStore`].

pub mod memory;

pub use memory::InMemoryStore;
