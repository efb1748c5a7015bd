//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod icon;
mod traits;
mod user_repo;

#[cfg(test)]
mod tests;

pub use db::{open_db, open_in_memory, SharedConnection};
pub use icon::{
    IconHierarchyOperations, IconPositioningOperations, IconRepository, IconReorderOperations,
};
pub use traits::OwnedRepository;
pub use user_repo::UserRepository;
