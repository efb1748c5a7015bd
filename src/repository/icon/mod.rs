//! Icon Repository Module
//!
//! Core CRUD plus the hierarchy, positioning, and reorder operation traits.

mod icon_hierarchy;
mod icon_positioning;
mod icon_reorder;
mod icon_repo;

pub use icon_hierarchy::IconHierarchyOperations;
pub use icon_positioning::IconPositioningOperations;
pub use icon_reorder::IconReorderOperations;
pub use icon_repo::IconRepository;
