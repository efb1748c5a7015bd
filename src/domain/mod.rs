//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde/regex for
//! serialization and field validation).

mod entity;
mod icon;
mod user;
mod views;

pub use entity::{DomainError, DomainResult, Entity};
pub use icon::{
    validate_background_color, validate_material_icon_name, validate_title, validate_url, Icon,
    IconId, IconKind, MATERIAL_ICON_MAX_LEN, TITLE_MAX_LEN, URL_MAX_LEN,
};
pub use user::{Principal, User, UserId};
pub use views::{
    CreateIconInput, IconDetailView, IconView, ImageAttachView, RegisterInput, ReorderEntry,
    ReorderRequest, ReorderResponse, ReorderedIcon, UpdateIconInput, UserView,
};
