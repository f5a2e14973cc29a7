//! Domain Layer
//!
//! Contains the menu entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod menu_item;
mod category_marker;

pub use entity::{Entity, DomainError, DomainResult};
pub use menu_item::MenuItem;
pub use category_marker::CategoryMarker;
