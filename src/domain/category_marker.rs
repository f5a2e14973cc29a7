//! Category Marker Entity
//!
//! A named divider grouping the menu items that follow it, up to the next marker.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A category divider in the kiosk menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMarker {
    /// Unique identifier
    pub id: String,
    /// Category name, may be empty while the merchant is still typing
    pub name: String,
    /// Position in the combined menu sequence (same space as menu items)
    pub display_order: i32,
    /// Menu item this marker trails (None = nothing precedes it)
    pub anchor_item_id: Option<String>,
}

impl CategoryMarker {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            display_order: 0,
            anchor_item_id: None,
        }
    }

    /// A marker with a blank name is still being edited and is not stored
    pub fn is_finalized(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl Entity for CategoryMarker {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}
