//! Menu Item Entity
//!
//! A sellable product placed in the kiosk menu.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A product shown on the kiosk
///
/// Only `id` and `display_order` matter for ordering; the rest is payload
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique identifier
    pub id: String,
    /// Product name
    pub name: String,
    /// Price in the smallest currency unit
    pub price_cents: i64,
    /// Temporarily unavailable on the kiosk
    pub sold_out: bool,
    /// Whether the product is offered on the kiosk at all
    pub kiosk_enabled: bool,
    /// Position in the combined menu sequence (assigned by the sequencer)
    pub display_order: i32,
}

impl MenuItem {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            price_cents: 0,
            sold_out: false,
            kiosk_enabled: true,
            display_order: 0,
        }
    }

    pub fn with_price(id: String, name: String, price_cents: i64) -> Self {
        Self {
            price_cents,
            ..Self::new(id, name)
        }
    }
}

impl Entity for MenuItem {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}
