//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{CategoryMarker, DomainResult, Entity, MenuItem};

/// Core read access, scoped by store
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// List a store's entities ordered by display order
    async fn list_for_store(&self, store_id: &str) -> DomainResult<Vec<T>>;
}

/// Menu item persistence
#[async_trait]
pub trait MenuItemStore: Repository<MenuItem> {
    /// Register a product for a store
    async fn create(&self, store_id: &str, item: &MenuItem) -> DomainResult<MenuItem>;

    /// Look up a product only if it belongs to `store_id`
    async fn find_for_store(&self, store_id: &str, id: &str) -> DomainResult<Option<MenuItem>>;

    /// Products currently offered on the kiosk, in display order
    async fn list_kiosk_enabled(&self, store_id: &str) -> DomainResult<Vec<MenuItem>>;

    /// Per-item update of the kiosk flag and display order.
    /// NotFound unless the item belongs to `store_id`.
    async fn update_placement(
        &self,
        store_id: &str,
        id: &str,
        kiosk_enabled: bool,
        display_order: i32,
    ) -> DomainResult<()>;
}

/// Category marker persistence
#[async_trait]
pub trait MarkerStore: Repository<CategoryMarker> {
    /// Delete all of a store's markers, then insert `markers`
    async fn replace_for_store(&self, store_id: &str, markers: &[CategoryMarker]) -> DomainResult<()>;
}
