//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod traits;
mod db;
mod menu_item_repo;
mod marker_repo;


pub use traits::{MarkerStore, MenuItemStore, Repository};
pub use db::{init_db, DbState, SharedConnection};
pub use menu_item_repo::MenuItemRepository;
pub use marker_repo::MarkerRepository;
