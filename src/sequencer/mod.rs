//! Menu Sequencer
//!
//! Keeps menu items and category markers in one combined, position-ordered
//! sequence. Every operation takes the current [`Sequence`] by reference and
//! returns a new one; on error the caller's sequence is left as it was.
//!
//! After every mutation two derived fields are re-established:
//! - `display_order` is `0..n-1` with no gaps or duplicates
//! - each marker's `anchor_item_id` is the nearest preceding menu item (or None)

mod sequence;
mod positioning;
mod operations;
mod drop_target;

#[cfg(test)]
mod tests;

pub use sequence::{MenuEntry, Section, Sequence};
pub use operations::{
    build, insert_marker, insert_menu_item, remove_marker, remove_menu_item, rename_marker,
    reorder, MarkerPosition,
};
pub use drop_target::{resolve_drop, DropTarget};
pub use positioning::MAX_ENTRIES;
