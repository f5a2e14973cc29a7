//! Sequencer Operations
//!
//! Pure functions over [`Sequence`]. Each validates its arguments before
//! touching a copy of the entries, so a failed call never yields a
//! half-updated sequence.

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryMarker, DomainError, DomainResult, MenuItem};
use super::positioning::{check_capacity, settle};
use super::sequence::{MenuEntry, Sequence};

/// Where a new category marker goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerPosition {
    /// Before every other entry
    Start,
    /// Directly after the given menu item
    After(String),
    /// After every other entry
    End,
}

/// Merge items and markers by their last-known `display_order`.
///
/// On equal order, items come before markers; entries of the same kind keep
/// their input order. Sparse or stale orders are densified. Entries past
/// [`MAX_ENTRIES`](super::MAX_ENTRIES) share the last storable order.
pub fn build(items: Vec<MenuItem>, markers: Vec<CategoryMarker>) -> Sequence {
    let mut entries: Vec<MenuEntry> = items
        .into_iter()
        .map(MenuEntry::MenuItem)
        .chain(markers.into_iter().map(MenuEntry::CategoryMarker))
        .collect();

    entries.sort_by_key(|entry| (entry.display_order(), entry.kind_rank()));
    settle(entries)
}

/// Insert a menu item at `at` (0..=len), or append when `at` is None
pub fn insert_menu_item(seq: &Sequence, item: MenuItem, at: Option<usize>) -> DomainResult<Sequence> {
    check_capacity(seq.len())?;
    let index = at.unwrap_or(seq.len());
    check_insert_index(index, seq.len())?;
    ensure_unused(seq, &item.id)?;

    let mut entries = seq.entries().to_vec();
    entries.insert(index, MenuEntry::MenuItem(item));
    Ok(settle(entries))
}

/// Remove a menu item. Markers stay and re-anchor.
pub fn remove_menu_item(seq: &Sequence, item_id: &str) -> DomainResult<Sequence> {
    let index = menu_item_index(seq, item_id)?;

    let mut entries = seq.entries().to_vec();
    entries.remove(index);
    Ok(settle(entries))
}

/// Create a marker named `name` with the caller-supplied `id`
pub fn insert_marker(
    seq: &Sequence,
    id: String,
    name: String,
    at: MarkerPosition,
) -> DomainResult<Sequence> {
    check_capacity(seq.len())?;
    ensure_unused(seq, &id)?;
    let index = match &at {
        MarkerPosition::Start => 0,
        MarkerPosition::After(item_id) => menu_item_index(seq, item_id)? + 1,
        MarkerPosition::End => seq.len(),
    };

    let mut entries = seq.entries().to_vec();
    entries.insert(index, MenuEntry::CategoryMarker(CategoryMarker::new(id, name)));
    Ok(settle(entries))
}

/// Remove a marker. Other markers keep the item they trail.
pub fn remove_marker(seq: &Sequence, marker_id: &str) -> DomainResult<Sequence> {
    let index = marker_index(seq, marker_id)?;

    let mut entries = seq.entries().to_vec();
    entries.remove(index);
    Ok(settle(entries))
}

/// Move the entry at `from` to `to` (drag-and-drop drop semantics)
pub fn reorder(seq: &Sequence, from: usize, to: usize) -> DomainResult<Sequence> {
    check_index(from, seq.len())?;
    check_index(to, seq.len())?;
    if from == to {
        return Ok(seq.clone());
    }

    let mut entries = seq.entries().to_vec();
    let moved = entries.remove(from);
    entries.insert(to, moved);
    Ok(settle(entries))
}

/// Change a marker's name. Empty names are accepted.
pub fn rename_marker(seq: &Sequence, marker_id: &str, new_name: String) -> DomainResult<Sequence> {
    let index = marker_index(seq, marker_id)?;

    let mut entries = seq.entries().to_vec();
    if let MenuEntry::CategoryMarker(marker) = &mut entries[index] {
        marker.name = new_name;
    }
    Ok(Sequence::from_settled(entries))
}

fn check_index(index: usize, len: usize) -> DomainResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(DomainError::IndexOutOfRange { index, len })
    }
}

fn check_insert_index(index: usize, len: usize) -> DomainResult<()> {
    if index <= len {
        Ok(())
    } else {
        Err(DomainError::IndexOutOfRange { index, len })
    }
}

fn ensure_unused(seq: &Sequence, id: &str) -> DomainResult<()> {
    if seq.contains(id) {
        return Err(DomainError::Conflict(format!("Entry {} already in menu", id)));
    }
    Ok(())
}

fn menu_item_index(seq: &Sequence, item_id: &str) -> DomainResult<usize> {
    seq.entries()
        .iter()
        .position(|entry| matches!(entry, MenuEntry::MenuItem(item) if item.id == item_id))
        .ok_or_else(|| DomainError::NotFound(format!("Menu item {}", item_id)))
}

fn marker_index(seq: &Sequence, marker_id: &str) -> DomainResult<usize> {
    seq.entries()
        .iter()
        .position(|entry| matches!(entry, MenuEntry::CategoryMarker(marker) if marker.id == marker_id))
        .ok_or_else(|| DomainError::NotFound(format!("Category marker {}", marker_id)))
}
