//! Position Derivation
//!
//! The one place where `display_order` and `anchor_item_id` are computed.
//! Every mutating operation funnels its new entry list through [`settle`].

use crate::domain::{DomainError, DomainResult};

use super::sequence::{MenuEntry, Sequence};

/// Largest sequence whose positions all fit a stored `display_order`
pub const MAX_ENTRIES: usize = i32::MAX as usize;

/// `display_order` for a position; saturates past [`MAX_ENTRIES`]
pub(super) fn order_at(position: usize) -> i32 {
    i32::try_from(position).unwrap_or(i32::MAX)
}

/// Inserts fail once the sequence is full
pub(super) fn check_capacity(len: usize) -> DomainResult<()> {
    if len >= MAX_ENTRIES {
        return Err(DomainError::Conflict(format!("Menu already holds {} entries", len)));
    }
    Ok(())
}

/// Reindex entries to 0..n-1 and re-anchor every marker to the nearest
/// preceding menu item.
pub(super) fn settle(mut entries: Vec<MenuEntry>) -> Sequence {
    let mut last_item: Option<String> = None;

    for (position, entry) in entries.iter_mut().enumerate() {
        let order = order_at(position);
        match entry {
            MenuEntry::MenuItem(item) => {
                item.display_order = order;
                last_item = Some(item.id.clone());
            }
            MenuEntry::CategoryMarker(marker) => {
                marker.display_order = order;
                marker.anchor_item_id = last_item.clone();
            }
        }
    }

    Sequence::from_settled(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryMarker, MenuItem};

    #[test]
    fn test_settle_densifies_and_anchors() {
        let mut leading = CategoryMarker::new("m0".to_string(), "Hot".to_string());
        leading.display_order = 40;
        leading.anchor_item_id = Some("stale".to_string());
        let mut a = MenuItem::new("a".to_string(), "A".to_string());
        a.display_order = 7;
        let trailing = CategoryMarker::new("m1".to_string(), "Cold".to_string());

        let seq = settle(vec![
            MenuEntry::CategoryMarker(leading),
            MenuEntry::MenuItem(a),
            MenuEntry::CategoryMarker(trailing),
        ]);

        let orders: Vec<i32> = seq.entries().iter().map(MenuEntry::display_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        let markers = seq.markers();
        assert_eq!(markers[0].anchor_item_id, None);
        assert_eq!(markers[1].anchor_item_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_order_conversion_at_the_bound() {
        assert_eq!(order_at(0), 0);
        assert_eq!(order_at(MAX_ENTRIES - 1), i32::MAX - 1);
        assert_eq!(order_at(MAX_ENTRIES), i32::MAX);
        assert_eq!(order_at(usize::MAX), i32::MAX);
    }

    #[test]
    fn test_full_sequence_rejects_inserts() {
        assert!(check_capacity(MAX_ENTRIES - 1).is_ok());
        assert!(matches!(check_capacity(MAX_ENTRIES), Err(DomainError::Conflict(_))));
    }
}
