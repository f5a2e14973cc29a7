//! Sequence and Entry Types

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryMarker, MenuItem};

/// One slot in the combined menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuEntry {
    MenuItem(MenuItem),
    CategoryMarker(CategoryMarker),
}

impl MenuEntry {
    pub fn id(&self) -> &str {
        match self {
            MenuEntry::MenuItem(item) => &item.id,
            MenuEntry::CategoryMarker(marker) => &marker.id,
        }
    }

    pub fn display_order(&self) -> i32 {
        match self {
            MenuEntry::MenuItem(item) => item.display_order,
            MenuEntry::CategoryMarker(marker) => marker.display_order,
        }
    }

    pub fn as_menu_item(&self) -> Option<&MenuItem> {
        match self {
            MenuEntry::MenuItem(item) => Some(item),
            MenuEntry::CategoryMarker(_) => None,
        }
    }

    pub fn as_marker(&self) -> Option<&CategoryMarker> {
        match self {
            MenuEntry::CategoryMarker(marker) => Some(marker),
            MenuEntry::MenuItem(_) => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, MenuEntry::CategoryMarker(_))
    }

    /// Tie-break rank when two entries claim the same display order.
    /// Items sort before markers.
    pub(super) fn kind_rank(&self) -> u8 {
        match self {
            MenuEntry::MenuItem(_) => 0,
            MenuEntry::CategoryMarker(_) => 1,
        }
    }
}

/// A category heading and the items listed under it on the kiosk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// None for items that come before the first marker
    pub marker: Option<CategoryMarker>,
    pub items: Vec<MenuItem>,
}

/// The ordered merge of a store's menu items and category markers
///
/// Only the sequencer constructs non-empty sequences, so the derived
/// fields of every entry are always settled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Sequence {
    entries: Vec<MenuEntry>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn from_settled(entries: Vec<MenuEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuEntry> {
        self.entries.get(index)
    }

    /// Index of the entry (item or marker) with this id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn menu_item(&self, id: &str) -> Option<&MenuItem> {
        self.entries
            .iter()
            .filter_map(MenuEntry::as_menu_item)
            .find(|item| item.id == id)
    }

    pub fn marker(&self, id: &str) -> Option<&CategoryMarker> {
        self.entries
            .iter()
            .filter_map(MenuEntry::as_marker)
            .find(|marker| marker.id == id)
    }

    /// Menu items in sequence order, with their settled `display_order`
    pub fn items(&self) -> Vec<MenuItem> {
        self.entries
            .iter()
            .filter_map(MenuEntry::as_menu_item)
            .cloned()
            .collect()
    }

    /// Category markers in sequence order, with settled order and anchor
    pub fn markers(&self) -> Vec<CategoryMarker> {
        self.entries
            .iter()
            .filter_map(MenuEntry::as_marker)
            .cloned()
            .collect()
    }

    /// Group items under the marker preceding them
    ///
    /// A leading unnamed section is only emitted when items precede the
    /// first marker. Markers with no items still produce an empty section.
    pub fn sections(&self) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        for entry in &self.entries {
            match entry {
                MenuEntry::CategoryMarker(marker) => sections.push(Section {
                    marker: Some(marker.clone()),
                    items: Vec::new(),
                }),
                MenuEntry::MenuItem(item) => match sections.last_mut() {
                    Some(section) => section.items.push(item.clone()),
                    None => sections.push(Section {
                        marker: None,
                        items: vec![item.clone()],
                    }),
                },
            }
        }
        sections
    }
}
