//! The transient selection that feeds a bulk share action.
//!
//! Users toggle items in and out of the selection while browsing; the
//! share pipeline snapshots it once at start. The store is owned by the
//! screen or session that created it and is dropped with it. Order is
//! significant: exports are produced in the order items were selected.

use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::catalogue::{Item, ItemImage};

/// Buffered events per subscriber before lagging kicks in.
const EVENT_CAPACITY: usize = 64;

/// One item chosen for a bulk share action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionEntry {
    /// Identifier of the selected item.
    pub item_id: String,

    /// Display name.
    pub name: String,

    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,

    /// Price in catalogue currency units. Never negative.
    pub price: f64,

    /// The item's photo.
    pub image: ItemImage,
}

impl From<&Item> for SelectionEntry {
    fn from(item: &Item) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }
}

/// The per-item projection handed to the fetch and compose stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportItem {
    /// Identifier of the selected item.
    pub item_id: String,

    /// Display name, rendered onto the card caption.
    pub name: String,

    /// Price, rendered onto the card caption.
    pub price: f64,

    /// Absolute URL of the photo to download.
    pub image_url: String,
}

/// Mutation notifications published by a [`SelectionStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// An entry was appended.
    Added(String),
    /// An entry was removed.
    Removed(String),
    /// The whole selection was emptied.
    Cleared,
}

/// Ordered, de-duplicated collection of items marked for sharing.
///
/// Mutations take `&self` so a single store can be shared by handle
/// between the browsing surface and the share pipeline. Subscribers
/// receive one event per successful mutation.
#[derive(Debug)]
pub struct SelectionStore {
    entries: Mutex<Vec<SelectionEntry>>,
    events: broadcast::Sender<SelectionEvent>,
}

impl SelectionStore {
    /// Create an empty selection.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Mutex::new(Vec::new()),
            events,
        }
    }

    /// Append an entry, preserving selection order.
    ///
    /// Returns `false` and leaves the store unchanged when an entry with
    /// the same item id is already present, so double-toggling an item
    /// can never queue its photo twice.
    pub fn add(&self, entry: SelectionEntry) -> bool {
        let mut entries = self.lock();
        if entries.iter().any(|e| e.item_id == entry.item_id) {
            return false;
        }
        let id = entry.item_id.clone();
        entries.push(entry);
        drop(entries);
        self.events.send(SelectionEvent::Added(id)).ok();
        true
    }

    /// Remove the entry with the given item id.
    ///
    /// Removing an absent id is a no-op and returns `false`.
    pub fn remove(&self, item_id: &str) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|e| e.item_id != item_id);
        let removed = entries.len() != before;
        drop(entries);
        if removed {
            self.events
                .send(SelectionEvent::Removed(item_id.to_string()))
                .ok();
        }
        removed
    }

    /// Empty the selection.
    pub fn clear(&self) {
        self.lock().clear();
        self.events.send(SelectionEvent::Cleared).ok();
    }

    /// Number of selected entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Read-only projection of the selection in insertion order, shaped
    /// for the fetch and compose stages.
    pub fn list_for_export(&self) -> Vec<ExportItem> {
        self.lock()
            .iter()
            .map(|e| ExportItem {
                item_id: e.item_id.clone(),
                name: e.name.clone(),
                price: e.price,
                image_url: e.image.image_url.clone(),
            })
            .collect()
    }

    /// Subscribe to mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<SelectionEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SelectionEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(item_id: &str, name: &str, price: f64) -> SelectionEntry {
        SelectionEntry {
            item_id: item_id.to_string(),
            name: name.to_string(),
            description: None,
            price,
            image: ItemImage {
                image_url: format!("https://cdn.example.com/photos/{item_id}.jpg"),
                blurhash: None,
            },
        }
    }

    #[test]
    fn test_two_item_selection_order_and_removal() {
        let store = SelectionStore::new();
        assert!(store.add(entry("1", "Desk", 500.0)));
        assert!(store.add(entry("2", "Armoire", 1200.0)));

        let export = store.list_for_export();
        assert_eq!(export.len(), 2);
        assert_eq!(export[0].item_id, "1");
        assert!((export[0].price - 500.0).abs() < 1e-9);
        assert_eq!(export[1].item_id, "2");
        assert!((export[1].price - 1200.0).abs() < 1e-9);

        assert!(store.remove("1"));
        let export = store.list_for_export();
        assert_eq!(export.len(), 1);
        assert_eq!(export[0].item_id, "2");
    }

    #[test]
    fn test_add_rejects_duplicate_item_id() {
        let store = SelectionStore::new();
        assert!(store.add(entry("1", "Desk", 500.0)));
        assert!(!store.add(entry("1", "Desk again", 550.0)));
        assert_eq!(store.len(), 1);
        assert!((store.list_for_export()[0].price - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let store = SelectionStore::new();
        store.add(entry("1", "Desk", 500.0));
        assert!(!store.remove("missing"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_empties_export_projection() {
        let store = SelectionStore::new();
        store.add(entry("1", "Desk", 500.0));
        store.add(entry("2", "Armoire", 1200.0));
        store.clear();
        assert!(store.is_empty());
        assert!(store.list_for_export().is_empty());
    }

    #[test]
    fn test_mutations_publish_events() {
        let store = SelectionStore::new();
        let mut rx = store.subscribe();

        store.add(entry("1", "Desk", 500.0));
        store.add(entry("1", "Desk again", 550.0));
        store.remove("1");
        store.remove("1");
        store.clear();

        assert_eq!(rx.try_recv().unwrap(), SelectionEvent::Added("1".into()));
        assert_eq!(rx.try_recv().unwrap(), SelectionEvent::Removed("1".into()));
        assert_eq!(rx.try_recv().unwrap(), SelectionEvent::Cleared);
        assert!(rx.try_recv().is_err());
    }

    proptest! {
        #[test]
        fn prop_export_order_matches_insertion_order(count in 0usize..32) {
            let store = SelectionStore::new();
            for i in 0..count {
                let id = format!("item-{i}");
                prop_assert!(store.add(entry(&id, "Thing", i as f64)));
            }

            let export = store.list_for_export();
            prop_assert_eq!(export.len(), count);
            for (i, item) in export.iter().enumerate() {
                let expected_id = format!("item-{i}");
                prop_assert_eq!(item.item_id.as_str(), expected_id.as_str());
            }
        }

        #[test]
        fn prop_duplicate_adds_never_grow_the_selection(ids in proptest::collection::vec("[a-z]{1,4}", 0..24)) {
            let store = SelectionStore::new();
            let mut expected: Vec<String> = vec![];
            for id in &ids {
                let inserted = store.add(entry(id, "Thing", 1.0));
                prop_assert_eq!(inserted, !expected.contains(id));
                if inserted {
                    expected.push(id.clone());
                }
            }

            let export = store.list_for_export();
            let got: Vec<String> = export.into_iter().map(|e| e.item_id).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
