//! Normalized item store with memoized hierarchy and type selectors.

use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

use crate::model::{Item, ItemFamily, ItemId};
use crate::selectors::SelectorCache;

/// Type filter accepted by [`ItemStore::select_items_by_type`].
#[derive(Debug, Clone)]
pub enum TypePattern {
    /// Every item whose tag belongs to the family (`container:bag`, `container:vault`, ...).
    Family(ItemFamily),
    /// Plain string prefix of the raw tag.
    Prefix(String),
    /// Regular expression tested against the raw tag.
    Regex(Regex),
}

impl TypePattern {
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Regex)
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::Family(family) => item.item_type.family() == family,
            Self::Prefix(prefix) => item.item_type.as_str().starts_with(prefix.as_str()),
            Self::Regex(regex) => regex.is_match(item.item_type.as_str()),
        }
    }

    fn cache_key(&self) -> TypeKey {
        match self {
            Self::Family(family) => TypeKey::Family(family.clone()),
            Self::Prefix(prefix) => TypeKey::Prefix(prefix.clone()),
            Self::Regex(regex) => TypeKey::Regex(regex.as_str().to_string()),
        }
    }
}

/// Hashable identity of a [`TypePattern`]; a regex is keyed by its source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TypeKey {
    Family(ItemFamily),
    Prefix(String),
    Regex(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemSetError {
    #[error("item {item} is its own ancestor")]
    Cycle { item: ItemId },
}

#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    entities: IndexMap<ItemId, Item>,
    revision: u64,
    by_parent: SelectorCache<Option<ItemId>, Item>,
    by_type: SelectorCache<TypeKey, Item>,
}

impl PartialEq for ItemStore {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every record at once. A set whose parent pointers loop is rejected whole.
    pub fn init_items(&mut self, items: Vec<Item>) -> Result<(), ItemSetError> {
        let mut entities = IndexMap::with_capacity(items.len());
        for item in items {
            entities.insert(item.id.clone(), item);
        }
        if let Some(item) = first_cycle(&entities) {
            return Err(ItemSetError::Cycle { item });
        }
        self.entities = entities;
        self.bump();
        Ok(())
    }

    /// Reassigns one item's parent.
    ///
    /// Returns `false` without touching the store when the item is unknown, already has that
    /// parent, or the move would make the item its own ancestor. Slot capacity is not checked
    /// here; see [`crate::placement::check_move`].
    pub fn move_item(&mut self, id: &ItemId, new_parent: Option<ItemId>) -> bool {
        let Some(current) = self.entities.get(id) else {
            return false;
        };
        if current.parent_item_id == new_parent {
            return false;
        }
        if let Some(parent) = new_parent.as_ref() {
            if parent == id || self.ancestors(parent).contains(id) {
                return false;
            }
        }
        if let Some(item) = self.entities.get_mut(id) {
            item.parent_item_id = new_parent;
        }
        self.bump();
        true
    }

    pub fn select_item_by_id(&self, id: &ItemId) -> Option<&Item> {
        self.entities.get(id)
    }

    pub fn select_all_items(&self) -> impl Iterator<Item = &Item> {
        self.entities.values()
    }

    pub fn select_item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.entities.keys()
    }

    pub fn select_total_items(&self) -> usize {
        self.entities.len()
    }

    /// Children of `parent` in insertion order; `None` selects root-level items.
    pub fn select_items_by_parent_item_id(&self, parent: Option<&ItemId>) -> Rc<[Item]> {
        let key = parent.cloned();
        self.by_parent.get_or_compute(self.revision, key.clone(), || {
            self.entities
                .values()
                .filter(|item| item.parent_item_id == key)
                .cloned()
                .collect()
        })
    }

    pub fn select_items_by_type(&self, pattern: &TypePattern) -> Rc<[Item]> {
        self.by_type
            .get_or_compute(self.revision, pattern.cache_key(), || {
                self.entities
                    .values()
                    .filter(|item| pattern.matches(item))
                    .cloned()
                    .collect()
            })
    }

    /// Parent chain of `id`, nearest first. Stops at the first unknown parent.
    pub fn ancestors(&self, id: &ItemId) -> Vec<ItemId> {
        let mut chain = Vec::new();
        let mut cursor = self
            .entities
            .get(id)
            .and_then(|item| item.parent_item_id.clone());
        while let Some(parent) = cursor {
            if chain.len() >= self.entities.len() {
                break;
            }
            cursor = self
                .entities
                .get(&parent)
                .and_then(|item| item.parent_item_id.clone());
            chain.push(parent);
        }
        chain
    }

    pub fn child_count(&self, parent: &ItemId) -> usize {
        self.entities
            .values()
            .filter(|item| item.parent_item_id.as_ref() == Some(parent))
            .count()
    }

    /// Open slots of a sized container. `None` for unknown items and unbounded containers.
    pub fn free_slots(&self, container: &ItemId) -> Option<usize> {
        let size = self.entities.get(container)?.size? as usize;
        Some(size.saturating_sub(self.child_count(container)))
    }

    /// Changes every time the item collection is replaced or mutated.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn first_cycle(entities: &IndexMap<ItemId, Item>) -> Option<ItemId> {
    for id in entities.keys() {
        let mut seen = HashSet::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if !seen.insert(current) {
                return Some(id.clone());
            }
            cursor = entities
                .get(current)
                .and_then(|item| item.parent_item_id.as_ref());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn seeded() -> ItemStore {
        let mut store = ItemStore::new();
        store
            .init_items(vec![
                Item::new("1", "container:bag", "Bag 1").with_size(3),
                Item::new("2", "container:bag", "Bag 2").with_size(2),
                Item::new("3", "resource:stone", "Stone").with_parent("1"),
                Item::new("4", "resource:wheat", "Wheat").with_parent("2"),
                Item::new("5", "resource:wood", "Wood").with_parent("1"),
                Item::new("6", "worker:main", "Worker"),
            ])
            .expect("seed items");
        store
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn children_are_listed_in_insertion_order() {
        let store = seeded();
        let bag = ItemId::from("1");
        assert_eq!(ids(&store.select_items_by_parent_item_id(Some(&bag))), ["3", "5"]);
        assert_eq!(ids(&store.select_items_by_parent_item_id(None)), ["1", "2", "6"]);
    }

    #[test]
    fn move_item_reparents_and_invalidates_parent_selector() {
        let mut store = seeded();
        let bag1 = ItemId::from("1");
        let bag2 = ItemId::from("2");
        let before = store.select_items_by_parent_item_id(Some(&bag1));

        assert!(store.move_item(&ItemId::from("3"), Some(bag2.clone())));

        let after = store.select_items_by_parent_item_id(Some(&bag1));
        assert!(!Rc::ptr_eq(&before, &after));
        assert_eq!(ids(&after), ["5"]);
        assert_eq!(ids(&store.select_items_by_parent_item_id(Some(&bag2))), ["3", "4"]);
    }

    #[test]
    fn selector_result_is_shared_while_collection_is_unchanged() {
        let store = seeded();
        let bag = ItemId::from("1");
        let first = store.select_items_by_parent_item_id(Some(&bag));
        let second = store.select_items_by_parent_item_id(Some(&bag));
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn move_of_unknown_item_changes_nothing() {
        let mut store = seeded();
        let before = store.clone();
        let revision = store.revision();

        assert!(!store.move_item(&ItemId::from("missing"), Some(ItemId::from("1"))));

        assert_eq!(store, before);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn move_refuses_to_create_cycles() {
        let mut store = seeded();
        assert!(store.move_item(&ItemId::from("2"), Some(ItemId::from("1"))));

        assert!(!store.move_item(&ItemId::from("1"), Some(ItemId::from("2"))));
        assert!(!store.move_item(&ItemId::from("1"), Some(ItemId::from("1"))));
        assert_eq!(store.select_item_by_id(&ItemId::from("1")).unwrap().parent_item_id, None);
    }

    #[test]
    fn init_rejects_cyclic_sets_without_partial_application() {
        let mut store = seeded();
        let err = store
            .init_items(vec![
                Item::new("a", "container:bag", "A").with_parent("b"),
                Item::new("b", "container:bag", "B").with_parent("a"),
            ])
            .unwrap_err();

        assert!(matches!(err, ItemSetError::Cycle { .. }));
        assert_eq!(store.select_total_items(), 6);
    }

    #[test]
    fn init_keeps_first_position_for_duplicate_ids() {
        let mut store = ItemStore::new();
        store
            .init_items(vec![
                Item::new("1", "resource:wood", "Old"),
                Item::new("2", "resource:stone", "Stone"),
                Item::new("1", "resource:wood", "New"),
            ])
            .unwrap();

        let names: Vec<_> = store.select_all_items().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["New", "Stone"]);
    }

    #[test]
    fn type_patterns_select_families_prefixes_and_regexes() {
        let store = seeded();
        let by_family = store.select_items_by_type(&TypePattern::Family(ItemFamily::Container));
        let by_regex = store.select_items_by_type(&TypePattern::regex("^container").unwrap());
        let by_prefix = store.select_items_by_type(&TypePattern::Prefix("resource:w".into()));

        assert_eq!(ids(&by_family), ["1", "2"]);
        assert_eq!(ids(&by_regex), ["1", "2"]);
        assert_eq!(ids(&by_prefix), ["4", "5"]);
    }

    #[test]
    fn unknown_family_named_like_a_known_one_is_cached_separately() {
        let store = seeded();
        let containers = store.select_items_by_type(&TypePattern::Family(ItemFamily::Container));
        let lookalike = TypePattern::Family(ItemFamily::Other("container".into()));

        let cached = store.select_items_by_type(&lookalike);
        let direct: Vec<&str> = store
            .select_all_items()
            .filter(|item| lookalike.matches(item))
            .map(|item| item.id.as_str())
            .collect();

        assert_eq!(ids(&containers), ["1", "2"]);
        assert_eq!(ids(&cached), direct);
        assert!(cached.is_empty());
    }

    #[test]
    fn regex_and_prefix_with_same_text_are_cached_separately() {
        let store = seeded();
        let by_prefix = store.select_items_by_type(&TypePattern::Prefix("resource:w.*".into()));
        let by_regex = store.select_items_by_type(&TypePattern::regex("resource:w.*").unwrap());

        assert!(by_prefix.is_empty());
        assert_eq!(ids(&by_regex), ["4", "5"]);
    }

    #[test]
    fn free_slots_tracks_children() {
        let store = seeded();
        assert_eq!(store.free_slots(&ItemId::from("1")), Some(1));
        assert_eq!(store.free_slots(&ItemId::from("2")), Some(1));
        assert_eq!(store.free_slots(&ItemId::from("6")), None);
        assert_eq!(store.ancestors(&ItemId::from("3")), vec![ItemId::from("1")]);
    }
}
