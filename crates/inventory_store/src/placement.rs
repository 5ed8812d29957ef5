//! Move validation for the item hierarchy.
//!
//! [`ItemStore::move_item`] only guards against cycles. Commands dispatched through
//! [`crate::reduce_desktop`] also run [`check_move`], which rejects moves into non-containers and
//! moves that would overflow a sized container.

use thiserror::Error;

use crate::items::ItemStore;
use crate::model::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCheck {
    /// The item does not exist; the move is a silent no-op.
    Missing,
    /// The item already has the requested parent.
    Unchanged,
    Allowed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("target container {0} does not exist")]
    ParentNotFound(ItemId),
    #[error("item {0} cannot hold other items")]
    NotAContainer(ItemId),
    #[error("moving {item} into {parent} would make it its own ancestor")]
    WouldCreateCycle { item: ItemId, parent: ItemId },
    #[error("container {container} is full ({capacity} slots)")]
    ContainerFull { container: ItemId, capacity: u32 },
}

pub fn check_move(
    items: &ItemStore,
    id: &ItemId,
    new_parent: Option<&ItemId>,
) -> Result<MoveCheck, PlacementError> {
    let Some(item) = items.select_item_by_id(id) else {
        return Ok(MoveCheck::Missing);
    };
    if item.parent_item_id.as_ref() == new_parent {
        return Ok(MoveCheck::Unchanged);
    }
    let Some(parent_id) = new_parent else {
        return Ok(MoveCheck::Allowed);
    };

    let parent = items
        .select_item_by_id(parent_id)
        .ok_or_else(|| PlacementError::ParentNotFound(parent_id.clone()))?;
    if !parent.is_container() {
        return Err(PlacementError::NotAContainer(parent_id.clone()));
    }
    if parent_id == id || items.ancestors(parent_id).contains(id) {
        return Err(PlacementError::WouldCreateCycle {
            item: id.clone(),
            parent: parent_id.clone(),
        });
    }
    if let Some(capacity) = parent.size {
        if items.child_count(parent_id) >= capacity as usize {
            return Err(PlacementError::ContainerFull {
                container: parent_id.clone(),
                capacity,
            });
        }
    }
    Ok(MoveCheck::Allowed)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Item;

    fn store() -> ItemStore {
        let mut items = ItemStore::new();
        items
            .init_items(vec![
                Item::new("pack", "container:bag", "Pack").with_size(1),
                Item::new("vault", "container:vault", "Vault"),
                Item::new("pouch", "container:bag", "Pouch").with_size(2).with_parent("vault"),
                Item::new("gem", "resource:gem", "Gem").with_parent("pack"),
                Item::new("wood", "resource:wood", "Wood"),
            ])
            .unwrap();
        items
    }

    #[test]
    fn full_container_rejects_another_item() {
        let items = store();
        let err = check_move(&items, &ItemId::from("wood"), Some(&ItemId::from("pack"))).unwrap_err();
        assert_eq!(
            err,
            PlacementError::ContainerFull {
                container: ItemId::from("pack"),
                capacity: 1,
            }
        );
    }

    #[test]
    fn unbounded_container_accepts_items() {
        let items = store();
        let check = check_move(&items, &ItemId::from("wood"), Some(&ItemId::from("vault")));
        assert_eq!(check, Ok(MoveCheck::Allowed));
    }

    #[test]
    fn moving_within_the_same_parent_is_unchanged_even_when_full() {
        let items = store();
        let check = check_move(&items, &ItemId::from("gem"), Some(&ItemId::from("pack")));
        assert_eq!(check, Ok(MoveCheck::Unchanged));
    }

    #[test]
    fn resources_cannot_hold_items() {
        let items = store();
        let check = check_move(&items, &ItemId::from("gem"), Some(&ItemId::from("wood")));
        assert_eq!(check, Err(PlacementError::NotAContainer(ItemId::from("wood"))));
    }

    #[test]
    fn container_cannot_move_into_its_descendant() {
        let items = store();
        let check = check_move(&items, &ItemId::from("vault"), Some(&ItemId::from("pouch")));
        assert!(matches!(check, Err(PlacementError::WouldCreateCycle { .. })));
    }

    #[test]
    fn unknown_item_and_root_moves() {
        let items = store();
        assert_eq!(
            check_move(&items, &ItemId::from("ghost"), Some(&ItemId::from("pack"))),
            Ok(MoveCheck::Missing)
        );
        assert_eq!(
            check_move(&items, &ItemId::from("gem"), None),
            Ok(MoveCheck::Allowed)
        );
        assert_eq!(
            check_move(&items, &ItemId::from("gem"), Some(&ItemId::from("nowhere"))),
            Err(PlacementError::ParentNotFound(ItemId::from("nowhere")))
        );
    }
}
