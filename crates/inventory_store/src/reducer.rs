//! Store commands, emitted effects, and the transition function that applies them.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::items::{ItemSetError, ItemStore};
use crate::model::{Item, ItemId, OpenWindowRequest, WindowId, WindowRecord};
use crate::placement::{check_move, MoveCheck, PlacementError};
use crate::windows::WindowStore;

/// Items and windows behind one explicitly constructed instance.
///
/// Starts empty and lives for as long as its owner keeps it.
#[derive(Clone)]
pub struct DesktopStore {
    pub items: ItemStore,
    pub windows: WindowStore,
    clock: Rc<dyn Clock>,
}

impl fmt::Debug for DesktopStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesktopStore")
            .field("items", &self.items)
            .field("windows", &self.windows)
            .finish_non_exhaustive()
    }
}

impl PartialEq for DesktopStore {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items && self.windows == other.windows
    }
}

impl Default for DesktopStore {
    fn default() -> Self {
        Self::with_clock(Rc::new(SystemClock))
    }
}

impl DesktopStore {
    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            items: ItemStore::new(),
            windows: WindowStore::new(),
            clock,
        }
    }

    /// Pair of collection revisions; differs whenever any command changed state.
    pub fn revision(&self) -> (u64, u64) {
        (self.items.revision(), self.windows.revision())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Commands accepted by [`reduce_desktop`].
pub enum DesktopAction {
    /// Replace every item.
    InitItems(Vec<Item>),
    /// Reparent one item; `parent: None` moves it to root level.
    MoveItem {
        item_id: ItemId,
        parent: Option<ItemId>,
    },
    /// Replace every window.
    InitWindows(Vec<WindowRecord>),
    OpenWindow(OpenWindowRequest),
    CloseWindow { window_id: WindowId },
    FocusWindow { window_id: WindowId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What changed, for the runtime to react to after a command.
pub enum StoreEffect {
    ItemsReplaced { count: usize },
    ItemMoved {
        item_id: ItemId,
        from: Option<ItemId>,
        to: Option<ItemId>,
    },
    WindowsReplaced { count: usize },
    WindowOpened(WindowId),
    WindowClosed(WindowId),
    WindowFocused(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Commands refused because applying them would break a store invariant.
pub enum ReducerError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    ItemSet(#[from] ItemSetError),
}

/// Applies one command.
///
/// Commands naming an unknown item or window, and opens that reuse a live window id, change
/// nothing and return no effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when an item set contains a parent cycle or a move breaks placement
/// rules. The store is left untouched in that case.
pub fn reduce_desktop(
    store: &mut DesktopStore,
    action: DesktopAction,
) -> Result<Vec<StoreEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::InitItems(items) => {
            store.items.init_items(items)?;
            effects.push(StoreEffect::ItemsReplaced {
                count: store.items.select_total_items(),
            });
        }
        DesktopAction::MoveItem { item_id, parent } => {
            match check_move(&store.items, &item_id, parent.as_ref())? {
                MoveCheck::Missing | MoveCheck::Unchanged => {}
                MoveCheck::Allowed => {
                    let from = store
                        .items
                        .select_item_by_id(&item_id)
                        .and_then(|item| item.parent_item_id.clone());
                    if store.items.move_item(&item_id, parent.clone()) {
                        effects.push(StoreEffect::ItemMoved {
                            item_id,
                            from,
                            to: parent,
                        });
                    }
                }
            }
        }
        DesktopAction::InitWindows(windows) => {
            store.windows.init_windows(windows);
            effects.push(StoreEffect::WindowsReplaced {
                count: store.windows.select_total_windows(),
            });
        }
        DesktopAction::OpenWindow(req) => {
            let now = store.clock.now_ms();
            if let Some(window_id) = store.windows.open_window(req, now) {
                effects.push(StoreEffect::WindowOpened(window_id));
            }
        }
        DesktopAction::CloseWindow { window_id } => {
            if store.windows.close_window(&window_id) {
                effects.push(StoreEffect::WindowClosed(window_id));
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            let now = store.clock.now_ms();
            if store.windows.focus_window(&window_id, now) {
                effects.push(StoreEffect::WindowFocused(window_id));
            }
        }
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::clock::ManualClock;
    use crate::model::WindowKind;

    fn store() -> (DesktopStore, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new(1_000));
        let mut store = DesktopStore::with_clock(clock.clone());
        reduce_desktop(
            &mut store,
            DesktopAction::InitItems(vec![
                Item::new("1", "container:bag", "Bag 1").with_size(2),
                Item::new("2", "container:bag", "Bag 2").with_size(2),
                Item::new("3", "resource:stone", "Stone").with_parent("1"),
                Item::new("4", "resource:wheat", "Wheat").with_parent("2"),
                Item::new("5", "resource:wood", "Wood").with_parent("1"),
            ]),
        )
        .expect("init items");
        (store, clock)
    }

    #[test]
    fn move_item_emits_from_and_to() {
        let (mut store, _) = store();
        let effects = reduce_desktop(
            &mut store,
            DesktopAction::MoveItem {
                item_id: ItemId::from("5"),
                parent: Some(ItemId::from("2")),
            },
        )
        .unwrap();

        assert_eq!(
            effects,
            vec![StoreEffect::ItemMoved {
                item_id: ItemId::from("5"),
                from: Some(ItemId::from("1")),
                to: Some(ItemId::from("2")),
            }]
        );
    }

    #[test]
    fn overflowing_move_is_rejected_without_state_change() {
        let (mut store, _) = store();
        reduce_desktop(
            &mut store,
            DesktopAction::MoveItem {
                item_id: ItemId::from("5"),
                parent: Some(ItemId::from("2")),
            },
        )
        .unwrap();
        let before = store.clone();

        let err = reduce_desktop(
            &mut store,
            DesktopAction::MoveItem {
                item_id: ItemId::from("3"),
                parent: Some(ItemId::from("2")),
            },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ReducerError::Placement(PlacementError::ContainerFull { capacity: 2, .. })
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let (mut store, _) = store();
        let before = store.clone();
        let revision = store.revision();

        for action in [
            DesktopAction::MoveItem {
                item_id: ItemId::from("404"),
                parent: None,
            },
            DesktopAction::CloseWindow {
                window_id: WindowId::new("404"),
            },
            DesktopAction::FocusWindow {
                window_id: WindowId::new("404"),
            },
        ] {
            assert_eq!(reduce_desktop(&mut store, action), Ok(vec![]));
        }
        assert_eq!(store, before);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn focus_uses_clock_and_raises_window() {
        let (mut store, clock) = store();
        let open = |store: &mut DesktopStore, title: &str| {
            match reduce_desktop(
                store,
                DesktopAction::OpenWindow(OpenWindowRequest::new(title, WindowKind::Plain)),
            )
            .unwrap()
            .as_slice()
            {
                [StoreEffect::WindowOpened(id)] => id.clone(),
                other => panic!("unexpected effects {other:?}"),
            }
        };
        let first = open(&mut store, "first");
        clock.advance(50);
        let second = open(&mut store, "second");
        assert_eq!(store.windows.focused_window_id(), Some(second.clone()));

        clock.advance(50);
        let effects = reduce_desktop(
            &mut store,
            DesktopAction::FocusWindow {
                window_id: first.clone(),
            },
        )
        .unwrap();

        assert_eq!(effects, vec![StoreEffect::WindowFocused(first.clone())]);
        assert_eq!(store.windows.focused_window_id(), Some(first.clone()));
        assert_eq!(
            store.windows.select_window_by_id(&first).unwrap().focused_at,
            1_100
        );
    }

    #[test]
    fn replaced_count_reflects_merged_duplicate_ids() {
        let (mut store, _) = store();
        let effects = reduce_desktop(
            &mut store,
            DesktopAction::InitItems(vec![
                Item::new("1", "container:bag", "Bag").with_size(2),
                Item::new("2", "resource:wood", "Wood").with_parent("1"),
                Item::new("2", "resource:wood", "Oak").with_parent("1"),
            ]),
        )
        .unwrap();

        assert_eq!(effects, vec![StoreEffect::ItemsReplaced { count: 2 }]);
        assert_eq!(store.items.select_total_items(), 2);
    }

    #[test]
    fn cyclic_item_set_is_refused() {
        let (mut store, _) = store();
        let err = reduce_desktop(
            &mut store,
            DesktopAction::InitItems(vec![Item::new("loop", "container:bag", "Loop").with_parent("loop")]),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ReducerError::ItemSet(ItemSetError::Cycle {
                item: ItemId::from("loop")
            })
        );
        assert_eq!(store.items.select_total_items(), 5);
    }
}
