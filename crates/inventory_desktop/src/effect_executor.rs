//! Drains store effects emitted by dispatch.

use inventory_store::{DesktopAction, DesktopStore, StoreEffect, WindowId};
use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the executor that processes queued store effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            logging::log!("{}", describe_effect(&effect));
            if let StoreEffect::ItemsReplaced { .. } = effect {
                let orphaned = runtime.store.with_untracked(orphaned_bag_windows);
                for window_id in orphaned {
                    runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
                }
            }
        }
    });
}

pub fn describe_effect(effect: &StoreEffect) -> String {
    fn place(parent: &Option<inventory_store::ItemId>) -> String {
        parent
            .as_ref()
            .map(|id| format!("container {id}"))
            .unwrap_or_else(|| "desktop".to_string())
    }

    match effect {
        StoreEffect::ItemsReplaced { count } => format!("inventory loaded with {count} items"),
        StoreEffect::ItemMoved { item_id, from, to } => {
            format!("item {item_id} moved from {} to {}", place(from), place(to))
        }
        StoreEffect::WindowsReplaced { count } => format!("window stack replaced with {count} windows"),
        StoreEffect::WindowOpened(id) => format!("window {id} opened"),
        StoreEffect::WindowClosed(id) => format!("window {id} closed"),
        StoreEffect::WindowFocused(id) => format!("window {id} focused"),
    }
}

/// Bag windows whose container no longer exists.
pub fn orphaned_bag_windows(store: &DesktopStore) -> Vec<WindowId> {
    store
        .windows
        .select_all_windows()
        .iter()
        .filter(|window| {
            window
                .bag_item_id()
                .is_some_and(|item_id| store.items.select_item_by_id(&item_id).is_none())
        })
        .map(|window| window.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use inventory_store::{reduce_desktop, Item, ItemId, OpenWindowRequest, WindowKind};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bag_windows_without_a_container_are_orphaned() {
        let mut store = DesktopStore::default();
        reduce_desktop(
            &mut store,
            DesktopAction::InitItems(vec![Item::new("1", "container:bag", "Bag 1")]),
        )
        .unwrap();
        for req in [
            OpenWindowRequest::bag("Bag 1", &ItemId::from("1")).with_id("kept"),
            OpenWindowRequest::bag("Bag 9", &ItemId::from("9")).with_id("gone"),
            OpenWindowRequest::new("Crafting table", WindowKind::Plain).with_id("plain"),
        ] {
            reduce_desktop(&mut store, DesktopAction::OpenWindow(req)).unwrap();
        }

        assert_eq!(orphaned_bag_windows(&store), vec![WindowId::new("gone")]);
    }

    #[test]
    fn moves_describe_both_ends() {
        let effect = StoreEffect::ItemMoved {
            item_id: ItemId::from("5"),
            from: Some(ItemId::from("1")),
            to: None,
        };
        assert_eq!(
            describe_effect(&effect),
            "item 5 moved from container 1 to desktop"
        );
    }
}
