use inventory_store::{Item, ItemId};
use leptos::{html, *};

use crate::drop_target::{drop_target_of, move_for_drop};
use crate::gestures::{clear_position, use_draggable, DragBinding, DragEndEvent, DragStartEvent};
use crate::runtime_context::use_desktop_runtime;

#[component]
/// Grid of the items whose parent is `container_id`; dropping an item here moves it in.
pub(super) fn BagContents(container_id: ItemId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let items = {
        let container_id = container_id.clone();
        Signal::derive(move || {
            runtime
                .store
                .with(|store| store.items.select_items_by_parent_item_id(Some(&container_id)))
        })
    };
    let free_slots = {
        let container_id = container_id.clone();
        Signal::derive(move || runtime.store.with(|store| store.items.free_slots(&container_id)))
    };

    view! {
        <div class="bag-grid" data-drop-container=container_id.to_string()>
            <For
                each=move || { items.get().iter().cloned().collect::<Vec<_>>() }
                key=|item| item.id.clone()
                let:item
            >
                <ItemTile item />
            </For>
        </div>
        <p class="bag-status">
            {move || free_slots.get().map(|slots| format!("{slots} free slots")).unwrap_or_default()}
        </p>
    }
}

#[component]
pub(super) fn ItemTile(item: Item) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let gate = runtime.config.with_value(|config| config.drag.item_gate);
    let tile = create_node_ref::<html::Div>();
    let dragging = create_rw_signal(false);

    let on_drag_start = Callback::new(move |_: DragStartEvent| dragging.set(true));
    let on_drag_end = {
        let item_id = item.id.clone();
        Callback::new(move |ev: DragEndEvent| {
            dragging.set(false);
            clear_position(tile);
            if !ev.started {
                return;
            }
            if let Some(target) = ev.drop_zone.as_ref().and_then(drop_target_of) {
                runtime.dispatch_action(move_for_drop(&item_id, &target));
            }
        })
    };
    let drag = use_draggable(
        tile,
        DragBinding {
            bounds: runtime.viewport.into(),
            start_gate: gate,
            report_drop_target: true,
            on_drag_start: Some(on_drag_start),
            on_drag_end: Some(on_drag_end),
        },
    );

    // Containers shown as tiles accept drops too.
    let drop_container = item.is_container().then(|| item.id.to_string());

    let handle = drag.handle;

    view! {
        <div
            node_ref=tile
            class="item-tile"
            class:dragging=move || dragging.get()
            data-item-family=item.item_type.family().as_str().to_string()
            data-drop-container=drop_container
            title=item.item_type.to_string()
        >
            <div
                node_ref=handle
                class="item-tile-handle"
                on:pointerdown=move |ev| drag.on_pointerdown.call(ev)
            >
                {item.name.clone()}
            </div>
        </div>
    }
}
