use inventory_store::{DesktopAction, WindowId};
use leptos::{html, *};

use super::bag::BagContents;
use crate::gestures::{use_draggable, use_resizeable, DragBinding};
use crate::runtime_context::use_desktop_runtime;

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let config = runtime.config.get_value();

    let window = {
        let window_id = window_id.clone();
        Signal::derive(move || {
            runtime
                .store
                .with(|store| store.windows.select_window_by_id(&window_id).cloned())
        })
    };
    let stack_index = {
        let window_id = window_id.clone();
        Signal::derive(move || {
            runtime.store.with(|store| {
                store
                    .windows
                    .select_all_windows()
                    .iter()
                    .position(|w| w.id == window_id)
            })
        })
    };
    let is_focused = {
        let window_id = window_id.clone();
        Signal::derive(move || {
            runtime
                .store
                .with(|store| store.windows.focused_window_id().as_ref() == Some(&window_id))
        })
    };

    let frame = create_node_ref::<html::Div>();
    let drag = use_draggable(
        frame,
        DragBinding {
            bounds: runtime.viewport.into(),
            start_gate: config.drag.window_gate,
            report_drop_target: false,
            on_drag_start: None,
            on_drag_end: None,
        },
    );
    let resize = use_resizeable(frame, config.window.resize);

    let focus = {
        let window_id = window_id.clone();
        move |_: web_sys::PointerEvent| {
            if !is_focused.get_untracked() {
                runtime.dispatch_action(DesktopAction::FocusWindow {
                    window_id: window_id.clone(),
                });
            }
        }
    };
    let close = {
        let window_id = window_id.clone();
        move |_| {
            runtime.dispatch_action(DesktopAction::CloseWindow {
                window_id: window_id.clone(),
            })
        }
    };

    // Position and size belong to the element once mounted; only the stacking order is reactive.
    let initial_style = config.initial_window_style(stack_index.get_untracked().unwrap_or(0));
    let title = move || window.get().map(|w| w.title).unwrap_or_default();
    let body = match window.get_untracked().and_then(|w| w.bag_item_id()) {
        Some(container_id) => view! { <BagContents container_id /> }.into_view(),
        None => view! { <div class="window-empty"></div> }.into_view(),
    };

    let drag_handle = drag.handle;
    let resize_handle = resize.handle;

    view! {
        <div
            node_ref=frame
            class="desktop-window"
            class:focused=move || is_focused.get()
            style=initial_style
            style:z-index=move || stack_index.get().map(|index| (index + 1).to_string())
            role="dialog"
            aria-label=title
            data-window-id=window_id.to_string()
            data-drop-blocked="true"
            on:pointerdown=focus
        >
            <div
                node_ref=drag_handle
                class="window-titlebar"
                on:pointerdown=move |ev| drag.on_pointerdown.call(ev)
            >
                <span class="window-title">{title}</span>
                <button
                    type="button"
                    class="window-close"
                    aria-label="Close window"
                    on:pointerdown=|ev: web_sys::PointerEvent| ev.stop_propagation()
                    on:click=close
                >
                    "x"
                </button>
            </div>
            <div class="window-body">{body}</div>
            <div
                node_ref=resize_handle
                class="window-resize-handle"
                aria-hidden="true"
                on:pointerdown=move |ev| resize.on_pointerdown.call(ev)
            ></div>
        </div>
    }
}
