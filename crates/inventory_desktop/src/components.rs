//! Desktop shell UI composition.

mod bag;
mod window;

use inventory_store::DesktopAction;
use leptos::*;

use self::{bag::ItemTile, window::DesktopWindow};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Launcher bar, root-level items and the window layer, ordered by focus so the focused window
/// renders last.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let windows = Signal::derive(move || {
        runtime
            .store
            .with(|store| store.windows.select_all_windows())
    });

    view! {
        <div class="desktop-shell" data-drop-desktop="true">
            <Launcher />
            <DesktopItems />
            <div class="desktop-window-layer">
                <For
                    each=move || { windows.get().iter().cloned().collect::<Vec<_>>() }
                    key=|window| window.id.clone()
                    let:window
                >
                    <DesktopWindow window_id=window.id />
                </For>
            </div>
        </div>
    }
}

#[component]
/// Root-level items, so anything dropped on the desktop stays reachable.
fn DesktopItems() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let items = Signal::derive(move || {
        runtime
            .store
            .with(|store| store.items.select_items_by_parent_item_id(None))
    });

    view! {
        <div class="desktop-items">
            <For
                each=move || { items.get().iter().cloned().collect::<Vec<_>>() }
                key=|item| item.id.clone()
                let:item
            >
                <ItemTile item />
            </For>
        </div>
    }
}

#[component]
fn Launcher() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let launchers = runtime.config.with_value(|config| config.launchers.clone());

    view! {
        <nav class="desktop-launcher" aria-label="Open windows">
            {launchers
                .into_iter()
                .map(|launcher| {
                    let label = launcher.label();
                    view! {
                        <button
                            type="button"
                            class="desktop-launcher-button"
                            on:click=move |_| {
                                runtime.dispatch_action(DesktopAction::OpenWindow(launcher.to_request()))
                            }
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
