use inventory_desktop::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

const DESKTOP_CSS: &str = r#"
.desktop-shell { position: fixed; inset: 0; overflow: hidden; font-family: sans-serif; background: #2f4f4f; }
.desktop-launcher { display: flex; gap: 8px; padding: 8px; }
.desktop-items { display: flex; flex-wrap: wrap; gap: 6px; padding: 8px; }
.desktop-window { position: fixed; display: flex; flex-direction: column; min-width: 200px; min-height: 200px; background: #f4efe6; border: 1px solid #333; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.4); }
.desktop-window.focused { border-color: #c08a2b; }
.window-titlebar { display: flex; justify-content: space-between; align-items: center; padding: 4px 8px; background: #5a4632; color: #fff; cursor: move; user-select: none; touch-action: none; }
.window-body { flex: 1; overflow: auto; padding: 8px; }
.window-resize-handle { position: absolute; right: 0; bottom: 0; width: 14px; height: 14px; cursor: nwse-resize; touch-action: none; }
.bag-grid { display: grid; grid-template-columns: repeat(auto-fill, 64px); gap: 6px; min-height: 64px; }
.item-tile { width: 64px; height: 64px; background: #d9c7a7; border: 1px solid #7a6040; }
.item-tile.dragging { position: fixed; z-index: 10000; pointer-events: none; opacity: 0.85; }
.item-tile-handle { width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; font-size: 12px; user-select: none; touch-action: none; cursor: grab; }
.bag-status { margin: 6px 0 0; font-size: 11px; color: #555; }
"#;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Inventory Desktop" />
        <Meta name="description" content="Windowed inventory desktop with draggable bags and items." />
        <Style>{DESKTOP_CSS}</Style>

        <main class="site-root">
            <DesktopProvider>
                <DesktopShell />
            </DesktopProvider>
        </main>
    }
}
