//! Runtime provider and context wiring for the inventory desktop.
//!
//! This module owns the long-lived store signal, the effect queue and the viewport bounds shared
//! by gesture bindings. UI composition stays in [`crate::components`].

use inventory_store::{reduce_desktop, DesktopAction, DesktopStore, StoreEffect};
use leptos::*;
use pointer_gestures::Bounds;

use crate::{config::DesktopConfig, effect_executor, viewport};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    pub config: StoredValue<DesktopConfig>,
    /// Items and windows. Replaced only when a command changed a revision.
    pub store: RwSignal<DesktopStore>,
    /// Effects emitted by dispatch, drained by the effect executor.
    pub effects: RwSignal<Vec<StoreEffect>>,
    /// Area dragged elements are clamped to.
    pub viewport: RwSignal<Bounds>,
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a store command through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and seeds the inventory.
pub fn DesktopProvider(
    /// Overrides the configuration embedded at build time.
    #[prop(optional)]
    config: Option<DesktopConfig>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_else(DesktopConfig::load_or_default);
    let seed = config.items.clone();
    let config = store_value(config);
    let store = create_rw_signal(DesktopStore::default());
    let effects = create_rw_signal(Vec::<StoreEffect>::new());
    let viewport = create_rw_signal(viewport::current_bounds());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut next = store.get_untracked();
        let previous = next.revision();

        match reduce_desktop(&mut next, action) {
            Ok(new_effects) => {
                if next.revision() != previous {
                    store.set(next);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop store rejected command: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        config,
        store,
        effects,
        viewport,
        dispatch,
    };

    provide_context(runtime);

    viewport::install(runtime.viewport);
    effect_executor::install(runtime);
    runtime.dispatch_action(DesktopAction::InitItems(seed));

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
