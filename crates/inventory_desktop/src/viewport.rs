//! Browser viewport bounds used to clamp dragged elements.

use leptos::*;
use pointer_gestures::Bounds;

const FALLBACK_WIDTH: f64 = 1280.0;
const FALLBACK_HEIGHT: f64 = 800.0;

#[cfg(target_arch = "wasm32")]
pub fn current_bounds() -> Bounds {
    let browser = window();
    let width = browser
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_WIDTH);
    let height = browser
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_HEIGHT);
    Bounds::viewport(width, height)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_bounds() -> Bounds {
    Bounds::viewport(FALLBACK_WIDTH, FALLBACK_HEIGHT)
}

/// Keeps `viewport` in sync with window resizes for the lifetime of the current owner.
pub fn install(viewport: RwSignal<Bounds>) {
    let resize_listener = window_event_listener(ev::resize, move |_| {
        viewport.set(current_bounds());
    });
    on_cleanup(move || resize_listener.remove());
}
