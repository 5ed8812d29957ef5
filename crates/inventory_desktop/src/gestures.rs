//! DOM bindings for the drag and resize state machines in [`pointer_gestures`].
//!
//! Each binding owns its engine in a [`StoredValue`], receives the press on its handle element and
//! follows the pointer through window-level `pointermove`/`pointerup` listeners so the gesture
//! survives the pointer leaving the handle. Positions and sizes are written straight onto the
//! target element's inline style; the store never sees them.

use std::time::Duration;

use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::{html, *};
use pointer_gestures::{
    AppliedSize, Bounds, DragGesture, DragOptions, Point, PressOutcome, PressToken, Rect,
    ResizeGesture, ResizeOptions, StartGate,
};
use wasm_bindgen::JsCast;

use crate::drop_target::DROP_ZONE_SELECTOR;

/// Target element shared by a draggable and a resizable binding.
pub type GestureTarget = NodeRef<html::Div>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStartEvent {
    pub pointer: Point,
}

#[derive(Debug, Clone)]
pub struct DragEndEvent {
    pub pointer: Point,
    /// `false` for a press released before the start gate opened (a click).
    pub started: bool,
    /// Nearest drop zone under the pointer, excluding the dragged element itself.
    pub drop_zone: Option<web_sys::Element>,
}

#[derive(Clone, Copy)]
pub struct DragBinding {
    pub bounds: Signal<Bounds>,
    pub start_gate: StartGate,
    pub report_drop_target: bool,
    pub on_drag_start: Option<Callback<DragStartEvent>>,
    pub on_drag_end: Option<Callback<DragEndEvent>>,
}

#[derive(Clone, Copy)]
/// Handle ref and press callback to wire onto the element that starts the gesture.
pub struct GestureHandle {
    pub handle: NodeRef<html::Div>,
    pub on_pointerdown: Callback<web_sys::PointerEvent>,
}

pub fn pointer_of(ev: &web_sys::PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn measure(element: &web_sys::Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn set_px(element: &web_sys::HtmlElement, property: &str, value: f64) {
    if let Err(err) = element.style().set_property(property, &format!("{value}px")) {
        logging::warn!("failed to set {property}: {err:?}");
    }
}

fn apply_origin(element: &web_sys::HtmlElement, origin: Point) {
    set_px(element, "left", origin.x);
    set_px(element, "top", origin.y);
}

fn apply_size(element: &web_sys::HtmlElement, applied: AppliedSize) {
    set_px(element, "width", applied.size.width);
    set_px(element, "height", applied.size.height);
    if let Some(max) = applied.max {
        set_px(element, "max-width", max.width);
        set_px(element, "max-height", max.height);
    }
}

/// Removes the inline position a drag left behind so the element returns to layout flow.
pub fn clear_position(target: GestureTarget) {
    if let Some(element) = target.get_untracked() {
        let raw: &web_sys::HtmlElement = &element;
        let style = raw.style();
        for property in ["left", "top"] {
            if let Err(err) = style.remove_property(property) {
                logging::warn!("failed to clear {property}: {err:?}");
            }
        }
    }
}

/// Topmost drop zone under `pointer` that is not inside `dragged`.
fn resolve_drop_zone(pointer: Point, dragged: Option<&web_sys::Node>) -> Option<web_sys::Element> {
    let stack = document().elements_from_point(pointer.x as f32, pointer.y as f32);
    stack
        .iter()
        .filter_map(|value| value.dyn_into::<web_sys::Element>().ok())
        .find(|element| {
            let node: &web_sys::Node = element;
            !dragged.is_some_and(|dragged| dragged.contains(Some(node)))
        })
        .and_then(|element| element.closest(DROP_ZONE_SELECTOR).ok().flatten())
}

fn cancel_pending(pending: StoredValue<Option<TimeoutHandle>>) {
    if let Some(handle) = pending.try_update_value(Option::take).flatten() {
        handle.clear();
    }
}

fn notify_start(callback: Option<Callback<DragStartEvent>>, pointer: Point) {
    if let Some(callback) = callback {
        callback.call(DragStartEvent { pointer });
    }
}

fn schedule_start(
    engine: StoredValue<DragGesture>,
    pending: StoredValue<Option<TimeoutHandle>>,
    on_drag_start: Option<Callback<DragStartEvent>>,
    token: PressToken,
    pointer: Point,
    delay: Duration,
) {
    let fire = move || {
        pending.set_value(None);
        let started = engine
            .try_update_value(|drag| drag.start_elapsed(token))
            .unwrap_or(false);
        if started {
            notify_start(on_drag_start, pointer);
        }
    };
    match set_timeout_with_handle(fire, delay) {
        Ok(handle) => pending.set_value(Some(handle)),
        Err(err) => logging::warn!("failed to schedule drag start: {err:?}"),
    }
}

/// Makes `target` follow the pointer while its handle is pressed.
pub fn use_draggable(target: GestureTarget, binding: DragBinding) -> GestureHandle {
    let handle = create_node_ref::<html::Div>();
    let engine = store_value(DragGesture::new(DragOptions {
        bounds: binding.bounds.get_untracked(),
        start_gate: binding.start_gate,
        report_drop_target: binding.report_drop_target,
    }));
    let pending = store_value(None::<TimeoutHandle>);
    let DragBinding {
        bounds,
        on_drag_start,
        on_drag_end,
        ..
    } = binding;

    let on_pointerdown = Callback::new(move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let pointer = pointer_of(&ev);
        let measured = handle.get_untracked().map(|element| measure(&element));
        let outcome = engine
            .try_update_value(|drag| drag.pointer_down(pointer, measured))
            .unwrap_or(PressOutcome::Ignored);
        let PressOutcome::Pressed {
            token,
            start_after,
            started,
        } = outcome
        else {
            return;
        };

        ev.prevent_default();
        cancel_pending(pending);
        if started {
            notify_start(on_drag_start, pointer);
        }
        if let Some(delay) = start_after {
            schedule_start(engine, pending, on_drag_start, token, pointer, delay);
        }
    });

    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        if !engine.try_with_value(DragGesture::is_active).unwrap_or(false) {
            return;
        }
        let Some(element) = target.get_untracked() else {
            return;
        };
        let size = measure(&element).size();
        let pointer = pointer_of(&ev);
        let moved = engine
            .try_update_value(|drag| {
                drag.set_bounds(bounds.get_untracked());
                drag.pointer_move(pointer, Some(size))
            })
            .unwrap_or_default();
        if moved.started {
            notify_start(on_drag_start, pointer);
        }
        if let Some(origin) = moved.origin {
            apply_origin(&element, origin);
        }
    });

    let up_listener = window_event_listener(ev::pointerup, move |ev| {
        let pointer = pointer_of(&ev);
        let Some(release) = engine
            .try_update_value(|drag| drag.pointer_up(pointer))
            .flatten()
        else {
            return;
        };
        if release.cancelled_pending_start {
            cancel_pending(pending);
        }
        let drop_zone = if release.report_drop_target {
            let dragged = target.get_untracked();
            resolve_drop_zone(pointer, dragged.as_deref().map(|div| div.unchecked_ref::<web_sys::Node>()))
        } else {
            None
        };
        if let Some(callback) = on_drag_end {
            callback.call(DragEndEvent {
                pointer,
                started: release.started,
                drop_zone,
            });
        }
    });

    on_cleanup(move || {
        move_listener.remove();
        up_listener.remove();
        cancel_pending(pending);
    });

    GestureHandle {
        handle,
        on_pointerdown,
    }
}

/// Resizes `target` from its bottom-right corner while the handle is pressed.
pub fn use_resizeable(target: GestureTarget, options: ResizeOptions) -> GestureHandle {
    let handle = create_node_ref::<html::Div>();
    let engine = store_value(ResizeGesture::new(options));

    let on_pointerdown = Callback::new(move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let measured = target.get_untracked().map(|element| measure(&element));
        let pressed = engine
            .try_update_value(|resize| resize.pointer_down(pointer_of(&ev), measured))
            .unwrap_or(false);
        if pressed {
            ev.prevent_default();
        }
    });

    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        if !engine.try_with_value(ResizeGesture::is_active).unwrap_or(false) {
            return;
        }
        let Some(element) = target.get_untracked() else {
            return;
        };
        let measured = measure(&element);
        let applied = engine
            .try_update_value(|resize| resize.pointer_move(pointer_of(&ev), Some(measured)))
            .flatten();
        if let Some(applied) = applied {
            apply_size(&element, applied);
        }
    });

    let up_listener = window_event_listener(ev::pointerup, move |_| {
        let _ = engine.try_update_value(ResizeGesture::pointer_up);
    });

    on_cleanup(move || {
        move_listener.remove();
        up_listener.remove();
    });

    GestureHandle {
        handle,
        on_pointerdown,
    }
}
