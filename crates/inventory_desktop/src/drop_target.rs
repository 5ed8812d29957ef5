//! Maps the element under a released item to a move command.
//!
//! Drop zones are marked in markup: `data-drop-container="<item id>"` on anything that shows a
//! container's contents, `data-drop-desktop` on the desktop background where root-level items are
//! listed, and `data-drop-blocked` on surfaces that hold no items (window chrome, plain windows).
//! A release over a blocked surface moves nothing.

use inventory_store::{DesktopAction, ItemId};

pub const CONTAINER_ATTR: &str = "data-drop-container";
pub const DESKTOP_ATTR: &str = "data-drop-desktop";
pub const BLOCKED_ATTR: &str = "data-drop-blocked";
/// Matches any marked surface, for `Element::closest`.
pub const DROP_ZONE_SELECTOR: &str = "[data-drop-container], [data-drop-desktop], [data-drop-blocked]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Container(ItemId),
    /// Root level, outside every container.
    Desktop,
}

impl DropTarget {
    pub fn parent(&self) -> Option<ItemId> {
        match self {
            Self::Container(id) => Some(id.clone()),
            Self::Desktop => None,
        }
    }
}

/// Markers found on the nearest marked element under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneMarkers<'a> {
    pub container: Option<&'a str>,
    pub desktop: bool,
    pub blocked: bool,
}

/// A container marker wins over the others on the same element; a blocked marker wins over the
/// desktop one.
pub fn drop_target_from_attrs(markers: ZoneMarkers<'_>) -> Option<DropTarget> {
    match markers.container.map(str::trim) {
        Some(id) if !id.is_empty() => Some(DropTarget::Container(ItemId::from(id))),
        _ if markers.blocked => None,
        _ if markers.desktop => Some(DropTarget::Desktop),
        _ => None,
    }
}

pub fn drop_target_of(element: &web_sys::Element) -> Option<DropTarget> {
    let container = element.get_attribute(CONTAINER_ATTR);
    drop_target_from_attrs(ZoneMarkers {
        container: container.as_deref(),
        desktop: element.has_attribute(DESKTOP_ATTR),
        blocked: element.has_attribute(BLOCKED_ATTR),
    })
}

pub fn move_for_drop(item_id: &ItemId, target: &DropTarget) -> DesktopAction {
    DesktopAction::MoveItem {
        item_id: item_id.clone(),
        parent: target.parent(),
    }
}
