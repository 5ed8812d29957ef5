//! Normalized entity stores for the inventory desktop.
//!
//! Items form a parent/child hierarchy of containers and their contents; windows form a stack
//! ordered by focus stamp. Both are mutated only through [`reduce_desktop`] commands or their own
//! methods, and both read through memoized selectors keyed by collection revision.

pub mod clock;
pub mod items;
pub mod model;
pub mod placement;
pub mod reducer;
mod selectors;
pub mod windows;

pub use clock::{Clock, ManualClock, SystemClock};
pub use items::{ItemSetError, ItemStore, TypePattern};
pub use model::*;
pub use placement::{check_move, MoveCheck, PlacementError};
pub use reducer::{reduce_desktop, DesktopAction, DesktopStore, ReducerError, StoreEffect};
pub use windows::WindowStore;
