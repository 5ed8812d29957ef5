//! Leptos runtime for the inventory desktop: provider, effect executor, gesture bindings and the
//! window and bag components built on [`inventory_store`] and [`pointer_gestures`].

pub mod components;
pub mod config;
pub mod drop_target;
mod effect_executor;
pub mod gestures;
mod runtime_context;
mod viewport;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ConfigError, DesktopConfig, DragConfig, LauncherConfig, WindowConfig};
pub use drop_target::DropTarget;
pub use effect_executor::{describe_effect, orphaned_bag_windows};
