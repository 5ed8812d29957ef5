//! Desktop configuration embedded from `desktop.toml` at build time.

use inventory_store::{Item, ItemId, ItemSetError, ItemStore, OpenWindowRequest, WindowKind};
use leptos::logging;
use pointer_gestures::{ResizeOptions, ResizePolicy, StartGate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

include!(concat!(env!("OUT_DIR"), "/desktop_config_generated.rs"));

pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopConfig {
    pub schema_version: u32,
    pub window: WindowConfig,
    #[serde(default)]
    pub drag: DragConfig,
    /// Seed inventory dispatched once when the desktop mounts.
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub launchers: Vec<LauncherConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub default_width: f64,
    pub default_height: f64,
    /// Left/top offset of the first window opened.
    pub cascade_origin: f64,
    /// Extra offset for each window below it in the stack.
    pub cascade_step: f64,
    pub resize: ResizeOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    pub window_gate: StartGate,
    pub item_gate: StartGate,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            window_gate: StartGate::Immediate,
            item_gate: StartGate::default(),
        }
    }
}

/// A button that opens a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherConfig {
    pub title: String,
    #[serde(default)]
    pub kind: WindowKind,
    /// Container shown by a bag window.
    #[serde(default)]
    pub item_id: Option<ItemId>,
}

impl LauncherConfig {
    pub fn label(&self) -> String {
        format!("Open {}", self.title)
    }

    pub fn to_request(&self) -> OpenWindowRequest {
        match (&self.kind, &self.item_id) {
            (WindowKind::Bag, Some(item_id)) => OpenWindowRequest::bag(self.title.clone(), item_id),
            (kind, _) => OpenWindowRequest::new(self.title.clone(), *kind),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("desktop config is not valid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported desktop config schema {found}, expected {expected}")]
    Schema { found: u32, expected: u32 },
    #[error("window minimum size must be positive, got {width}x{height}")]
    InvalidMinimum { width: f64, height: f64 },
    #[error("default window size {width}x{height} is below the minimum")]
    DefaultBelowMinimum { width: f64, height: f64 },
    #[error("drag start gate {0:?} is not usable")]
    InvalidGate(StartGate),
    #[error("launcher `{0}` opens a bag without an item id")]
    LauncherWithoutItem(String),
    #[error("launcher `{title}` points at unknown item {item_id}")]
    LauncherUnknownItem { title: String, item_id: ItemId },
    #[error("seed items are invalid: {0}")]
    Items(#[from] ItemSetError),
}

impl DesktopConfig {
    /// Parses and validates the configuration embedded at build time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the embedded document does not deserialize or fails
    /// [`DesktopConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(DESKTOP_CONFIG_JSON)
    }

    /// Falls back to [`DesktopConfig::default`] when the embedded config is unusable.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                logging::warn!("desktop config rejected, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(ConfigError::Schema {
                found: self.schema_version,
                expected: SUPPORTED_SCHEMA_VERSION,
            });
        }

        let window = &self.window;
        let resize = &window.resize;
        if !(resize.min_width > 0.0 && resize.min_height > 0.0) {
            return Err(ConfigError::InvalidMinimum {
                width: resize.min_width,
                height: resize.min_height,
            });
        }
        if window.default_width < resize.min_width || window.default_height < resize.min_height {
            return Err(ConfigError::DefaultBelowMinimum {
                width: window.default_width,
                height: window.default_height,
            });
        }

        for gate in [self.drag.window_gate, self.drag.item_gate] {
            if let StartGate::Distance { pixels } = gate {
                if !(pixels >= 0.0) {
                    return Err(ConfigError::InvalidGate(gate));
                }
            }
        }

        // Reuses the store's own cycle check on the seed.
        let mut seed = ItemStore::new();
        seed.init_items(self.items.clone())?;

        for launcher in &self.launchers {
            if launcher.kind != WindowKind::Bag {
                continue;
            }
            let Some(item_id) = &launcher.item_id else {
                return Err(ConfigError::LauncherWithoutItem(launcher.title.clone()));
            };
            if seed.select_item_by_id(item_id).is_none() {
                return Err(ConfigError::LauncherUnknownItem {
                    title: launcher.title.clone(),
                    item_id: item_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Initial left/top/width/height for a window at `stack_index` in the focus order.
    pub fn initial_window_style(&self, stack_index: usize) -> String {
        let offset = self.window.cascade_origin + self.window.cascade_step * stack_index as f64;
        format!(
            "left:{offset}px;top:{offset}px;width:{}px;height:{}px;",
            self.window.default_width, self.window.default_height
        )
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            schema_version: SUPPORTED_SCHEMA_VERSION,
            window: WindowConfig {
                default_width: 260.0,
                default_height: 240.0,
                cascade_origin: 48.0,
                cascade_step: 24.0,
                resize: ResizeOptions::new(200.0, 200.0).with_policy(ResizePolicy::MirrorMax),
            },
            drag: DragConfig::default(),
            items: vec![
                Item::new("1", "container:bag", "Bag 1").with_size(6),
                Item::new("2", "container:bag", "Bag 2").with_size(4),
                Item::new("3", "resource:stone", "Stone").with_parent("1"),
                Item::new("4", "resource:wheat", "Wheat").with_parent("2"),
                Item::new("5", "resource:wood", "Wood").with_parent("1"),
            ],
            launchers: vec![
                LauncherConfig {
                    title: "Bag 1".to_string(),
                    kind: WindowKind::Bag,
                    item_id: Some(ItemId::from("1")),
                },
                LauncherConfig {
                    title: "Bag 2".to_string(),
                    kind: WindowKind::Bag,
                    item_id: Some(ItemId::from("2")),
                },
                LauncherConfig {
                    title: "Crafting table".to_string(),
                    kind: WindowKind::Plain,
                    item_id: None,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_config_matches_built_in_defaults() {
        let loaded = DesktopConfig::load().expect("embedded config is valid");
        assert_eq!(loaded, DesktopConfig::default());
    }

    #[test]
    fn default_config_validates() {
        assert!(DesktopConfig::default().validate().is_ok());
    }

    #[test]
    fn bag_launcher_must_name_a_seeded_item() {
        let mut config = DesktopConfig::default();
        config.launchers.push(LauncherConfig {
            title: "Lost bag".to_string(),
            kind: WindowKind::Bag,
            item_id: Some(ItemId::from("99")),
        });

        let err = config.validate().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::LauncherUnknownItem { ref item_id, .. } if item_id.as_str() == "99"
        ));
    }

    #[test]
    fn cyclic_seed_is_rejected() {
        let mut config = DesktopConfig::default();
        config.items = vec![
            Item::new("a", "container:bag", "A").with_parent("b"),
            Item::new("b", "container:bag", "B").with_parent("a"),
        ];
        config.launchers.clear();

        assert!(matches!(config.validate(), Err(ConfigError::Items(_))));
    }

    #[test]
    fn schema_mismatch_is_reported() {
        let mut config = DesktopConfig::default();
        config.schema_version = 7;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported desktop config schema 7, expected 1"
        );
    }

    #[test]
    fn default_smaller_than_minimum_is_rejected() {
        let mut config = DesktopConfig::default();
        config.window.default_width = 120.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DefaultBelowMinimum { .. })
        ));
    }

    #[test]
    fn launcher_request_carries_bag_parameter() {
        let config = DesktopConfig::default();
        let bag = config.launchers[0].to_request();
        let plain = config.launchers[2].to_request();

        assert_eq!(bag.kind, WindowKind::Bag);
        assert_eq!(bag.params.get("item_id"), Some(&serde_json::json!("1")));
        assert_eq!(plain.kind, WindowKind::Plain);
        assert!(plain.params.is_empty());
        assert_eq!(config.launchers[2].label(), "Open Crafting table");
    }

    #[test]
    fn windows_cascade_by_stack_position() {
        let config = DesktopConfig::default();
        assert_eq!(
            config.initial_window_style(2),
            "left:96px;top:96px;width:260px;height:240px;"
        );
    }
}
