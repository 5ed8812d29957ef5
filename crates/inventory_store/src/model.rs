use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Launch parameter key that names the container a bag window shows.
pub const BAG_ITEM_PARAM: &str = "item_id";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Behavioral family of an item, taken from the text before the first `:` of its type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemFamily {
    Container,
    Resource,
    Worker,
    Other(String),
}

impl ItemFamily {
    pub fn parse(family: &str) -> Self {
        match family {
            "container" => Self::Container,
            "resource" => Self::Resource,
            "worker" => Self::Worker,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Container => "container",
            Self::Resource => "resource",
            Self::Worker => "worker",
            Self::Other(other) => other,
        }
    }
}

/// Hierarchical type tag such as `container:bag` or `resource:wood`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ItemType {
    raw: String,
    family: ItemFamily,
}

impl ItemType {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let family = ItemFamily::parse(raw.split(':').next().unwrap_or_default());
        Self { raw, family }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn family(&self) -> &ItemFamily {
        &self.family
    }

    /// Variant inside the family (`bag` for `container:bag`), if any.
    pub fn variant(&self) -> Option<&str> {
        self.raw.split_once(':').map(|(_, variant)| variant)
    }
}

impl From<String> for ItemType {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ItemType> for String {
    fn from(value: ItemType) -> Self {
        value.raw
    }
}

impl From<&str> for ItemType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub parent_item_id: Option<ItemId>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
    /// Slot capacity. `None` means unbounded.
    #[serde(default)]
    pub size: Option<u32>,
}

impl Item {
    pub fn new(id: impl Into<String>, item_type: impl Into<ItemType>, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            parent_item_id: None,
            item_type: item_type.into(),
            name: name.into(),
            size: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_item_id = Some(ItemId::new(parent));
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Items declaring a size are containers regardless of their family.
    pub fn is_container(&self) -> bool {
        self.size.is_some() || self.item_type.family() == &ItemFamily::Container
    }

    pub fn is_worker(&self) -> bool {
        self.item_type.family() == &ItemFamily::Worker
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn generated(seq: u64) -> Self {
        Self(format!("window-{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Selects which body variant renders a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Bag,
    #[default]
    Plain,
}

pub type WindowParams = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub kind: WindowKind,
    #[serde(default)]
    pub params: WindowParams,
    pub focused_at: u64,
}

impl WindowRecord {
    /// Container shown by a bag window.
    pub fn bag_item_id(&self) -> Option<ItemId> {
        if self.kind != WindowKind::Bag {
            return None;
        }
        self.params
            .get(BAG_ITEM_PARAM)
            .and_then(Value::as_str)
            .map(ItemId::from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub title: String,
    #[serde(default)]
    pub kind: WindowKind,
    #[serde(default)]
    pub params: WindowParams,
    #[serde(default)]
    pub id: Option<WindowId>,
}

impl OpenWindowRequest {
    pub fn new(title: impl Into<String>, kind: WindowKind) -> Self {
        Self {
            title: title.into(),
            kind,
            params: WindowParams::new(),
            id: None,
        }
    }

    pub fn bag(title: impl Into<String>, item_id: &ItemId) -> Self {
        let mut req = Self::new(title, WindowKind::Bag);
        req.params.insert(
            BAG_ITEM_PARAM.to_string(),
            Value::String(item_id.as_str().to_string()),
        );
        req
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(WindowId::new(id));
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn type_tag_parses_family_and_variant() {
        let bag = ItemType::new("container:bag");
        assert_eq!(bag.family(), &ItemFamily::Container);
        assert_eq!(bag.variant(), Some("bag"));

        let odd = ItemType::new("trinket");
        assert_eq!(odd.family(), &ItemFamily::Other("trinket".to_string()));
        assert_eq!(odd.variant(), None);
    }

    #[test]
    fn sized_items_are_containers_even_outside_the_container_family() {
        let crate_item = Item::new("1", "furniture:chest", "Chest").with_size(4);
        let wood = Item::new("2", "resource:wood", "Wood");
        let vault = Item::new("3", "container:vault", "Vault");

        assert!(crate_item.is_container());
        assert!(!wood.is_container());
        assert!(vault.is_container());
    }

    #[test]
    fn item_serializes_type_as_raw_tag() {
        let item = Item::new("3", "resource:stone", "Stone").with_parent("1");
        let json = serde_json::to_value(&item).expect("serialize item");
        assert_eq!(json["type"], "resource:stone");
        assert_eq!(json["parent_item_id"], "1");

        let back: Item = serde_json::from_value(json).expect("deserialize item");
        assert_eq!(back, item);
    }

    #[test]
    fn bag_window_exposes_its_container() {
        let req = OpenWindowRequest::bag("Bag 1", &ItemId::from("1"));
        let record = WindowRecord {
            id: WindowId::new("w"),
            title: req.title,
            kind: req.kind,
            params: req.params,
            focused_at: 0,
        };
        assert_eq!(record.bag_item_id(), Some(ItemId::from("1")));
    }
}
