use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier assigned to an item by the controller
pub type ItemId = u32;

/// A single entry on the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: ItemId,
    /// Display name, stored exactly as entered (never blank)
    pub name: String,
    /// Always >= 1
    pub quantity: u32,
}

impl ShoppingItem {
    pub fn new(id: ItemId, name: impl Into<String>, quantity: u32) -> Self {
        ShoppingItem {
            id,
            name: name.into(),
            quantity,
        }
    }
}

/// Display ordering for the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Name,
    Quantity,
}

impl SortMode {
    pub const ALL: [SortMode; 2] = [SortMode::Name, SortMode::Quantity];

    /// Label shown in the UI ("Sort by Name")
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Name => "Name",
            SortMode::Quantity => "Quantity",
        }
    }

    /// Lowercase key used in config files and scripts
    pub fn key(self) -> &'static str {
        match self {
            SortMode::Name => "name",
            SortMode::Quantity => "quantity",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode '{0}' (expected 'name' or 'quantity')")]
pub struct ParseSortModeError(pub String);

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortMode::Name),
            "quantity" | "qty" => Ok(SortMode::Quantity),
            _ => Err(ParseSortModeError(s.to_string())),
        }
    }
}

/// A borrowed, display-ready view of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemView<'a> {
    pub item: &'a ShoppingItem,
    pub is_editing: bool,
}

impl<'a> ItemView<'a> {
    pub fn id(&self) -> ItemId {
        self.item.id
    }

    pub fn name(&self) -> &'a str {
        &self.item.name
    }

    pub fn quantity(&self) -> u32 {
        self.item.quantity
    }

    pub fn to_snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.item.id,
            name: self.item.name.clone(),
            quantity: self.item.quantity,
            is_editing: self.is_editing,
        }
    }
}

/// Owned copy of an item as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub is_editing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_from_str() {
        assert_eq!("name".parse::<SortMode>(), Ok(SortMode::Name));
        assert_eq!("Quantity".parse::<SortMode>(), Ok(SortMode::Quantity));
        assert_eq!(" qty ".parse::<SortMode>(), Ok(SortMode::Quantity));
        assert!("price".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_sort_mode_default_is_name() {
        assert_eq!(SortMode::default(), SortMode::Name);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let item = ShoppingItem::new(3, "Milk", 2);
        let view = ItemView {
            item: &item,
            is_editing: true,
        };
        let json = serde_json::to_string(&view.to_snapshot()).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"name":"Milk","quantity":2,"is_editing":true}"#
        );
    }
}
