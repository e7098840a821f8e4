//! Item category variants

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The three inventory categories.
///
/// The original runtime picked a container by the item's dynamic class;
/// here the category is an explicit closed variant resolved once through
/// the item catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Consumable,
    Weapon,
    Armor,
}

impl ItemKind {
    /// All categories, in listing order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Consumable, ItemKind::Weapon, ItemKind::Armor];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Consumable => "consumable",
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
        }
    }

    /// True for the categories that can be equipped by an actor.
    pub fn is_equippable(&self) -> bool {
        matches!(self, ItemKind::Weapon | ItemKind::Armor)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consumable" => Ok(ItemKind::Consumable),
            "weapon" => Ok(ItemKind::Weapon),
            "armor" => Ok(ItemKind::Armor),
            _ => Err(DomainError::parse(format!("Unknown item kind: {}", s))),
        }
    }
}
