//! Static item catalog adapter.

use std::collections::HashMap;

use caravan_domain::{ItemCatalog, ItemId, ItemKind};

#[derive(Debug, Clone, Copy)]
struct ItemDef {
    kind: ItemKind,
    consumable: bool,
}

/// Item definitions loaded once and queried by id.
#[derive(Debug, Default)]
pub struct StaticItemCatalog {
    defs: HashMap<ItemId, ItemDef>,
}

impl StaticItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consumable-category item; `consumable` mirrors the
    /// definition flag (false for "precious" items that survive use).
    pub fn with_consumable(mut self, id: ItemId, consumable: bool) -> Self {
        self.defs.insert(
            id,
            ItemDef {
                kind: ItemKind::Consumable,
                consumable,
            },
        );
        self
    }

    pub fn with_weapon(mut self, id: ItemId) -> Self {
        self.defs.insert(
            id,
            ItemDef {
                kind: ItemKind::Weapon,
                consumable: false,
            },
        );
        self
    }

    pub fn with_armor(mut self, id: ItemId) -> Self {
        self.defs.insert(
            id,
            ItemDef {
                kind: ItemKind::Armor,
                consumable: false,
            },
        );
        self
    }
}

impl ItemCatalog for StaticItemCatalog {
    fn kind(&self, id: ItemId) -> Option<ItemKind> {
        self.defs.get(&id).map(|def| def.kind)
    }

    fn is_consumable(&self, id: ItemId) -> bool {
        self.defs.get(&id).map(|def| def.consumable).unwrap_or(false)
    }
}
