//! Inventory entity - three bounded per-category counters
//!
//! Each category keeps an independent `ItemId -> count` map with the
//! invariant `0 < count <= MAX_ITEM_COUNT` for every present entry. An
//! entry whose count regresses to zero is removed, never stored as zero.
//! BTreeMaps keep listings in a stable sorted order.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ItemId;
use crate::value_objects::ItemKind;

/// Largest count a single entry can hold.
pub const MAX_ITEM_COUNT: u32 = 99;

/// Result of a single [`Inventory::gain`] application.
///
/// `proposed` is the raw, unclamped total (`previous + amount`). The
/// equipment reconciliation shortage is derived from it rather than from
/// the clamped delta; see [`GainOutcome::shortage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainOutcome {
    /// Count before the change.
    pub previous: u32,
    /// Unclamped total the caller asked for.
    pub proposed: i64,
    /// Count actually stored (0 means the entry was removed).
    pub stored: u32,
}

impl GainOutcome {
    /// How many equipped copies a reconciling loss should discard.
    ///
    /// Computed from the unclamped proposed total, not the inventory
    /// deficit that was actually applied: losing 3 from an empty slot
    /// targets exactly 3 equipped copies. This mirrors the original
    /// behavior and is load-bearing for compatibility.
    pub fn shortage(&self) -> u32 {
        if self.proposed < 0 {
            // proposed >= -(u32::MAX as i64), so the negation fits
            (-self.proposed) as u32
        } else {
            0
        }
    }
}

/// The party's categorized item holdings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    consumables: BTreeMap<ItemId, u32>,
    weapons: BTreeMap<ItemId, u32>,
    armors: BTreeMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn container(&self, kind: ItemKind) -> &BTreeMap<ItemId, u32> {
        match kind {
            ItemKind::Consumable => &self.consumables,
            ItemKind::Weapon => &self.weapons,
            ItemKind::Armor => &self.armors,
        }
    }

    fn container_mut(&mut self, kind: ItemKind) -> &mut BTreeMap<ItemId, u32> {
        match kind {
            ItemKind::Consumable => &mut self.consumables,
            ItemKind::Weapon => &mut self.weapons,
            ItemKind::Armor => &mut self.armors,
        }
    }

    /// Stored count for an entry, 0 if absent.
    pub fn count(&self, kind: ItemKind, id: ItemId) -> u32 {
        self.container(kind).get(&id).copied().unwrap_or(0)
    }

    /// True once an entry has reached [`MAX_ITEM_COUNT`].
    pub fn is_at_cap(&self, kind: ItemKind, id: ItemId) -> bool {
        self.count(kind, id) >= MAX_ITEM_COUNT
    }

    /// True if at least one copy is held.
    pub fn has(&self, kind: ItemKind, id: ItemId) -> bool {
        self.count(kind, id) > 0
    }

    /// Apply a gain (or, for negative amounts, a loss), clamping the new
    /// count into `0..=MAX_ITEM_COUNT` and dropping emptied entries.
    pub fn gain(&mut self, kind: ItemKind, id: ItemId, amount: i32) -> GainOutcome {
        let previous = self.count(kind, id);
        let proposed = i64::from(previous) + i64::from(amount);
        let stored = proposed.clamp(0, i64::from(MAX_ITEM_COUNT)) as u32;

        let container = self.container_mut(kind);
        if stored == 0 {
            container.remove(&id);
        } else {
            container.insert(id, stored);
        }

        GainOutcome {
            previous,
            proposed,
            stored,
        }
    }

    /// Held consumable ids, sorted.
    pub fn consumables(&self) -> Vec<ItemId> {
        self.consumables.keys().copied().collect()
    }

    /// Held weapon ids, sorted.
    pub fn weapons(&self) -> Vec<ItemId> {
        self.weapons.keys().copied().collect()
    }

    /// Held armor ids, sorted.
    pub fn armors(&self) -> Vec<ItemId> {
        self.armors.keys().copied().collect()
    }

    /// Weapons then armors.
    pub fn equip_items(&self) -> Vec<ItemId> {
        let mut ids = self.weapons();
        ids.extend(self.armors());
        ids
    }

    /// Consumables, then weapons, then armors.
    pub fn all_items(&self) -> Vec<ItemId> {
        let mut ids = self.consumables();
        ids.extend(self.equip_items());
        ids
    }
}

/// Intermediate format for deserialization that matches the wire format
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryWireFormat {
    #[serde(default)]
    consumables: BTreeMap<ItemId, u32>,
    #[serde(default)]
    weapons: BTreeMap<ItemId, u32>,
    #[serde(default)]
    armors: BTreeMap<ItemId, u32>,
}

// Hand-written so loaded counts re-enter `1..=MAX_ITEM_COUNT`: a derive
// would store zero and over-cap entries verbatim.
impl<'de> Deserialize<'de> for Inventory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = InventoryWireFormat::deserialize(deserializer)?;

        let mut inventory = Inventory::new();
        let categories = [
            (ItemKind::Consumable, wire.consumables),
            (ItemKind::Weapon, wire.weapons),
            (ItemKind::Armor, wire.armors),
        ];
        for (kind, entries) in categories {
            let container = inventory.container_mut(kind);
            for (id, count) in entries {
                let stored = count.min(MAX_ITEM_COUNT);
                if stored > 0 {
                    container.insert(id, stored);
                }
            }
        }
        Ok(inventory)
    }
}
