//! Service interfaces consumed by the party aggregate
//!
//! The original runtime reached for global singletons (actor table, item
//! tables, map refresh flags, battle state). Those collaborators are
//! modeled here as explicit ports passed into each `Party` operation, so
//! the aggregate owns no ambient state.
//!
//! All ports take `&self`, including the mutating actor operations;
//! adapters that need to mutate behind them use interior mutability.

#[cfg(test)]
use mockall::automock;

use crate::ids::{ActorId, ItemId};
use crate::value_objects::{CharacterPortrait, ItemKind, ItemRef, PartyAbility};

/// One actor resolved out of the registry.
///
/// The party never owns actor lifetime or stats; everything it needs is
/// queried through this interface on each access.
pub trait PartyActor: Send + Sync {
    /// Identity within the registry.
    fn id(&self) -> ActorId;

    /// Current level.
    fn level(&self) -> u32;

    /// Display name.
    fn name(&self) -> String;

    /// The "exists" predicate gating battle participation.
    fn exists(&self) -> bool;

    /// Currently equipped item identities, possibly with duplicates
    /// across slots.
    fn equips(&self) -> Vec<ItemId>;

    /// True if any equipment slot holds `item`.
    fn has_equipped(&self, item: ItemId) -> bool {
        self.equips().contains(&item)
    }

    /// Remove one equipped copy of `item`. No-op if none is equipped.
    fn discard_equip(&self, item: ItemId);

    /// Whether this actor contributes the given party-wide ability.
    fn has_party_ability(&self, ability: PartyAbility) -> bool;

    /// Whether this actor can currently use the given skill or item.
    fn can_use(&self, item: ItemRef) -> bool;

    /// Whether this actor can accept battle command input.
    fn inputable(&self) -> bool;

    /// Per-step processing while the player walks.
    fn on_player_walk(&self);

    /// Portrait reference persisted into save-file slots.
    fn portrait(&self) -> CharacterPortrait;
}

/// Resolves actor ids to live actor views. Resolution may fail when an
/// actor no longer exists; the party treats that id as stale.
pub trait ActorRegistry: Send + Sync {
    fn actor(&self, id: ActorId) -> Option<&dyn PartyActor>;
}

/// Static item definition lookup: which category an identity belongs to
/// and whether a consumable is actually consumed on use.
#[cfg_attr(test, automock)]
pub trait ItemCatalog: Send + Sync {
    /// The category an id belongs to, `None` for unknown ids.
    fn kind(&self, id: ItemId) -> Option<ItemKind>;

    /// The `consumable` flag from the item's definition.
    fn is_consumable(&self, id: ItemId) -> bool;
}

/// Externally owned "a battle is running" flag, read-only from the core.
#[cfg_attr(test, automock)]
pub trait BattleFlag: Send + Sync {
    fn in_battle(&self) -> bool;
}

/// Fire-and-forget render invalidation, emitted after a mutation is
/// fully applied. Roster changes dirty both surfaces, order swaps dirty
/// only the player, item changes dirty only the map.
#[cfg_attr(test, automock)]
pub trait RefreshSink: Send + Sync {
    fn mark_player_dirty(&self);
    fn mark_map_dirty(&self);
}

/// Externally supplied wording for the multi-member party name.
#[cfg_attr(test, automock)]
pub trait Vocabulary: Send + Sync {
    /// Format "<leader>'s party" (or the localized equivalent).
    fn party_name(&self, leader: &str) -> String;
}
