//! Caravan Domain - the party resource and roster core.
//!
//! Tracks which actors belong to the player's party, their ordering,
//! gold, categorized inventory with capacity clamps, derived battle
//! subsets, aggregate party abilities and menu/target cursor state.
//! External collaborators (actor registry, item catalog, battle flag,
//! refresh sink, vocabulary) are consumed through the traits in
//! [`ports`].

extern crate self as caravan_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod ports;
pub mod value_objects;

pub use aggregates::{Party, MAX_BATTLE_MEMBERS};
pub use entities::{GainOutcome, Inventory, MAX_ITEM_COUNT};
pub use error::DomainError;
pub use ids::{ActorId, ItemId, SkillId};
pub use ports::{ActorRegistry, BattleFlag, ItemCatalog, PartyActor, RefreshSink, Vocabulary};
pub use value_objects::{CharacterPortrait, Gold, ItemKind, ItemRef, PartyAbility};
