//! Aggregates - Consistency boundaries with a single root entity

pub mod party;

pub use party::{Party, MAX_BATTLE_MEMBERS};
