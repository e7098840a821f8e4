//! Entities - Objects with identity and mutable state

pub mod inventory;

pub use inventory::{GainOutcome, Inventory, MAX_ITEM_COUNT};
