//! Battle-state flag adapter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use caravan_domain::BattleFlag;

/// Cloneable handle onto the externally owned "a battle is running"
/// flag. Battle orchestration sets it; the party core only reads it.
#[derive(Debug, Clone, Default)]
pub struct SharedBattleFlag {
    in_battle: Arc<AtomicBool>,
}

impl SharedBattleFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, in_battle: bool) {
        self.in_battle.store(in_battle, Ordering::Relaxed);
    }
}

impl BattleFlag for SharedBattleFlag {
    fn in_battle(&self) -> bool {
        self.in_battle.load(Ordering::Relaxed)
    }
}
