//! Render invalidation adapter.

use std::sync::atomic::{AtomicBool, Ordering};

use caravan_domain::RefreshSink;

/// Latched dirty flags the renderer drains once per frame.
///
/// `mark_*` calls are fire-and-forget from the party's side; `take_*`
/// clears the latch so repeated mutations collapse into one refresh.
#[derive(Debug, Default)]
pub struct DirtyFlags {
    player: AtomicBool,
    map: AtomicBool,
}

impl DirtyFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-and-clear the player flag.
    pub fn take_player(&self) -> bool {
        self.player.swap(false, Ordering::Relaxed)
    }

    /// Read-and-clear the map flag.
    pub fn take_map(&self) -> bool {
        self.map.swap(false, Ordering::Relaxed)
    }
}

impl RefreshSink for DirtyFlags {
    fn mark_player_dirty(&self) {
        self.player.store(true, Ordering::Relaxed);
    }

    fn mark_map_dirty(&self) {
        self.map.store(true, Ordering::Relaxed);
    }
}
