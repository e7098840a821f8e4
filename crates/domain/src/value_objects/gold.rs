//! Gold value object - bounded party currency

use serde::{Deserialize, Deserializer, Serialize};

/// The party's gold balance, always within `0..=MAX`.
///
/// Gains and losses clamp silently rather than erroring, so a loss can
/// never drive the balance negative and a windfall can never overflow
/// the cap. Negative amounts passed to [`Gold::gain`] are losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Gold(u32);

impl Gold {
    /// Largest balance the party can hold.
    pub const MAX: u32 = 99_999_999;

    /// Create a balance, clamping into `0..=MAX`.
    pub fn new(amount: u32) -> Self {
        Self(amount.min(Self::MAX))
    }

    /// The current balance.
    #[inline]
    pub fn amount(&self) -> u32 {
        self.0
    }

    /// Add (or, for negative amounts, remove) gold, clamped to the range.
    #[must_use]
    pub fn gain(self, amount: i64) -> Self {
        let proposed = i64::from(self.0).saturating_add(amount);
        Self(proposed.clamp(0, i64::from(Self::MAX)) as u32)
    }

    /// Remove gold; defined as `gain(-amount)`.
    #[must_use]
    pub fn lose(self, amount: i64) -> Self {
        self.gain(amount.saturating_neg())
    }
}

// Hand-written so a loaded balance re-enters the `0..=MAX` range; the
// transparent derive would accept any raw `u32` verbatim.
impl<'de> Deserialize<'de> for Gold {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Gold::new(u32::deserialize(deserializer)?))
    }
}
