//! Party-wide ability flags

use std::fmt;

use serde::{Deserialize, Serialize};

/// Boolean capabilities a single battle member contributes to the whole
/// party. The set is closed; battle logic queries them through
/// `Party::party_ability` and the convenience predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyAbility {
    /// Encounter rate halved
    EncounterHalf,
    /// Random encounters disabled
    EncounterNone,
    /// Enemy surprise attacks never happen
    CancelSurprise,
    /// Preemptive strike chance raised
    RaisePreemptive,
    /// Gold rewards doubled
    GoldDouble,
    /// Item drop rate doubled
    DropItemDouble,
}

impl PartyAbility {
    pub const ALL: [PartyAbility; 6] = [
        PartyAbility::EncounterHalf,
        PartyAbility::EncounterNone,
        PartyAbility::CancelSurprise,
        PartyAbility::RaisePreemptive,
        PartyAbility::GoldDouble,
        PartyAbility::DropItemDouble,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartyAbility::EncounterHalf => "encounter_half",
            PartyAbility::EncounterNone => "encounter_none",
            PartyAbility::CancelSurprise => "cancel_surprise",
            PartyAbility::RaisePreemptive => "raise_preemptive",
            PartyAbility::GoldDouble => "gold_double",
            PartyAbility::DropItemDouble => "drop_item_double",
        }
    }
}

impl fmt::Display for PartyAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
