//! Portrait reference persisted for save-file slots

use serde::{Deserialize, Serialize};

/// A `(portrait sheet, index)` pair for one battle member.
///
/// `Party::characters_for_savefile` produces one of these per battle
/// member, in roster order. The save-file format around them is owned by
/// the serializer, not by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPortrait {
    pub sheet_id: String,
    pub index: u32,
}

impl CharacterPortrait {
    pub fn new(sheet_id: impl Into<String>, index: u32) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            index,
        }
    }
}
