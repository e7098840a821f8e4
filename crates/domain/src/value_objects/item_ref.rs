//! Item-like reference used for cursor memory

use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, SkillId};

/// A reference to an "item-like" entity: a skill, or an entry from any of
/// the three item categories. The party stores the most recently
/// cursor-selected one (`last_item`) so menus can restore their position;
/// the core never interprets it beyond store/retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemRef {
    Skill(SkillId),
    Item(ItemId),
}

impl ItemRef {
    pub fn is_skill(&self) -> bool {
        matches!(self, ItemRef::Skill(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self, ItemRef::Item(_))
    }
}

impl From<SkillId> for ItemRef {
    fn from(id: SkillId) -> Self {
        ItemRef::Skill(id)
    }
}

impl From<ItemId> for ItemRef {
    fn from(id: ItemId) -> Self {
        ItemRef::Item(id)
    }
}
