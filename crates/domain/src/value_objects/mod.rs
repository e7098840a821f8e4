//! Value objects - Immutable objects defined by their attributes

mod gold;
mod item_kind;
mod item_ref;
mod party_ability;
mod portrait;

pub use gold::Gold;
pub use item_kind::ItemKind;
pub use item_ref::ItemRef;
pub use party_ability::PartyAbility;
pub use portrait::CharacterPortrait;
