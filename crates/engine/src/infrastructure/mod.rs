//! In-memory implementations of the domain ports.

pub mod actors;
pub mod battle;
pub mod catalog;
pub mod refresh;
pub mod vocab;

pub use actors::{InMemoryActorRegistry, RegistryActor};
pub use battle::SharedBattleFlag;
pub use catalog::StaticItemCatalog;
pub use refresh::DirtyFlags;
pub use vocab::TemplateVocabulary;
