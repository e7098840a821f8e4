//! In-memory actor registry adapter.
//!
//! Actors live behind `&self` ports, so the mutable pieces (equipment,
//! liveness, walk counter) sit in locks and atomics.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use caravan_domain::{
    ActorId, ActorRegistry, CharacterPortrait, ItemId, ItemRef, PartyActor, PartyAbility,
};

/// One registered actor.
pub struct RegistryActor {
    id: ActorId,
    name: String,
    level: u32,
    exists: AtomicBool,
    equips: RwLock<Vec<ItemId>>,
    abilities: Vec<PartyAbility>,
    inputable: bool,
    usable_items: Vec<ItemRef>,
    portrait: CharacterPortrait,
    walk_ticks: AtomicU64,
}

impl RegistryActor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let portrait = CharacterPortrait::new(format!("sheet_{name}"), 0);
        Self {
            id: ActorId::new(),
            name,
            level: 1,
            exists: AtomicBool::new(true),
            equips: RwLock::new(Vec::new()),
            abilities: Vec::new(),
            inputable: true,
            usable_items: Vec::new(),
            portrait,
            walk_ticks: AtomicU64::new(0),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_exists(self, exists: bool) -> Self {
        self.exists.store(exists, Ordering::Relaxed);
        self
    }

    pub fn with_equips(self, equips: Vec<ItemId>) -> Self {
        if let Ok(mut slots) = self.equips.write() {
            *slots = equips;
        }
        self
    }

    pub fn with_ability(mut self, ability: PartyAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_inputable(mut self, inputable: bool) -> Self {
        self.inputable = inputable;
        self
    }

    pub fn with_usable(mut self, item: ItemRef) -> Self {
        self.usable_items.push(item);
        self
    }

    pub fn with_portrait(mut self, portrait: CharacterPortrait) -> Self {
        self.portrait = portrait;
        self
    }

    /// Flip the liveness predicate at runtime (knock-outs, revives).
    pub fn set_exists(&self, exists: bool) {
        self.exists.store(exists, Ordering::Relaxed);
    }

    /// How many equipped copies of `item` this actor holds.
    pub fn equipped_count(&self, item: ItemId) -> usize {
        self.equips
            .read()
            .map(|slots| slots.iter().filter(|i| **i == item).count())
            .unwrap_or(0)
    }

    /// How many walk ticks this actor has processed.
    pub fn walk_ticks(&self) -> u64 {
        self.walk_ticks.load(Ordering::Relaxed)
    }
}

impl PartyActor for RegistryActor {
    fn id(&self) -> ActorId {
        self.id
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn exists(&self) -> bool {
        self.exists.load(Ordering::Relaxed)
    }

    fn equips(&self) -> Vec<ItemId> {
        self.equips
            .read()
            .map(|slots| slots.clone())
            .unwrap_or_default()
    }

    fn discard_equip(&self, item: ItemId) {
        if let Ok(mut slots) = self.equips.write() {
            if let Some(pos) = slots.iter().position(|i| *i == item) {
                slots.remove(pos);
            }
        }
    }

    fn has_party_ability(&self, ability: PartyAbility) -> bool {
        self.abilities.contains(&ability)
    }

    fn can_use(&self, item: ItemRef) -> bool {
        self.usable_items.contains(&item)
    }

    fn inputable(&self) -> bool {
        self.inputable
    }

    fn on_player_walk(&self) {
        self.walk_ticks.fetch_add(1, Ordering::Relaxed);
    }

    fn portrait(&self) -> CharacterPortrait {
        self.portrait.clone()
    }
}

/// Registry over a fixed set of in-memory actors.
#[derive(Default)]
pub struct InMemoryActorRegistry {
    actors: Vec<RegistryActor>,
}

impl InMemoryActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(mut self, actor: RegistryActor) -> Self {
        self.actors.push(actor);
        self
    }

    /// Direct access for assertions and runtime tweaks.
    pub fn get(&self, id: ActorId) -> Option<&RegistryActor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    /// Registered ids in insertion order.
    pub fn ids(&self) -> Vec<ActorId> {
        self.actors.iter().map(|actor| actor.id).collect()
    }
}

impl ActorRegistry for InMemoryActorRegistry {
    fn actor(&self, id: ActorId) -> Option<&dyn PartyActor> {
        self.actors
            .iter()
            .find(|actor| actor.id == id)
            .map(|actor| actor as &dyn PartyActor)
    }
}
