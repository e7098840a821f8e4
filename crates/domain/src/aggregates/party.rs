//! Party aggregate - roster, currency, inventory and selection state
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: roster order, counters and cursor ids are
//!   encapsulated; every mutation goes through a method that upholds the
//!   clamp/dedup invariants.
//! - **Explicit collaborators**: the actor registry, item catalog,
//!   battle flag, refresh sink and vocabulary are ports passed into the
//!   operations that need them, never ambient globals.
//! - **Silent policies**: amounts clamp, stale ids fall back, exhausted
//!   equipment discards stop; only index operations return `Result`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use caravan_domain::{
    ActorId, CharacterPortrait, DomainError, Gold, Inventory, ItemId, ItemKind, ItemRef,
    PartyAbility,
};

use crate::ports::{ActorRegistry, BattleFlag, ItemCatalog, PartyActor, RefreshSink, Vocabulary};

/// How many roster entries are eligible for battle.
pub const MAX_BATTLE_MEMBERS: usize = 4;

/// The player's party: ordered actor roster, gold, step counter,
/// categorized inventory and menu/target cursor state.
///
/// # Invariants
///
/// - The roster never contains the same `ActorId` twice; insertion order
///   determines battle slots and display order.
/// - `gold` stays within `0..=Gold::MAX`; every inventory entry stays
///   within `1..=MAX_ITEM_COUNT`.
///
/// One instance lives for the whole play session and is replaced
/// wholesale on load (see the serde wire format at the bottom).
#[derive(Debug, Clone, Default)]
pub struct Party {
    gold: Gold,
    steps: u64,
    actors: Vec<ActorId>,
    menu_actor: Option<ActorId>,
    target_actor: Option<ActorId>,
    last_item: Option<ItemRef>,
    inventory: Inventory,
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Roster
    // =========================================================================

    /// Append an actor to the roster. Already-present ids are ignored;
    /// the refresh signal fires either way, as the original did.
    pub fn add_actor(&mut self, id: ActorId, refresh: &dyn RefreshSink) {
        if !self.actors.contains(&id) {
            self.actors.push(id);
        }
        refresh.mark_player_dirty();
        refresh.mark_map_dirty();
    }

    /// Remove an actor from the roster (no-op if absent).
    pub fn remove_actor(&mut self, id: ActorId, refresh: &dyn RefreshSink) {
        self.actors.retain(|existing| *existing != id);
        refresh.mark_player_dirty();
        refresh.mark_map_dirty();
    }

    /// Swap two roster positions. Only the player rendering is marked
    /// dirty; the map does not care about party order.
    pub fn swap_order(
        &mut self,
        a: usize,
        b: usize,
        refresh: &dyn RefreshSink,
    ) -> Result<(), DomainError> {
        let len = self.actors.len();
        for index in [a, b] {
            if index >= len {
                return Err(DomainError::index_out_of_range(index, len));
            }
        }
        self.actors.swap(a, b);
        refresh.mark_player_dirty();
        Ok(())
    }

    /// Replace the roster wholesale with the given ids (new-game setup).
    /// Duplicates collapse to their first occurrence to keep the roster
    /// invariant.
    pub fn setup_starting_members(&mut self, ids: &[ActorId]) {
        self.actors.clear();
        for id in ids {
            if !self.actors.contains(id) {
                self.actors.push(*id);
            }
        }
    }

    /// True iff the roster is non-empty.
    pub fn exists(&self) -> bool {
        !self.actors.is_empty()
    }

    /// Roster ids in order.
    #[inline]
    pub fn actor_ids(&self) -> &[ActorId] {
        &self.actors
    }

    // =========================================================================
    // Member derivations (computed on demand, never cached)
    // =========================================================================

    /// Every roster id that still resolves, in roster order.
    pub fn all_members<'a>(&self, actors: &'a dyn ActorRegistry) -> Vec<&'a dyn PartyActor> {
        self.actors
            .iter()
            .filter_map(|id| actors.actor(*id))
            .collect()
    }

    /// The leading `MAX_BATTLE_MEMBERS` resolved members that pass the
    /// `exists` predicate, preserving relative order.
    pub fn battle_members<'a>(&self, actors: &'a dyn ActorRegistry) -> Vec<&'a dyn PartyActor> {
        self.all_members(actors)
            .into_iter()
            .take(MAX_BATTLE_MEMBERS)
            .filter(|actor| actor.exists())
            .collect()
    }

    /// Battle members while a battle runs, the whole roster otherwise.
    pub fn members<'a>(
        &self,
        actors: &'a dyn ActorRegistry,
        battle: &dyn BattleFlag,
    ) -> Vec<&'a dyn PartyActor> {
        if battle.in_battle() {
            self.battle_members(actors)
        } else {
            self.all_members(actors)
        }
    }

    /// First battle member, if any.
    pub fn leader<'a>(&self, actors: &'a dyn ActorRegistry) -> Option<&'a dyn PartyActor> {
        self.battle_members(actors).into_iter().next()
    }

    /// Highest level among current members; `None` for an empty party.
    pub fn highest_level(
        &self,
        actors: &dyn ActorRegistry,
        battle: &dyn BattleFlag,
    ) -> Option<u32> {
        self.members(actors, battle)
            .iter()
            .map(|actor| actor.level())
            .max()
    }

    /// Empty string without battle members, the leader's own name for a
    /// single member, the vocabulary template otherwise.
    pub fn name(&self, actors: &dyn ActorRegistry, vocab: &dyn Vocabulary) -> String {
        let battle_members = self.battle_members(actors);
        match battle_members.as_slice() {
            [] => String::new(),
            [only] => only.name(),
            [leader, ..] => vocab.party_name(&leader.name()),
        }
    }

    /// Portrait tuples for the current battle members, in roster order.
    /// This is the one artifact handed to save-file serialization.
    pub fn characters_for_savefile(&self, actors: &dyn ActorRegistry) -> Vec<CharacterPortrait> {
        self.battle_members(actors)
            .iter()
            .map(|actor| actor.portrait())
            .collect()
    }

    // =========================================================================
    // Currency
    // =========================================================================

    #[inline]
    pub fn gold(&self) -> Gold {
        self.gold
    }

    /// Add gold, clamped into `0..=Gold::MAX`. Negative amounts lose.
    pub fn gain_gold(&mut self, amount: i64) {
        self.gold = self.gold.gain(amount);
    }

    /// Remove gold; defined as `gain_gold(-amount)`.
    pub fn lose_gold(&mut self, amount: i64) {
        self.gold = self.gold.lose(amount);
    }

    // =========================================================================
    // Steps
    // =========================================================================

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn increase_steps(&mut self) {
        self.steps += 1;
    }

    /// Forward one walked step to every current member.
    pub fn on_player_walk(&self, actors: &dyn ActorRegistry, battle: &dyn BattleFlag) {
        for actor in self.members(actors, battle) {
            actor.on_player_walk();
        }
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    #[inline]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Stored count for an entry, 0 if absent.
    pub fn item_count(&self, kind: ItemKind, id: ItemId) -> u32 {
        self.inventory.count(kind, id)
    }

    /// True once an entry holds the maximum count.
    pub fn item_at_cap(&self, kind: ItemKind, id: ItemId) -> bool {
        self.inventory.is_at_cap(kind, id)
    }

    /// True if the party holds the item; with `include_equip`, a copy
    /// equipped by any current member also counts.
    pub fn has_item(
        &self,
        actors: &dyn ActorRegistry,
        battle: &dyn BattleFlag,
        kind: ItemKind,
        id: ItemId,
        include_equip: bool,
    ) -> bool {
        if self.inventory.has(kind, id) {
            return true;
        }
        include_equip && self.members_equip_include(actors, battle, id)
    }

    /// True if any current member has the item equipped.
    pub fn members_equip_include(
        &self,
        actors: &dyn ActorRegistry,
        battle: &dyn BattleFlag,
        id: ItemId,
    ) -> bool {
        self.members(actors, battle)
            .iter()
            .any(|actor| actor.has_equipped(id))
    }

    /// Add (or, for negative amounts, remove) copies of an item, clamped
    /// into `0..=MAX_ITEM_COUNT`.
    ///
    /// When `include_equip` is set and the unclamped proposed total went
    /// negative, the shortage beyond zero is discarded from member
    /// equipment. The shortage deliberately ignores the clamp: losing 3
    /// from an empty slot discards 3 equipped copies.
    #[allow(clippy::too_many_arguments)]
    pub fn gain_item(
        &mut self,
        actors: &dyn ActorRegistry,
        battle: &dyn BattleFlag,
        refresh: &dyn RefreshSink,
        kind: ItemKind,
        id: ItemId,
        amount: i32,
        include_equip: bool,
    ) {
        let outcome = self.inventory.gain(kind, id, amount);
        if include_equip && outcome.proposed < 0 {
            self.discard_members_equip(actors, battle, id, outcome.shortage());
        }
        refresh.mark_map_dirty();
    }

    /// Remove copies; defined as `gain_item` of the negated amount.
    #[allow(clippy::too_many_arguments)]
    pub fn lose_item(
        &mut self,
        actors: &dyn ActorRegistry,
        battle: &dyn BattleFlag,
        refresh: &dyn RefreshSink,
        kind: ItemKind,
        id: ItemId,
        amount: i32,
        include_equip: bool,
    ) {
        self.gain_item(
            actors,
            battle,
            refresh,
            kind,
            id,
            amount.saturating_neg(),
            include_equip,
        );
    }

    /// Consume one copy of a consumable-flagged consumable. Anything
    /// else (unknown id, wrong category, non-consumable definition) is a
    /// silent no-op.
    pub fn consume_item(
        &mut self,
        catalog: &dyn ItemCatalog,
        refresh: &dyn RefreshSink,
        id: ItemId,
    ) {
        if catalog.kind(id) == Some(ItemKind::Consumable) && catalog.is_consumable(id) {
            self.inventory.gain(ItemKind::Consumable, id, -1);
            refresh.mark_map_dirty();
        }
    }

    /// Discard up to `amount` equipped copies of an item across current
    /// members, draining each member fully before moving to the next.
    /// Stops silently once members run out of equipped copies.
    pub fn discard_members_equip(
        &self,
        actors: &dyn ActorRegistry,
        battle: &dyn BattleFlag,
        id: ItemId,
        amount: u32,
    ) {
        let mut remaining = amount;
        for actor in self.members(actors, battle) {
            while remaining > 0 && actor.has_equipped(id) {
                actor.discard_equip(id);
                remaining -= 1;
            }
            if remaining == 0 {
                break;
            }
        }
    }

    // =========================================================================
    // Usability
    // =========================================================================

    /// True if any current member can use the skill or item.
    pub fn usable(
        &self,
        actors: &dyn ActorRegistry,
        battle: &dyn BattleFlag,
        item: ItemRef,
    ) -> bool {
        self.members(actors, battle)
            .iter()
            .any(|actor| actor.can_use(item))
    }

    /// True if any current member can accept battle command input.
    pub fn inputable(&self, actors: &dyn ActorRegistry, battle: &dyn BattleFlag) -> bool {
        self.members(actors, battle)
            .iter()
            .any(|actor| actor.inputable())
    }

    // =========================================================================
    // Party abilities
    // =========================================================================

    /// True iff any battle member (not reserve members) contributes the
    /// ability.
    pub fn party_ability(&self, actors: &dyn ActorRegistry, ability: PartyAbility) -> bool {
        self.battle_members(actors)
            .iter()
            .any(|actor| actor.has_party_ability(ability))
    }

    pub fn encounter_half(&self, actors: &dyn ActorRegistry) -> bool {
        self.party_ability(actors, PartyAbility::EncounterHalf)
    }

    pub fn encounter_none(&self, actors: &dyn ActorRegistry) -> bool {
        self.party_ability(actors, PartyAbility::EncounterNone)
    }

    pub fn cancel_surprise(&self, actors: &dyn ActorRegistry) -> bool {
        self.party_ability(actors, PartyAbility::CancelSurprise)
    }

    pub fn raise_preemptive(&self, actors: &dyn ActorRegistry) -> bool {
        self.party_ability(actors, PartyAbility::RaisePreemptive)
    }

    pub fn gold_double(&self, actors: &dyn ActorRegistry) -> bool {
        self.party_ability(actors, PartyAbility::GoldDouble)
    }

    pub fn drop_item_double(&self, actors: &dyn ActorRegistry) -> bool {
        self.party_ability(actors, PartyAbility::DropItemDouble)
    }

    /// Chance of a preemptive strike. Aggregate party agility is an
    /// externally computed quantity, injected by the caller.
    pub fn rate_preemptive(
        &self,
        actors: &dyn ActorRegistry,
        party_agi: u32,
        troop_agi: u32,
    ) -> f64 {
        let base = if party_agi >= troop_agi { 0.05 } else { 0.03 };
        base * if self.raise_preemptive(actors) { 4.0 } else { 1.0 }
    }

    /// Chance of being surprised by the troop.
    pub fn rate_surprise(&self, actors: &dyn ActorRegistry, party_agi: u32, troop_agi: u32) -> f64 {
        if self.cancel_surprise(actors) {
            0.0
        } else if party_agi >= troop_agi {
            0.03
        } else {
            0.05
        }
    }

    // =========================================================================
    // Selection cursors
    // =========================================================================

    /// The actor highlighted in menus. Falls back to the first current
    /// member when unset or when the stored id no longer resolves.
    pub fn menu_actor<'a>(
        &self,
        actors: &'a dyn ActorRegistry,
        battle: &dyn BattleFlag,
    ) -> Option<&'a dyn PartyActor> {
        self.menu_actor
            .and_then(|id| actors.actor(id))
            .or_else(|| self.members(actors, battle).into_iter().next())
    }

    pub fn set_menu_actor(&mut self, id: ActorId) {
        self.menu_actor = Some(id);
    }

    /// Advance the menu cursor cyclically. A menu actor missing from the
    /// current members starts over at position 0; an empty member list
    /// leaves the cursor untouched.
    pub fn menu_actor_next(&mut self, actors: &dyn ActorRegistry, battle: &dyn BattleFlag) {
        self.step_menu_actor(actors, battle, CursorStep::Next);
    }

    /// Step the menu cursor backwards cyclically.
    pub fn menu_actor_prev(&mut self, actors: &dyn ActorRegistry, battle: &dyn BattleFlag) {
        self.step_menu_actor(actors, battle, CursorStep::Prev);
    }

    fn step_menu_actor(
        &mut self,
        actors: &dyn ActorRegistry,
        battle: &dyn BattleFlag,
        step: CursorStep,
    ) {
        let members = self.members(actors, battle);
        if members.is_empty() {
            // The original modulo would divide by zero here.
            return;
        }
        let current = self.menu_actor(actors, battle).map(|actor| actor.id());
        let found = current.and_then(|id| members.iter().position(|actor| actor.id() == id));

        let len = members.len() as i64;
        // Missing-index fallbacks reproduce the original: -1 for next,
        // +1 for prev, both landing on position 0 after the modulo.
        let index = match (found, step) {
            (Some(i), _) => i as i64,
            (None, CursorStep::Next) => -1,
            (None, CursorStep::Prev) => 1,
        };
        let offset = match step {
            CursorStep::Next => 1,
            CursorStep::Prev => len - 1,
        };
        let new_index = (index + offset).rem_euclid(len) as usize;
        self.menu_actor = Some(members[new_index].id());
    }

    /// The actor targeted by skills/items, same fallback rule as the
    /// menu cursor but independently stored.
    pub fn target_actor<'a>(
        &self,
        actors: &'a dyn ActorRegistry,
        battle: &dyn BattleFlag,
    ) -> Option<&'a dyn PartyActor> {
        self.target_actor
            .and_then(|id| actors.actor(id))
            .or_else(|| self.members(actors, battle).into_iter().next())
    }

    pub fn set_target_actor(&mut self, id: ActorId) {
        self.target_actor = Some(id);
    }

    /// Cursor memory: the most recently selected item-like entity.
    #[inline]
    pub fn last_item(&self) -> Option<ItemRef> {
        self.last_item
    }

    pub fn set_last_item(&mut self, item: ItemRef) {
        self.last_item = Some(item);
    }
}

#[derive(Clone, Copy)]
enum CursorStep {
    Next,
    Prev,
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format for serialization that matches the wire format
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartyWireFormat {
    gold: Gold,
    steps: u64,
    actors: Vec<ActorId>,
    menu_actor_id: Option<ActorId>,
    target_actor_id: Option<ActorId>,
    last_item: Option<ItemRef>,
    inventory: Inventory,
}

impl Serialize for Party {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = PartyWireFormat {
            gold: self.gold,
            steps: self.steps,
            actors: self.actors.clone(),
            menu_actor_id: self.menu_actor,
            target_actor_id: self.target_actor,
            last_item: self.last_item,
            inventory: self.inventory.clone(),
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Party {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = PartyWireFormat::deserialize(deserializer)?;

        let mut party = Party {
            gold: wire.gold,
            steps: wire.steps,
            actors: Vec::new(),
            menu_actor: wire.menu_actor_id,
            target_actor: wire.target_actor_id,
            last_item: wire.last_item,
            inventory: wire.inventory,
        };
        // Re-applying through the setup path keeps the dedup invariant
        // even for hand-edited payloads. Gold and inventory re-clamp in
        // their own Deserialize impls.
        party.setup_starting_members(&wire.actors);
        Ok(party)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ports::{MockItemCatalog, MockRefreshSink, MockVocabulary};
    use caravan_domain::SkillId;

    struct FakeActor {
        id: ActorId,
        level: u32,
        name: String,
        exists: bool,
        equips: Mutex<Vec<ItemId>>,
        abilities: Vec<PartyAbility>,
        inputable: bool,
        usable: bool,
        walk_ticks: Mutex<u32>,
    }

    impl FakeActor {
        fn new(name: &str) -> Self {
            Self {
                id: ActorId::new(),
                level: 1,
                name: name.to_string(),
                exists: true,
                equips: Mutex::new(Vec::new()),
                abilities: Vec::new(),
                inputable: false,
                usable: false,
                walk_ticks: Mutex::new(0),
            }
        }

        fn with_level(mut self, level: u32) -> Self {
            self.level = level;
            self
        }

        fn with_exists(mut self, exists: bool) -> Self {
            self.exists = exists;
            self
        }

        fn with_equips(self, equips: Vec<ItemId>) -> Self {
            *self.equips.lock().unwrap() = equips;
            self
        }

        fn with_ability(mut self, ability: PartyAbility) -> Self {
            self.abilities.push(ability);
            self
        }

        fn with_inputable(mut self, inputable: bool) -> Self {
            self.inputable = inputable;
            self
        }

        fn with_usable(mut self, usable: bool) -> Self {
            self.usable = usable;
            self
        }

        fn equipped_count(&self, item: ItemId) -> usize {
            self.equips.lock().unwrap().iter().filter(|i| **i == item).count()
        }

        fn walks(&self) -> u32 {
            *self.walk_ticks.lock().unwrap()
        }
    }

    impl PartyActor for FakeActor {
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
            self.exists
        }

        fn equips(&self) -> Vec<ItemId> {
            self.equips.lock().unwrap().clone()
        }

        fn discard_equip(&self, item: ItemId) {
            let mut equips = self.equips.lock().unwrap();
            if let Some(pos) = equips.iter().position(|i| *i == item) {
                equips.remove(pos);
            }
        }

        fn has_party_ability(&self, ability: PartyAbility) -> bool {
            self.abilities.contains(&ability)
        }

        fn can_use(&self, _item: ItemRef) -> bool {
            self.usable
        }

        fn inputable(&self) -> bool {
            self.inputable
        }

        fn on_player_walk(&self) {
            *self.walk_ticks.lock().unwrap() += 1;
        }

        fn portrait(&self) -> CharacterPortrait {
            CharacterPortrait::new(format!("sheet_{}", self.name), self.level)
        }
    }

    #[derive(Default)]
    struct FakeRegistry {
        actors: Vec<FakeActor>,
    }

    impl FakeRegistry {
        fn with(actors: Vec<FakeActor>) -> Self {
            Self { actors }
        }
    }

    impl ActorRegistry for FakeRegistry {
        fn actor(&self, id: ActorId) -> Option<&dyn PartyActor> {
            self.actors
                .iter()
                .find(|a| a.id == id)
                .map(|a| a as &dyn PartyActor)
        }
    }

    struct Battle(bool);

    impl BattleFlag for Battle {
        fn in_battle(&self) -> bool {
            self.0
        }
    }

    struct NullRefresh;

    impl RefreshSink for NullRefresh {
        fn mark_player_dirty(&self) {}
        fn mark_map_dirty(&self) {}
    }

    /// Party whose roster holds every actor in the registry, in order.
    fn party_of(registry: &FakeRegistry) -> Party {
        let mut party = Party::new();
        let ids: Vec<ActorId> = registry.actors.iter().map(|a| a.id).collect();
        party.setup_starting_members(&ids);
        party
    }

    mod roster {
        use super::*;

        #[test]
        fn add_actor_deduplicates() {
            let mut party = Party::new();
            let id = ActorId::new();

            let mut refresh = MockRefreshSink::new();
            refresh.expect_mark_player_dirty().times(2).return_const(());
            refresh.expect_mark_map_dirty().times(2).return_const(());

            party.add_actor(id, &refresh);
            party.add_actor(id, &refresh);
            assert_eq!(party.actor_ids(), &[id]);
        }

        #[test]
        fn add_actor_appends_in_order() {
            let mut party = Party::new();
            let first = ActorId::new();
            let second = ActorId::new();
            party.add_actor(first, &NullRefresh);
            party.add_actor(second, &NullRefresh);
            assert_eq!(party.actor_ids(), &[first, second]);
        }

        #[test]
        fn remove_actor_tolerates_absent_ids() {
            let mut party = Party::new();
            let id = ActorId::new();
            party.add_actor(id, &NullRefresh);
            party.remove_actor(ActorId::new(), &NullRefresh);
            assert_eq!(party.actor_ids(), &[id]);
            party.remove_actor(id, &NullRefresh);
            assert!(party.actor_ids().is_empty());
            assert!(!party.exists());
        }

        #[test]
        fn swap_order_marks_only_player_dirty() {
            let mut party = Party::new();
            let first = ActorId::new();
            let second = ActorId::new();
            party.setup_starting_members(&[first, second]);

            let mut refresh = MockRefreshSink::new();
            refresh.expect_mark_player_dirty().times(1).return_const(());
            // No expectation for the map: marking it would panic.

            party.swap_order(0, 1, &refresh).unwrap();
            assert_eq!(party.actor_ids(), &[second, first]);
        }

        #[test]
        fn swap_order_guards_indices() {
            let mut party = Party::new();
            party.setup_starting_members(&[ActorId::new()]);
            let err = party.swap_order(0, 3, &NullRefresh).unwrap_err();
            assert_eq!(err, DomainError::IndexOutOfRange { index: 3, len: 1 });
        }

        #[test]
        fn setup_starting_members_replaces_wholesale_and_dedups() {
            let mut party = Party::new();
            party.add_actor(ActorId::new(), &NullRefresh);

            let a = ActorId::new();
            let b = ActorId::new();
            party.setup_starting_members(&[a, b, a]);
            assert_eq!(party.actor_ids(), &[a, b]);
        }
    }

    mod members {
        use super::*;

        #[test]
        fn battle_members_cap_at_four_and_filter_exists() {
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a"),
                FakeActor::new("b").with_exists(false),
                FakeActor::new("c"),
                FakeActor::new("d"),
                FakeActor::new("e"),
                FakeActor::new("f"),
            ]);
            let party = party_of(&registry);

            let battle = party.battle_members(&registry);
            // b (slot 2) fails the predicate; e and f sit beyond slot 4.
            let names: Vec<String> = battle.iter().map(|a| a.name()).collect();
            assert_eq!(names, vec!["a", "c", "d"]);
        }

        #[test]
        fn all_members_skip_unresolved_ids() {
            let registry = FakeRegistry::with(vec![FakeActor::new("a")]);
            let mut party = party_of(&registry);
            party.add_actor(ActorId::new(), &NullRefresh);

            assert_eq!(party.actor_ids().len(), 2);
            assert_eq!(party.all_members(&registry).len(), 1);
        }

        #[test]
        fn members_switch_to_battle_subset_mid_battle() {
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a"),
                FakeActor::new("b"),
                FakeActor::new("c"),
                FakeActor::new("d"),
                FakeActor::new("e"),
            ]);
            let party = party_of(&registry);

            assert_eq!(party.members(&registry, &Battle(false)).len(), 5);
            assert_eq!(party.members(&registry, &Battle(true)).len(), 4);
        }

        #[test]
        fn leader_is_first_battle_member() {
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a").with_exists(false),
                FakeActor::new("b"),
            ]);
            let party = party_of(&registry);
            assert_eq!(party.leader(&registry).unwrap().name(), "b");

            let empty = Party::new();
            assert!(empty.leader(&registry).is_none());
        }

        #[test]
        fn highest_level_over_current_members() {
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a").with_level(7),
                FakeActor::new("b").with_level(31),
                FakeActor::new("c").with_level(12),
            ]);
            let party = party_of(&registry);
            assert_eq!(party.highest_level(&registry, &Battle(false)), Some(31));
            assert_eq!(Party::new().highest_level(&registry, &Battle(false)), None);
        }

        #[test]
        fn name_varies_with_battle_member_count() {
            let mut vocab = MockVocabulary::new();
            vocab
                .expect_party_name()
                .returning(|leader| format!("{}'s Party", leader));

            let empty_registry = FakeRegistry::default();
            assert_eq!(Party::new().name(&empty_registry, &vocab), "");

            let solo = FakeRegistry::with(vec![FakeActor::new("Rena")]);
            assert_eq!(party_of(&solo).name(&solo, &vocab), "Rena");

            let duo = FakeRegistry::with(vec![FakeActor::new("Rena"), FakeActor::new("Io")]);
            assert_eq!(party_of(&duo).name(&duo, &vocab), "Rena's Party");
        }

        #[test]
        fn characters_for_savefile_lists_battle_members_in_order() {
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a").with_level(3),
                FakeActor::new("b").with_level(9),
            ]);
            let party = party_of(&registry);

            let portraits = party.characters_for_savefile(&registry);
            assert_eq!(
                portraits,
                vec![
                    CharacterPortrait::new("sheet_a", 3),
                    CharacterPortrait::new("sheet_b", 9),
                ]
            );
        }
    }

    mod currency {
        use super::*;

        #[test]
        fn gold_clamps_both_ends() {
            let mut party = Party::new();
            party.gain_gold(100_000_000);
            assert_eq!(party.gold().amount(), Gold::MAX);
            party.lose_gold(i64::from(Gold::MAX) + 5);
            assert_eq!(party.gold().amount(), 0);
            party.gain_gold(-5);
            assert_eq!(party.gold().amount(), 0);
        }

        #[test]
        fn steps_only_increase() {
            let mut party = Party::new();
            party.increase_steps();
            party.increase_steps();
            assert_eq!(party.steps(), 2);
        }
    }

    mod inventory_ops {
        use super::*;

        #[test]
        fn gain_item_clamps_then_removal_at_zero() {
            let registry = FakeRegistry::default();
            let mut party = Party::new();
            let id = ItemId::new();

            party.gain_item(
                &registry,
                &Battle(false),
                &NullRefresh,
                ItemKind::Consumable,
                id,
                150,
                false,
            );
            assert_eq!(party.item_count(ItemKind::Consumable, id), 99);
            assert!(party.item_at_cap(ItemKind::Consumable, id));

            party.gain_item(
                &registry,
                &Battle(false),
                &NullRefresh,
                ItemKind::Consumable,
                id,
                -150,
                false,
            );
            assert_eq!(party.item_count(ItemKind::Consumable, id), 0);
            assert!(party.inventory().consumables().is_empty());
        }

        #[test]
        fn gain_item_marks_map_dirty() {
            let registry = FakeRegistry::default();
            let mut party = Party::new();

            let mut refresh = MockRefreshSink::new();
            refresh.expect_mark_map_dirty().times(1).return_const(());
            // No player expectation: item changes leave the player alone.

            party.gain_item(
                &registry,
                &Battle(false),
                &refresh,
                ItemKind::Weapon,
                ItemId::new(),
                1,
                false,
            );
        }

        #[test]
        fn lose_with_equip_drains_first_member_before_second() {
            let item = ItemId::new();
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a").with_equips(vec![item, item]),
                FakeActor::new("b").with_equips(vec![item]),
            ]);
            let mut party = party_of(&registry);

            // Inventory holds none; the whole loss lands on equipment.
            party.lose_item(
                &registry,
                &Battle(false),
                &NullRefresh,
                ItemKind::Weapon,
                item,
                2,
                true,
            );

            assert_eq!(registry.actors[0].equipped_count(item), 0);
            assert_eq!(registry.actors[1].equipped_count(item), 1);
        }

        #[test]
        fn equip_shortage_comes_from_unclamped_total() {
            let item = ItemId::new();
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a").with_equips(vec![item, item, item])
            ]);
            let mut party = party_of(&registry);
            party.gain_item(
                &registry,
                &Battle(false),
                &NullRefresh,
                ItemKind::Weapon,
                item,
                1,
                false,
            );

            // Held 1, losing 3: the proposed total is -2, so exactly two
            // equipped copies go, not three.
            party.lose_item(
                &registry,
                &Battle(false),
                &NullRefresh,
                ItemKind::Weapon,
                item,
                3,
                true,
            );
            assert_eq!(party.item_count(ItemKind::Weapon, item), 0);
            assert_eq!(registry.actors[0].equipped_count(item), 1);
        }

        #[test]
        fn discard_stops_silently_when_equipment_runs_out() {
            let item = ItemId::new();
            let registry =
                FakeRegistry::with(vec![FakeActor::new("a").with_equips(vec![item])]);
            let party = party_of(&registry);

            party.discard_members_equip(&registry, &Battle(false), item, 5);
            assert_eq!(registry.actors[0].equipped_count(item), 0);
        }

        #[test]
        fn has_item_can_see_member_equipment() {
            let item = ItemId::new();
            let registry =
                FakeRegistry::with(vec![FakeActor::new("a").with_equips(vec![item])]);
            let party = party_of(&registry);

            assert!(!party.has_item(&registry, &Battle(false), ItemKind::Weapon, item, false));
            assert!(party.has_item(&registry, &Battle(false), ItemKind::Weapon, item, true));
        }

        #[test]
        fn consume_item_requires_consumable_definition() {
            let id = ItemId::new();
            let mut catalog = MockItemCatalog::new();
            catalog
                .expect_kind()
                .returning(move |_| Some(ItemKind::Consumable));
            catalog.expect_is_consumable().return_const(true);

            let registry = FakeRegistry::default();
            let mut party = Party::new();
            party.gain_item(
                &registry,
                &Battle(false),
                &NullRefresh,
                ItemKind::Consumable,
                id,
                2,
                false,
            );

            party.consume_item(&catalog, &NullRefresh, id);
            assert_eq!(party.item_count(ItemKind::Consumable, id), 1);

            // A "precious" consumable is never consumed.
            let mut precious = MockItemCatalog::new();
            precious
                .expect_kind()
                .returning(move |_| Some(ItemKind::Consumable));
            precious.expect_is_consumable().return_const(false);
            party.consume_item(&precious, &NullRefresh, id);
            assert_eq!(party.item_count(ItemKind::Consumable, id), 1);
        }

        #[test]
        fn consume_item_ignores_unknown_ids() {
            let mut catalog = MockItemCatalog::new();
            catalog.expect_kind().returning(|_| None);

            let mut party = Party::new();
            // No refresh expectation: the no-op must not signal.
            let refresh = MockRefreshSink::new();
            party.consume_item(&catalog, &refresh, ItemId::new());
        }
    }

    mod abilities {
        use super::*;

        #[test]
        fn party_ability_considers_battle_members_only() {
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a"),
                FakeActor::new("b"),
                FakeActor::new("c"),
                FakeActor::new("d"),
                FakeActor::new("reserve").with_ability(PartyAbility::GoldDouble),
            ]);
            let party = party_of(&registry);
            assert!(!party.gold_double(&registry));

            let front = FakeRegistry::with(vec![
                FakeActor::new("a").with_ability(PartyAbility::GoldDouble)
            ]);
            assert!(party_of(&front).gold_double(&front));
        }

        #[test]
        fn convenience_predicates_map_to_flags() {
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a")
                    .with_ability(PartyAbility::EncounterHalf)
                    .with_ability(PartyAbility::CancelSurprise),
            ]);
            let party = party_of(&registry);
            assert!(party.encounter_half(&registry));
            assert!(party.cancel_surprise(&registry));
            assert!(!party.encounter_none(&registry));
            assert!(!party.raise_preemptive(&registry));
            assert!(!party.drop_item_double(&registry));
        }

        #[test]
        fn rate_preemptive_formula() {
            let plain = FakeRegistry::with(vec![FakeActor::new("a")]);
            let party = party_of(&plain);
            assert!((party.rate_preemptive(&plain, 10, 10) - 0.05).abs() < 1e-9);
            assert!((party.rate_preemptive(&plain, 9, 10) - 0.03).abs() < 1e-9);

            let raised = FakeRegistry::with(vec![
                FakeActor::new("a").with_ability(PartyAbility::RaisePreemptive)
            ]);
            let party = party_of(&raised);
            assert!((party.rate_preemptive(&raised, 10, 10) - 0.20).abs() < 1e-9);
        }

        #[test]
        fn rate_surprise_formula() {
            let plain = FakeRegistry::with(vec![FakeActor::new("a")]);
            let party = party_of(&plain);
            assert!((party.rate_surprise(&plain, 10, 10) - 0.03).abs() < 1e-9);
            assert!((party.rate_surprise(&plain, 9, 10) - 0.05).abs() < 1e-9);

            let canceled = FakeRegistry::with(vec![
                FakeActor::new("a").with_ability(PartyAbility::CancelSurprise)
            ]);
            let party = party_of(&canceled);
            assert_eq!(party.rate_surprise(&canceled, 9, 10), 0.0);
        }
    }

    mod usability {
        use super::*;

        #[test]
        fn usable_and_inputable_are_any_member() {
            let registry = FakeRegistry::with(vec![
                FakeActor::new("a"),
                FakeActor::new("b").with_usable(true).with_inputable(true),
            ]);
            let party = party_of(&registry);
            let skill = ItemRef::from(SkillId::new());
            assert!(party.usable(&registry, &Battle(false), skill));
            assert!(party.inputable(&registry, &Battle(false)));

            let inert = FakeRegistry::with(vec![FakeActor::new("a")]);
            let party = party_of(&inert);
            assert!(!party.usable(&inert, &Battle(false), skill));
            assert!(!party.inputable(&inert, &Battle(false)));
        }

        #[test]
        fn on_player_walk_reaches_every_member() {
            let registry =
                FakeRegistry::with(vec![FakeActor::new("a"), FakeActor::new("b")]);
            let party = party_of(&registry);
            party.on_player_walk(&registry, &Battle(false));
            party.on_player_walk(&registry, &Battle(false));
            assert_eq!(registry.actors[0].walks(), 2);
            assert_eq!(registry.actors[1].walks(), 2);
        }
    }

    mod cursors {
        use super::*;

        fn trio() -> FakeRegistry {
            FakeRegistry::with(vec![
                FakeActor::new("a"),
                FakeActor::new("b"),
                FakeActor::new("c"),
            ])
        }

        #[test]
        fn menu_actor_defaults_to_first_member() {
            let registry = trio();
            let party = party_of(&registry);
            let menu = party.menu_actor(&registry, &Battle(false)).unwrap();
            assert_eq!(menu.name(), "a");
        }

        #[test]
        fn menu_actor_falls_back_when_stale() {
            let registry = trio();
            let mut party = party_of(&registry);
            party.set_menu_actor(ActorId::new());
            let menu = party.menu_actor(&registry, &Battle(false)).unwrap();
            assert_eq!(menu.name(), "a");
        }

        #[test]
        fn menu_actor_next_cycles() {
            let registry = trio();
            let mut party = party_of(&registry);
            party.set_menu_actor(registry.actors[1].id);

            party.menu_actor_next(&registry, &Battle(false));
            assert_eq!(
                party.menu_actor(&registry, &Battle(false)).unwrap().name(),
                "c"
            );

            party.menu_actor_next(&registry, &Battle(false));
            assert_eq!(
                party.menu_actor(&registry, &Battle(false)).unwrap().name(),
                "a"
            );
        }

        #[test]
        fn menu_actor_prev_wraps_to_last() {
            let registry = trio();
            let mut party = party_of(&registry);
            party.set_menu_actor(registry.actors[0].id);

            party.menu_actor_prev(&registry, &Battle(false));
            assert_eq!(
                party.menu_actor(&registry, &Battle(false)).unwrap().name(),
                "c"
            );
        }

        #[test]
        fn cursor_steps_restart_when_menu_actor_left_the_members() {
            let registry = trio();
            let mut party = party_of(&registry);
            // Resolvable actor that is no longer a roster member.
            let outsider = &registry.actors[2];
            party.remove_actor(outsider.id, &NullRefresh);
            party.set_menu_actor(outsider.id);

            party.menu_actor_next(&registry, &Battle(false));
            assert_eq!(
                party.menu_actor(&registry, &Battle(false)).unwrap().name(),
                "a"
            );
        }

        #[test]
        fn cursor_steps_are_noops_on_an_empty_party() {
            let registry = FakeRegistry::default();
            let mut party = Party::new();
            party.menu_actor_next(&registry, &Battle(false));
            party.menu_actor_prev(&registry, &Battle(false));
            assert!(party.menu_actor(&registry, &Battle(false)).is_none());
        }

        #[test]
        fn target_actor_has_independent_storage() {
            let registry = trio();
            let mut party = party_of(&registry);
            party.set_menu_actor(registry.actors[1].id);
            party.set_target_actor(registry.actors[2].id);

            assert_eq!(
                party.menu_actor(&registry, &Battle(false)).unwrap().name(),
                "b"
            );
            assert_eq!(
                party.target_actor(&registry, &Battle(false)).unwrap().name(),
                "c"
            );
        }

        #[test]
        fn last_item_is_stored_verbatim() {
            let mut party = Party::new();
            assert!(party.last_item().is_none());
            let item = ItemRef::from(ItemId::new());
            party.set_last_item(item);
            assert_eq!(party.last_item(), Some(item));
        }
    }

    mod serde_format {
        use super::*;

        #[test]
        fn round_trips_session_state() {
            let mut party = Party::new();
            let a = ActorId::new();
            let b = ActorId::new();
            party.setup_starting_members(&[a, b]);
            party.gain_gold(1_234);
            party.increase_steps();
            party.set_menu_actor(b);
            party.set_last_item(ItemRef::from(ItemId::new()));

            let registry = FakeRegistry::default();
            let potion = ItemId::new();
            party.gain_item(
                &registry,
                &Battle(false),
                &NullRefresh,
                ItemKind::Consumable,
                potion,
                4,
                false,
            );

            let json = serde_json::to_string(&party).unwrap();
            let back: Party = serde_json::from_str(&json).unwrap();

            assert_eq!(back.actor_ids(), party.actor_ids());
            assert_eq!(back.gold(), party.gold());
            assert_eq!(back.steps(), 1);
            assert_eq!(back.last_item(), party.last_item());
            assert_eq!(back.item_count(ItemKind::Consumable, potion), 4);
        }

        #[test]
        fn deserialize_restores_invariants_from_hand_edited_payloads() {
            let actor = ActorId::new();
            let item = ItemId::new();
            let json = format!(
                concat!(
                    "{{\"gold\":4000000000,\"steps\":0,",
                    "\"actors\":[\"{actor}\",\"{actor}\"],",
                    "\"menuActorId\":null,\"targetActorId\":null,\"lastItem\":null,",
                    "\"inventory\":{{\"consumables\":{{\"{item}\":150}},",
                    "\"weapons\":{{}},\"armors\":{{}}}}}}"
                ),
                actor = actor,
                item = item,
            );

            let party: Party = serde_json::from_str(&json).unwrap();
            assert_eq!(party.gold().amount(), Gold::MAX);
            assert_eq!(party.item_count(ItemKind::Consumable, item), 99);
            assert_eq!(party.actor_ids(), &[actor]);
        }

        #[test]
        fn serialize_produces_camel_case() {
            let json = serde_json::to_string(&Party::new()).unwrap();
            assert!(json.contains("menuActorId"));
            assert!(json.contains("targetActorId"));
            assert!(json.contains("lastItem"));
            assert!(json.contains("inventory"));
        }
    }
}
