//! Party application service.
//!
//! Owns the [`Party`] aggregate together with its collaborator ports and
//! forwards every operation, adding structured logging around the
//! mutations. Hosts that only need the pure core can use
//! `caravan_domain::Party` directly.

use std::sync::Arc;

use caravan_domain::{
    ActorId, ActorRegistry, BattleFlag, CharacterPortrait, Gold, Inventory, ItemCatalog, ItemId,
    ItemKind, ItemRef, Party, PartyAbility, PartyActor, RefreshSink, Vocabulary,
};

use crate::error::PartyError;

/// Application-level facade over the party core.
pub struct PartyService {
    party: Party,
    actors: Arc<dyn ActorRegistry>,
    catalog: Arc<dyn ItemCatalog>,
    battle: Arc<dyn BattleFlag>,
    refresh: Arc<dyn RefreshSink>,
    vocab: Arc<dyn Vocabulary>,
}

impl PartyService {
    pub fn new(
        actors: Arc<dyn ActorRegistry>,
        catalog: Arc<dyn ItemCatalog>,
        battle: Arc<dyn BattleFlag>,
        refresh: Arc<dyn RefreshSink>,
        vocab: Arc<dyn Vocabulary>,
    ) -> Self {
        Self {
            party: Party::new(),
            actors,
            catalog,
            battle,
            refresh,
            vocab,
        }
    }

    /// Install a previously saved party (session load).
    pub fn with_party(mut self, party: Party) -> Self {
        self.party = party;
        self
    }

    /// The underlying aggregate, e.g. for save serialization.
    #[inline]
    pub fn party(&self) -> &Party {
        &self.party
    }

    // =========================================================================
    // Roster
    // =========================================================================

    pub fn setup_starting_members(&mut self, ids: &[ActorId]) {
        self.party.setup_starting_members(ids);
        tracing::info!(count = self.party.actor_ids().len(), "Starting members set");
    }

    pub fn add_actor(&mut self, id: ActorId) {
        self.party.add_actor(id, self.refresh.as_ref());
        tracing::info!(actor_id = %id, roster_size = self.party.actor_ids().len(), "Actor joined the party");
    }

    pub fn remove_actor(&mut self, id: ActorId) {
        self.party.remove_actor(id, self.refresh.as_ref());
        tracing::info!(actor_id = %id, roster_size = self.party.actor_ids().len(), "Actor left the party");
    }

    pub fn swap_order(&mut self, a: usize, b: usize) -> Result<(), PartyError> {
        self.party.swap_order(a, b, self.refresh.as_ref())?;
        tracing::debug!(a, b, "Roster order swapped");
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.party.exists()
    }

    pub fn actor_ids(&self) -> &[ActorId] {
        self.party.actor_ids()
    }

    // =========================================================================
    // Member derivations
    // =========================================================================

    pub fn all_members(&self) -> Vec<&dyn PartyActor> {
        self.party.all_members(self.actors.as_ref())
    }

    pub fn battle_members(&self) -> Vec<&dyn PartyActor> {
        self.party.battle_members(self.actors.as_ref())
    }

    pub fn members(&self) -> Vec<&dyn PartyActor> {
        self.party.members(self.actors.as_ref(), self.battle.as_ref())
    }

    pub fn leader(&self) -> Option<&dyn PartyActor> {
        self.party.leader(self.actors.as_ref())
    }

    pub fn highest_level(&self) -> Option<u32> {
        self.party
            .highest_level(self.actors.as_ref(), self.battle.as_ref())
    }

    pub fn name(&self) -> String {
        self.party.name(self.actors.as_ref(), self.vocab.as_ref())
    }

    pub fn characters_for_savefile(&self) -> Vec<CharacterPortrait> {
        self.party.characters_for_savefile(self.actors.as_ref())
    }

    // =========================================================================
    // Currency and steps
    // =========================================================================

    pub fn gold(&self) -> Gold {
        self.party.gold()
    }

    pub fn gain_gold(&mut self, amount: i64) {
        self.party.gain_gold(amount);
        tracing::debug!(amount, balance = self.party.gold().amount(), "Gold changed");
    }

    pub fn lose_gold(&mut self, amount: i64) {
        self.gain_gold(amount.saturating_neg());
    }

    pub fn steps(&self) -> u64 {
        self.party.steps()
    }

    pub fn increase_steps(&mut self) {
        self.party.increase_steps();
    }

    pub fn on_player_walk(&self) {
        self.party
            .on_player_walk(self.actors.as_ref(), self.battle.as_ref());
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    #[inline]
    pub fn inventory(&self) -> &Inventory {
        self.party.inventory()
    }

    pub fn item_count(&self, kind: ItemKind, id: ItemId) -> u32 {
        self.party.item_count(kind, id)
    }

    pub fn item_at_cap(&self, kind: ItemKind, id: ItemId) -> bool {
        self.party.item_at_cap(kind, id)
    }

    pub fn has_item(&self, kind: ItemKind, id: ItemId, include_equip: bool) -> bool {
        self.party.has_item(
            self.actors.as_ref(),
            self.battle.as_ref(),
            kind,
            id,
            include_equip,
        )
    }

    pub fn gain_item(&mut self, kind: ItemKind, id: ItemId, amount: i32, include_equip: bool) {
        self.party.gain_item(
            self.actors.as_ref(),
            self.battle.as_ref(),
            self.refresh.as_ref(),
            kind,
            id,
            amount,
            include_equip,
        );
        tracing::debug!(
            item_id = %id,
            kind = %kind,
            amount,
            count = self.party.item_count(kind, id),
            "Inventory changed"
        );
    }

    pub fn lose_item(&mut self, kind: ItemKind, id: ItemId, amount: i32, include_equip: bool) {
        self.gain_item(kind, id, amount.saturating_neg(), include_equip);
    }

    pub fn consume_item(&mut self, id: ItemId) {
        self.party
            .consume_item(self.catalog.as_ref(), self.refresh.as_ref(), id);
        tracing::debug!(
            item_id = %id,
            remaining = self.party.item_count(ItemKind::Consumable, id),
            "Consume processed"
        );
    }

    // =========================================================================
    // Abilities and rates
    // =========================================================================

    pub fn party_ability(&self, ability: PartyAbility) -> bool {
        self.party.party_ability(self.actors.as_ref(), ability)
    }

    pub fn rate_preemptive(&self, party_agi: u32, troop_agi: u32) -> f64 {
        self.party
            .rate_preemptive(self.actors.as_ref(), party_agi, troop_agi)
    }

    pub fn rate_surprise(&self, party_agi: u32, troop_agi: u32) -> f64 {
        self.party
            .rate_surprise(self.actors.as_ref(), party_agi, troop_agi)
    }

    // =========================================================================
    // Usability
    // =========================================================================

    pub fn usable(&self, item: ItemRef) -> bool {
        self.party
            .usable(self.actors.as_ref(), self.battle.as_ref(), item)
    }

    pub fn inputable(&self) -> bool {
        self.party
            .inputable(self.actors.as_ref(), self.battle.as_ref())
    }

    // =========================================================================
    // Selection cursors
    // =========================================================================

    pub fn menu_actor(&self) -> Option<&dyn PartyActor> {
        self.party
            .menu_actor(self.actors.as_ref(), self.battle.as_ref())
    }

    pub fn set_menu_actor(&mut self, id: ActorId) {
        self.party.set_menu_actor(id);
    }

    pub fn menu_actor_next(&mut self) {
        self.party
            .menu_actor_next(self.actors.as_ref(), self.battle.as_ref());
    }

    pub fn menu_actor_prev(&mut self) {
        self.party
            .menu_actor_prev(self.actors.as_ref(), self.battle.as_ref());
    }

    pub fn target_actor(&self) -> Option<&dyn PartyActor> {
        self.party
            .target_actor(self.actors.as_ref(), self.battle.as_ref())
    }

    pub fn set_target_actor(&mut self, id: ActorId) {
        self.party.set_target_actor(id);
    }

    pub fn last_item(&self) -> Option<ItemRef> {
        self.party.last_item()
    }

    pub fn set_last_item(&mut self, item: ItemRef) {
        self.party.set_last_item(item);
    }
}
