//! The authoritative in-memory state a Base Client drives through one
//! connected game: nodes, players, random/decision state arrays, the
//! dispatch queue, and the handler's opaque state blob.
//!
//! `GameContext` is built once per attach from a `GameAccount` (or, for a
//! sub game, from an `InitAccount`), mutated exclusively by pre-handler
//! bookkeeping and `apply_effect`, and replaced atomically whenever a
//! checkpoint is installed.

use std::collections::HashMap;

use borsh::{BorshDeserialize, BorshSerialize};

use lumen_api::{
    effect::{ActionTimeout as EffectActionTimeout, Effect, EmitBridgeEvent, SubGame},
    engine::InitAccount,
    event::Event,
    random::{RandomSpec, RandomState},
    types::{
        Award, Ciphertext, CustomLog, DecisionId, EntryLock, EntryType, GamePlayer, GameStatus,
        PlayerJoin, RandomId, SecretDigest, SecretShare, ServerJoin, Settle, Transfer,
    },
};

use crate::{
    checkpoint::ContextCheckpoint,
    decision::DecisionState,
    dispatch_event::DispatchEvent,
    error::{Error, Result},
    node::{Node, NodeStatus},
    types::{Addr, ClientMode, GameAccount},
    versions::Versions,
};

/// Advisory wait before a mask/lock submitter is reported, per `spec.md`
/// §4.2. Fired on the game's logical clock (`GameContext::timestamp`), not
/// wall-clock.
const OPERATION_TIMEOUT_MS: u64 = 15_000;

/// The side effects of an applied `Effect` that the `GameContext` itself
/// cannot deliver: they cross a boundary (bridge to another sub game, a
/// settlement instruction, a log line for UI) that only the caller (the
/// Effect Bridge / Base Client) can route.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    pub bridge_events: Vec<EmitBridgeEvent>,
    pub launch_sub_games: Vec<SubGame>,
    pub reject_deposits: Vec<u64>,
    pub accept_deposits: Vec<u64>,
    pub awards: Vec<Award>,
    pub transfers: Vec<Transfer>,
    pub logs: Vec<CustomLog>,
    /// Whether this effect rotated the checkpoint; the caller should clear
    /// any decryption cache it keeps alongside the context.
    pub is_checkpoint: bool,
}

/// See `spec.md` §3 "GameContext" for the full invariant list:
/// random/decision ids are 1-based and dense, random states reset on every
/// checkpoint, `settleVersion` increments by exactly one per applied
/// non-empty settle batch, at most one dispatch is pending, and
/// `timestamp` is monotonically non-decreasing within a session.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct GameContext {
    pub game_addr: Addr,
    /// `0` for the root game, the handler-assigned id for a sub game.
    pub game_id: usize,
    pub status: GameStatus,
    pub nodes: Vec<Node>,
    pub players: Vec<GamePlayer>,
    pub dispatch: Option<DispatchEvent>,
    pub handler_state: Vec<u8>,
    pub init_data: Vec<u8>,
    pub entry_type: EntryType,
    pub entry_lock: EntryLock,
    pub max_players: u16,
    pub random_states: Vec<RandomState>,
    pub decision_states: Vec<DecisionState>,
    pub checkpoint: ContextCheckpoint,
    pub versions: Versions,
    /// The most recent unsettled batch, taken (and `settleVersion` bumped)
    /// by `apply_and_take_settles`.
    pub settles: Option<Vec<Settle>>,
    pub allow_exit: bool,
    pub timestamp: u64,
}

impl GameContext {
    /// Build a fresh context for the root game from its on-chain account.
    /// No checkpoint is applied; callers that are resuming should follow up
    /// with `apply_checkpoint`/`set_handler_state`.
    pub fn try_new(game_account: &GameAccount) -> Result<Self> {
        let transactor_addr = game_account
            .transactor_addr
            .clone()
            .ok_or(Error::CantFindTransactor)?;

        let mut nodes = Vec::new();
        for server in game_account.servers.iter() {
            let mode = if server.addr == transactor_addr {
                ClientMode::Transactor
            } else {
                ClientMode::Validator
            };
            nodes.push(Node::new(server.addr.clone(), server.access_version, mode));
        }

        let mut players = Vec::new();
        for player in game_account.players.iter() {
            nodes.push(Node::new(
                player.addr.clone(),
                player.access_version,
                ClientMode::Player,
            ));
            players.push(GamePlayer::new(
                player.access_version,
                player.position,
                player.balance,
            ));
        }

        let checkpoint =
            ContextCheckpoint::new_with_init_nodes(nodes.clone(), game_account.access_version);

        Ok(Self {
            game_addr: game_account.addr.clone(),
            game_id: 0,
            status: GameStatus::Uninit,
            nodes,
            players,
            dispatch: None,
            handler_state: Vec::new(),
            init_data: game_account.data.clone(),
            entry_type: game_account.entry_type.clone(),
            entry_lock: game_account.entry_lock,
            max_players: game_account.max_players,
            random_states: Vec::new(),
            decision_states: Vec::new(),
            checkpoint,
            versions: Versions::new(game_account.access_version, game_account.settle_version),
            settles: None,
            allow_exit: false,
            timestamp: 0,
        })
    }

    /// Build a context for a sub game launched by its parent's handler, per
    /// `spec.md` §4.4's `launchSubGames` effect.
    pub fn try_new_sub_game(init_account: &InitAccount, game_id: usize) -> Self {
        Self {
            game_addr: String::new(),
            game_id,
            status: GameStatus::Uninit,
            nodes: Vec::new(),
            players: init_account.players.clone(),
            dispatch: None,
            handler_state: Vec::new(),
            init_data: init_account.data.clone(),
            entry_type: init_account.entry_type.clone(),
            entry_lock: EntryLock::Closed,
            max_players: init_account.max_players,
            random_states: Vec::new(),
            decision_states: Vec::new(),
            checkpoint: ContextCheckpoint::default(),
            versions: Versions::default(),
            settles: None,
            allow_exit: false,
            timestamp: 0,
        }
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    pub fn set_handler_state(&mut self, state: Vec<u8>) {
        self.handler_state = state;
    }

    /// Schedule `event` to fire once `timestamp` reaches `self.timestamp +
    /// wait_ms`. Overwrites any previously pending dispatch, preserving
    /// invariant 4 (at most one pending dispatch).
    pub fn dispatch(&mut self, event: Event, wait_ms: u64) {
        self.dispatch = Some(DispatchEvent::new(event, self.timestamp + wait_ms));
    }

    pub fn cancel_dispatch(&mut self) {
        self.dispatch = None;
    }

    pub fn id_to_addr(&self, id: u64) -> Result<Addr> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.addr.clone())
            .ok_or(Error::CantMapIdToAddr(id))
    }

    pub fn addr_to_id(&self, addr: &str) -> Result<u64> {
        self.nodes
            .iter()
            .find(|n| n.addr == addr)
            .map(|n| n.id)
            .ok_or(Error::CantMapAddrToId(addr.to_string()))
    }

    fn server_addrs(&self) -> Vec<Addr> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.mode, ClientMode::Transactor | ClientMode::Validator))
            .map(|n| n.addr.clone())
            .collect()
    }

    /// Create a randomness, assigning the next 1-based id (invariant 1).
    pub fn init_random_state(&mut self, spec: RandomSpec) -> Result<RandomId> {
        let id = self.random_states.len() + 1;
        let owners = self.server_addrs();
        let state =
            RandomState::try_new(id, spec, &owners).map_err(|e| Error::RandomizationError(e.to_string()))?;
        self.random_states.push(state);
        Ok(id)
    }

    pub fn get_random_state(&self, id: RandomId) -> Result<&RandomState> {
        if id == 0 || id > self.random_states.len() {
            return Err(Error::InvalidRandomId);
        }
        Ok(&self.random_states[id - 1])
    }

    pub fn get_random_state_mut(&mut self, id: RandomId) -> Result<&mut RandomState> {
        if id == 0 || id > self.random_states.len() {
            return Err(Error::InvalidRandomId);
        }
        Ok(&mut self.random_states[id - 1])
    }

    pub fn get_decision_state(&self, id: DecisionId) -> Result<&DecisionState> {
        if id == 0 || id > self.decision_states.len() {
            return Err(Error::InvalidDecisionId);
        }
        Ok(&self.decision_states[id - 1])
    }

    pub fn get_decision_state_mut(&mut self, id: DecisionId) -> Result<&mut DecisionState> {
        if id == 0 || id > self.decision_states.len() {
            return Err(Error::InvalidDecisionId);
        }
        Ok(&mut self.decision_states[id - 1])
    }

    pub fn add_player(&mut self, player: GamePlayer) -> Result<()> {
        if self.players.iter().any(|p| p.position == player.position) {
            return Err(Error::PositionOccupied(player.position as usize));
        }
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(Error::PlayerAlreadyJoined(player.id.to_string()));
        }
        self.players.push(player);
        Ok(())
    }

    fn dispatch_operation_timeout_if_needed(&mut self, random_id: RandomId) -> Result<()> {
        if self.dispatch.is_some() {
            return Ok(());
        }
        let addrs = self.get_random_state(random_id)?.list_operating_addrs();
        if addrs.is_empty() {
            return Ok(());
        }
        let ids = addrs
            .iter()
            .map(|a| self.addr_to_id(a))
            .collect::<Result<Vec<_>>>()?;
        self.dispatch(Event::OperationTimeout { ids }, OPERATION_TIMEOUT_MS);
        Ok(())
    }

    // ---- Pre-handler bookkeeping, one method per `spec.md` §4.5 bullet ----

    /// `Sync` frame: add new nodes, seed new players as `ready`, bump
    /// `accessVersion`. Profile loading is the Base Client's job, not the
    /// context's.
    pub fn handle_sync(
        &mut self,
        new_players: Vec<PlayerJoin>,
        new_servers: Vec<ServerJoin>,
        transactor_addr: &str,
        access_version: u64,
    ) -> Result<()> {
        for server in new_servers {
            let mode = if server.addr == transactor_addr {
                ClientMode::Transactor
            } else {
                ClientMode::Validator
            };
            self.nodes
                .push(Node::new_pending(server.addr, server.access_version, mode));
        }
        for player in new_players {
            self.nodes.push(Node::new(
                player.addr.clone(),
                player.access_version,
                ClientMode::Player,
            ));
            self.add_player(GamePlayer::new(
                player.access_version,
                player.position,
                player.balance,
            ))?;
        }
        self.versions.access_version = access_version;
        Ok(())
    }

    /// `Join` event: add each newly confirmed player (position uniqueness
    /// enforced by `add_player`).
    pub fn handle_join(&mut self, players: Vec<GamePlayer>) -> Result<()> {
        for player in players {
            self.add_player(player)?;
        }
        Ok(())
    }

    /// `Leave` event: permitted only when the handler last set `allowExit`.
    pub fn handle_leave(&mut self, player_id: u64) -> Result<()> {
        if !self.allow_exit {
            return Err(Error::CantLeave);
        }
        self.players.retain(|p| p.id != player_id);
        self.nodes.retain(|n| n.id != player_id);
        Ok(())
    }

    /// `GameStart`: promote every pending node whose access version has
    /// since been confirmed by the context's own `accessVersion`.
    pub fn handle_game_start(&mut self) {
        self.status = GameStatus::Running;
        let access_version = self.versions.access_version;
        for node in self.nodes.iter_mut() {
            if let NodeStatus::Pending(pending_av) = node.status {
                if pending_av <= access_version {
                    node.status = NodeStatus::Ready;
                }
            }
        }
    }

    /// `Mask{sender, randomId, ciphertexts}`.
    pub fn handle_mask(
        &mut self,
        sender: u64,
        random_id: RandomId,
        ciphertexts: Vec<Ciphertext>,
    ) -> Result<()> {
        let addr = self.id_to_addr(sender)?;
        self.get_random_state_mut(random_id)?
            .mask(addr, ciphertexts)
            .map_err(|e| Error::RandomizationError(e.to_string()))?;
        self.dispatch_operation_timeout_if_needed(random_id)
    }

    /// `Lock{sender, randomId, ciphertextsAndDigests}`.
    pub fn handle_lock(
        &mut self,
        sender: u64,
        random_id: RandomId,
        ciphertexts_and_digests: Vec<(Ciphertext, SecretDigest)>,
    ) -> Result<()> {
        let addr = self.id_to_addr(sender)?;
        self.get_random_state_mut(random_id)?
            .lock(addr, ciphertexts_and_digests)
            .map_err(|e| Error::RandomizationError(e.to_string()))?;
        self.dispatch_operation_timeout_if_needed(random_id)
    }

    /// `AnswerDecision{sender, decisionId, ciphertext, digest}`.
    pub fn handle_answer_decision(
        &mut self,
        sender: u64,
        decision_id: DecisionId,
        ciphertext: Ciphertext,
        digest: SecretDigest,
    ) -> Result<()> {
        let addr = self.id_to_addr(sender)?;
        self.get_decision_state_mut(decision_id)?
            .answer(&addr, ciphertext, digest)
    }

    /// `ShareSecrets{sender, shares}`: record each share against its random
    /// or decision state; dispatch `SecretsReady` for every random state
    /// that just became fully shared.
    pub fn handle_share_secrets(&mut self, sender: u64, shares: Vec<SecretShare>) -> Result<()> {
        let from_addr = self.id_to_addr(sender)?;
        let mut newly_shared = Vec::new();
        for share in shares {
            match share {
                SecretShare::Random {
                    to_addr,
                    random_id,
                    index,
                    secret,
                    ..
                } => {
                    let state = self.get_random_state_mut(random_id)?;
                    let was_shared = state.is_shared();
                    state
                        .add_secret(from_addr.clone(), to_addr, index, secret)
                        .map_err(|e| Error::RandomizationError(e.to_string()))?;
                    if !was_shared && state.is_shared() {
                        newly_shared.push(random_id);
                    }
                }
                SecretShare::Answer {
                    decision_id,
                    secret,
                    ..
                } => {
                    self.get_decision_state_mut(decision_id)?
                        .add_secret(&from_addr, secret)?;
                }
            }
        }
        if !newly_shared.is_empty() {
            self.dispatch(
                Event::SecretsReady {
                    random_ids: newly_shared,
                },
                0,
            );
        }
        Ok(())
    }

    /// Record plaintexts decrypted locally by the crypto peer against a
    /// random state's public `revealed` map, the context-side half of
    /// `SecretsReady` handling (the decryption itself lives in the
    /// `Client`/decryption cache, outside the context).
    pub fn add_revealed(&mut self, random_id: RandomId, revealed: HashMap<usize, String>) -> Result<()> {
        self.get_random_state_mut(random_id)?
            .add_revealed(revealed)
            .map_err(|e| Error::RandomizationError(e.to_string()))
    }

    /// Dispatch `event` to the matching pre-handler bookkeeping method, per
    /// `spec.md` §4.5. Events with no prescribed bookkeeping (`Bridge`,
    /// `WaitingTimeout`, `OperationTimeout`, `ActionTimeout`, `ServerLeave`,
    /// `DrawRandomItems`, `DrawTimeout`, and the base-client-synthetic
    /// `Init`/`CheckpointReady`/`EndOfHistory`/`Ready`/`Shutdown`/
    /// `RandomnessReady`/`Custom`) pass through untouched.
    pub fn prepare_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::ShareSecrets { sender, shares } => {
                self.handle_share_secrets(*sender, shares.clone())
            }
            Event::AnswerDecision {
                sender,
                decision_id,
                ciphertext,
                digest,
            } => self.handle_answer_decision(
                *sender,
                *decision_id,
                ciphertext.clone(),
                digest.clone(),
            ),
            Event::Mask {
                sender,
                random_id,
                ciphertexts,
            } => self.handle_mask(*sender, *random_id, ciphertexts.clone()),
            Event::Lock {
                sender,
                random_id,
                ciphertexts_and_digests,
            } => self.handle_lock(*sender, *random_id, ciphertexts_and_digests.clone()),
            Event::Join { players } => self.handle_join(players.clone()),
            Event::Leave { player_id } => self.handle_leave(*player_id),
            Event::GameStart => {
                self.handle_game_start();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn get_dispatch(&self) -> &Option<DispatchEvent> {
        &self.dispatch
    }

    pub fn get_timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Install a reconciled checkpoint at `(access_version, settle_version)`.
    /// Fails with `InvalidCheckpoint` if `settle_version` doesn't match the
    /// context's current one. Resets random/decision states (invariant 2).
    pub fn apply_checkpoint(&mut self, access_version: u64, settle_version: u64) -> Result<()> {
        if settle_version != self.versions.settle_version {
            return Err(Error::InvalidCheckpoint);
        }
        self.versions.access_version = access_version;
        self.random_states.clear();
        self.decision_states.clear();
        Ok(())
    }

    /// Take the pending settle batch, bumping `settleVersion` by exactly
    /// one (invariant 3). Returns `None` if nothing is pending; a second
    /// call after a first always returns `None`.
    pub fn apply_and_take_settles(&mut self) -> Option<Vec<Settle>> {
        let settles = self.settles.take()?;
        self.versions.settle_version += 1;
        Some(settles)
    }

    /// Build the `Effect-in` record the Effect Bridge hands the handler:
    /// `spec.md` §4.4 step 1.
    pub fn derive_effect(&self, is_init: bool) -> Effect {
        let mut revealed = HashMap::new();
        for state in self.random_states.iter() {
            let r = state.get_revealed();
            if !r.is_empty() {
                revealed.insert(state.id, r.clone());
            }
        }

        let mut answered = HashMap::new();
        for state in self.decision_states.iter() {
            if let Some(value) = state.get_revealed() {
                answered.insert(state.id, value.clone());
            }
        }

        Effect {
            timestamp: self.timestamp,
            curr_random_id: self.random_states.len() + 1,
            curr_decision_id: self.decision_states.len() + 1,
            nodes_count: self.nodes.len() as u16,
            revealed,
            answered,
            handler_state: Some(self.handler_state.clone()),
            valid_players: self.players.clone(),
            entry_lock: Some(self.entry_lock),
            curr_sub_game_id: self.game_id,
            is_init,
            ..Default::default()
        }
    }

    /// Apply the handler's returned `Effect-out`: `spec.md` §4.4's
    /// `applyEffect` mutation list. Returns the parts of the effect that
    /// must be delivered outside the context (bridge events, sub-game
    /// launches, settlement/transfer/award instructions, log lines).
    pub fn apply_effect(&mut self, mut effect: Effect) -> Result<EffectOutcome> {
        if let Some(err) = effect.__take_error() {
            return Err(Error::HandleError(err));
        }

        if effect.start_game {
            self.status = GameStatus::Running;
        }
        if effect.stop_game {
            self.status = GameStatus::Closed;
        }
        if effect.cancel_dispatch {
            self.dispatch = None;
        }

        if let Some(EffectActionTimeout { player_id, timeout }) = effect.action_timeout.take() {
            self.dispatch(Event::ActionTimeout { player_id }, timeout);
        } else if let Some(timeout) = effect.wait_timeout.take() {
            self.dispatch(Event::WaitingTimeout, timeout);
        }

        for spec in effect.init_random_states.drain(..) {
            self.init_random_state(spec)?;
        }

        for ask in effect.asks.drain(..) {
            let owner = self.id_to_addr(ask.player_id)?;
            let id = self.decision_states.len() + 1;
            self.decision_states.push(DecisionState::new(id, owner));
        }

        for assign in effect.assigns.drain(..) {
            let addr = self.id_to_addr(assign.player_id)?;
            self.get_random_state_mut(assign.random_id)?
                .assign(addr, assign.indexes)
                .map_err(|e| Error::RandomizationError(e.to_string()))?;
        }

        for reveal in effect.reveals.drain(..) {
            self.get_random_state_mut(reveal.random_id)?
                .reveal(reveal.indexes)
                .map_err(|e| Error::RandomizationError(e.to_string()))?;
        }

        for release in effect.releases.drain(..) {
            self.get_decision_state_mut(release.decision_id)?.reveal()?;
        }

        if !effect.settles.is_empty() {
            self.settles = Some(std::mem::take(&mut effect.settles));
        }

        if let Some(entry_lock) = effect.entry_lock.take() {
            self.entry_lock = entry_lock;
        }

        let is_checkpoint = effect.is_checkpoint;
        if let Some(state) = effect.handler_state.take() {
            self.handler_state = state;
        }
        if is_checkpoint {
            self.random_states.clear();
            self.decision_states.clear();
        }

        Ok(EffectOutcome {
            bridge_events: std::mem::take(&mut effect.bridge_events),
            launch_sub_games: std::mem::take(&mut effect.launch_sub_games),
            reject_deposits: std::mem::take(&mut effect.reject_deposits),
            accept_deposits: std::mem::take(&mut effect.accept_deposits),
            awards: std::mem::take(&mut effect.awards),
            transfers: std::mem::take(&mut effect.transfers),
            logs: std::mem::take(&mut effect.logs),
            is_checkpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_api::types::{EntryType, GameStatus};

    fn bare_context() -> GameContext {
        let transactor = Node::new("transactor".to_string(), 1, ClientMode::Transactor);
        let nodes = vec![transactor.clone()];
        GameContext {
            game_addr: "game".into(),
            game_id: 0,
            status: GameStatus::Uninit,
            nodes,
            players: Vec::new(),
            dispatch: None,
            handler_state: Vec::new(),
            init_data: Vec::new(),
            entry_type: EntryType::Disabled,
            entry_lock: EntryLock::Open,
            max_players: 6,
            random_states: Vec::new(),
            decision_states: Vec::new(),
            checkpoint: ContextCheckpoint::new_with_init_nodes(vec![transactor], 0),
            versions: Versions::new(0, 0),
            settles: None,
            allow_exit: false,
            timestamp: 0,
        }
    }

    #[test]
    fn test_random_ids_are_dense() -> anyhow::Result<()> {
        let mut ctx = bare_context();
        let id1 = ctx.init_random_state(RandomSpec::shuffled_list(vec!["a".into(), "b".into()]))?;
        let id2 = ctx.init_random_state(RandomSpec::shuffled_list(vec!["c".into(), "d".into()]))?;
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);
        assert_eq!(ctx.random_states[0].id, 1);
        assert_eq!(ctx.random_states[1].id, 2);
        Ok(())
    }

    #[test]
    fn test_get_random_state_boundary() {
        let ctx = bare_context();
        assert_eq!(ctx.get_random_state(0).unwrap_err(), Error::InvalidRandomId);
        assert_eq!(ctx.get_random_state(1).unwrap_err(), Error::InvalidRandomId);
    }

    #[test]
    fn test_id_addr_roundtrip() -> anyhow::Result<()> {
        let ctx = bare_context();
        let addr = ctx.id_to_addr(1)?;
        assert_eq!(ctx.addr_to_id(&addr)?, 1);
        Ok(())
    }

    #[test]
    fn test_add_player_duplicate_position() -> anyhow::Result<()> {
        let mut ctx = bare_context();
        ctx.add_player(GamePlayer::new(1, 0, 100))?;
        assert_eq!(
            ctx.add_player(GamePlayer::new(2, 0, 100)).unwrap_err(),
            Error::PositionOccupied(0)
        );
        Ok(())
    }

    #[test]
    fn test_apply_checkpoint_version_mismatch() {
        let mut ctx = bare_context();
        assert_eq!(
            ctx.apply_checkpoint(0, 1).unwrap_err(),
            Error::InvalidCheckpoint
        );
        assert!(ctx.apply_checkpoint(0, 0).is_ok());
    }

    #[test]
    fn test_apply_and_take_settles() {
        let mut ctx = bare_context();
        ctx.settles = Some(vec![Settle::add(1, 200), Settle::sub(2, 200), Settle::eject(3)]);
        let settles = ctx.apply_and_take_settles().expect("settles pending");
        assert_eq!(settles.len(), 3);
        assert_eq!(ctx.versions.settle_version, 1);
        assert_eq!(ctx.apply_and_take_settles(), None);
    }
}
