//! Game state and round lifecycle
//!
//! All state needed to replay a session deterministically lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::contact::Action;
use super::entity::EntityId;
use super::spawner::Spawner;

/// Coarse state of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player hit a bad item; waiting for restart
    GameOver,
}

/// What applying a contact changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Scored { item: EntityId },
    Ended { item: EntityId },
    /// Ignored pair, stale item, or round already over
    Unchanged,
}

/// Final tally of a round that ended in game over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub score: u64,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn height RNG
    pub rng: Pcg32,
    pub score: u64,
    pub phase: GamePhase,
    /// 1-based round number, bumped on each restart
    pub round: u32,
    pub spawner: Spawner,
    pub player: EntityId,
    pub floor: EntityId,
    pub ceiling: EntityId,
    /// Spawned balls still in the world (sorted by id)
    items: Vec<EntityId>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            phase: GamePhase::Running,
            round: 1,
            spawner: Spawner::new(),
            player: 0,
            floor: 0,
            ceiling: 0,
            items: Vec::new(),
            next_id: 1,
        };
        state.player = state.next_entity_id();
        state.floor = state.next_entity_id();
        state.ceiling = state.next_entity_id();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Live spawned balls, ascending by id
    pub fn items(&self) -> &[EntityId] {
        &self.items
    }

    pub fn is_live_item(&self, id: EntityId) -> bool {
        self.items.binary_search(&id).is_ok()
    }

    pub fn track_item(&mut self, id: EntityId) {
        if let Err(pos) = self.items.binary_search(&id) {
            self.items.insert(pos, id);
        }
    }

    /// Forget an item; false if it was already gone
    pub fn untrack_item(&mut self, id: EntityId) -> bool {
        match self.items.binary_search(&id) {
            Ok(pos) => {
                self.items.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Apply a resolved contact.
    ///
    /// Runs at most once per item: a second report for an item that is
    /// already removed changes nothing.
    pub fn apply_contact(&mut self, action: Action) -> ContactOutcome {
        if !self.is_running() {
            return ContactOutcome::Unchanged;
        }
        match action {
            Action::Score { item } => {
                if !self.untrack_item(item) {
                    log::debug!("Contact with removed item {} ignored", item);
                    return ContactOutcome::Unchanged;
                }
                self.score += 1;
                ContactOutcome::Scored { item }
            }
            Action::GameOver { item } => {
                if !self.untrack_item(item) {
                    log::debug!("Contact with removed item {} ignored", item);
                    return ContactOutcome::Unchanged;
                }
                self.phase = GamePhase::GameOver;
                log::info!("Round {} over with score {}", self.round, self.score);
                ContactOutcome::Ended { item }
            }
            Action::Ignore => ContactOutcome::Unchanged,
        }
    }

    /// Start the next round. Returns the items that must leave the world,
    /// or `None` if the round is still running.
    pub fn restart(&mut self) -> Option<Vec<EntityId>> {
        if self.is_running() {
            return None;
        }
        self.score = 0;
        self.phase = GamePhase::Running;
        self.round += 1;
        self.spawner.reset();
        log::info!("Round {} started", self.round);
        Some(std::mem::take(&mut self.items))
    }
}
