//! Event-driven update
//!
//! The host delivers one [`Event`] at a time; [`step`] mutates the state and
//! answers with the [`Command`]s the host must carry out, in order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::ContactEvent;
use super::controller;
use super::entity::{EntityId, EntitySpec};
use super::state::{ContactOutcome, GamePhase, GameState, RoundResult};
use crate::tuning::Tuning;

/// Something the host observed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Periodic spawn timer fired
    SpawnTimer,
    /// Two bodies started overlapping
    Contact(ContactEvent),
    /// Player tapped the screen
    Tap,
    /// Presentation layer asked for a new round
    Restart,
    /// A ball finished its path off the left edge
    ItemExited(EntityId),
}

/// Something the host must do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Spawn(EntitySpec),
    /// Remove a body; removing an absent body is a no-op
    Remove(EntityId),
    ApplyImpulse { id: EntityId, impulse: Vec2 },
    /// Teleport a body and clear its velocity
    ResetPlayer { id: EntityId, position: Vec2 },
    StartSpawnTimer,
    StopSpawnTimer,
    ScoreChanged(u64),
    PhaseChanged(GamePhase),
    /// A round finished in game over; unfinished rounds are never reported
    RoundEnded(RoundResult),
}

/// Commands that build the initial scene
pub fn setup(state: &GameState, tuning: &Tuning) -> Vec<Command> {
    let arena = tuning.arena();
    let mut commands = vec![
        Command::Spawn(EntitySpec::floor(state.floor, &arena)),
        Command::Spawn(EntitySpec::ceiling(state.ceiling, &arena)),
        Command::Spawn(EntitySpec::player(
            state.player,
            tuning.player_start(),
            tuning.player_size,
        )),
        Command::ScoreChanged(state.score),
        Command::PhaseChanged(state.phase),
    ];
    if state.is_running() {
        commands.push(Command::StartSpawnTimer);
    }
    log::info!("Scene ready (seed {})", state.seed);
    commands
}

/// Advance the game by one event
pub fn step(state: &mut GameState, event: &Event, tuning: &Tuning) -> Vec<Command> {
    match *event {
        Event::SpawnTimer => spawn_item(state, tuning),
        Event::Contact(contact) => resolve_contact(state, &contact),
        Event::Tap => tap(state, tuning),
        Event::Restart => restart(state, tuning),
        Event::ItemExited(id) => {
            if state.untrack_item(id) {
                vec![Command::Remove(id)]
            } else {
                Vec::new()
            }
        }
    }
}

fn spawn_item(state: &mut GameState, tuning: &Tuning) -> Vec<Command> {
    // The timer is stopped on game over; a late fire must not leak balls
    if !state.is_running() {
        return Vec::new();
    }
    let Some(spec) = state.spawner.tick(tuning, &mut state.rng) else {
        return Vec::new();
    };
    let id = state.next_entity_id();
    log::debug!("Spawn {:?} #{} at y={}", spec.category, id, spec.start.y);
    state.track_item(id);
    vec![Command::Spawn(spec.into_entity(id))]
}

fn resolve_contact(state: &mut GameState, contact: &ContactEvent) -> Vec<Command> {
    match state.apply_contact(contact.resolve()) {
        ContactOutcome::Scored { item } => {
            vec![Command::Remove(item), Command::ScoreChanged(state.score)]
        }
        ContactOutcome::Ended { item } => vec![
            Command::Remove(item),
            Command::StopSpawnTimer,
            Command::PhaseChanged(GamePhase::GameOver),
            Command::RoundEnded(RoundResult {
                round: state.round,
                score: state.score,
            }),
        ],
        ContactOutcome::Unchanged => Vec::new(),
    }
}

fn tap(state: &mut GameState, tuning: &Tuning) -> Vec<Command> {
    match controller::on_tap(state.phase, tuning) {
        Some(impulse) => vec![Command::ApplyImpulse {
            id: state.player,
            impulse,
        }],
        // Tapping the game-over screen starts a new round
        None => restart(state, tuning),
    }
}

fn restart(state: &mut GameState, tuning: &Tuning) -> Vec<Command> {
    let Some(cleared) = state.restart() else {
        log::debug!("Restart ignored while running");
        return Vec::new();
    };
    let mut commands: Vec<Command> = cleared.into_iter().map(Command::Remove).collect();
    commands.extend([
        Command::ResetPlayer {
            id: state.player,
            position: tuning.player_start(),
        },
        Command::ScoreChanged(state.score),
        Command::PhaseChanged(state.phase),
        Command::StartSpawnTimer,
    ]);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Category;

    fn spawned_ids(commands: &[Command]) -> Vec<(EntityId, Category)> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Spawn(spec) => Some((spec.id, spec.category)),
                _ => None,
            })
            .collect()
    }

    /// Fire the spawn timer until one ball of each kind exists
    fn spawn_both(state: &mut GameState, tuning: &Tuning) -> (EntityId, EntityId) {
        let mut good = None;
        let mut bad = None;
        while good.is_none() || bad.is_none() {
            for (id, category) in spawned_ids(&step(state, &Event::SpawnTimer, tuning)) {
                match category {
                    Category::GoodItem => good = good.or(Some(id)),
                    Category::BadItem => bad = bad.or(Some(id)),
                    _ => unreachable!(),
                }
            }
        }
        (good.unwrap(), bad.unwrap())
    }

    #[test]
    fn test_setup_builds_scene() {
        let state = GameState::new(1);
        let tuning = Tuning::default();
        let commands = setup(&state, &tuning);

        let spawned = spawned_ids(&commands);
        assert_eq!(
            spawned,
            vec![
                (state.floor, Category::Boundary),
                (state.ceiling, Category::Boundary),
                (state.player, Category::Hazard),
            ]
        );
        assert!(commands.contains(&Command::StartSpawnTimer));
        assert!(commands.contains(&Command::ScoreChanged(0)));
    }

    #[test]
    fn test_contact_scores_in_either_order() {
        let tuning = Tuning::default();
        for swap in [false, true] {
            let mut state = GameState::new(11);
            let (good, _) = spawn_both(&mut state, &tuning);
            let mut contact = ContactEvent::new(
                (state.player, Category::Hazard),
                (good, Category::GoodItem),
            );
            if swap {
                contact = contact.swapped();
            }

            let commands = step(&mut state, &Event::Contact(contact), &tuning);
            assert_eq!(commands, vec![Command::Remove(good), Command::ScoreChanged(1)]);
            assert_eq!(state.score, 1);
            assert_eq!(state.phase, GamePhase::Running);

            // Reported again after removal
            assert!(step(&mut state, &Event::Contact(contact), &tuning).is_empty());
            assert_eq!(state.score, 1);
        }
    }

    #[test]
    fn test_bad_item_ends_round_once() {
        let tuning = Tuning::default();
        let mut state = GameState::new(5);
        let (_, bad) = spawn_both(&mut state, &tuning);
        state.score = 5;

        let contact = ContactEvent::new((bad, Category::BadItem), (state.player, Category::Hazard));
        let commands = step(&mut state, &Event::Contact(contact), &tuning);
        assert_eq!(
            commands,
            vec![
                Command::Remove(bad),
                Command::StopSpawnTimer,
                Command::PhaseChanged(GamePhase::GameOver),
                Command::RoundEnded(RoundResult { round: 1, score: 5 }),
            ]
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 5);

        assert!(step(&mut state, &Event::Contact(contact.swapped()), &tuning).is_empty());
        assert!(step(&mut state, &Event::SpawnTimer, &tuning).is_empty());
    }

    #[test]
    fn test_tap_gating() {
        let tuning = Tuning::default();
        let mut state = GameState::new(3);

        let commands = step(&mut state, &Event::Tap, &tuning);
        assert_eq!(
            commands,
            vec![Command::ApplyImpulse {
                id: state.player,
                impulse: Vec2::new(0.0, 500.0),
            }]
        );

        state.phase = GamePhase::GameOver;
        let commands = step(&mut state, &Event::Tap, &tuning);
        assert!(
            !commands
                .iter()
                .any(|c| matches!(c, Command::ApplyImpulse { .. }))
        );
        // The tap restarted the round instead
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_restart_clears_items() {
        let tuning = Tuning::default();
        let mut state = GameState::new(9);
        let (good, bad) = spawn_both(&mut state, &tuning);
        let extra = spawned_ids(&step(&mut state, &Event::SpawnTimer, &tuning));
        state.score = 4;

        // Restart while running is ignored
        assert!(step(&mut state, &Event::Restart, &tuning).is_empty());
        assert_eq!(state.score, 4);

        let contact = ContactEvent::new((state.player, Category::Hazard), (bad, Category::BadItem));
        step(&mut state, &Event::Contact(contact), &tuning);

        let commands = step(&mut state, &Event::Restart, &tuning);
        let mut removed: Vec<EntityId> = commands
            .iter()
            .filter_map(|c| match c {
                Command::Remove(id) => Some(*id),
                _ => None,
            })
            .collect();
        removed.sort();
        let mut expected: Vec<EntityId> = extra.iter().map(|(id, _)| *id).collect();
        expected.push(good);
        expected.sort();
        assert_eq!(removed, expected);

        assert!(commands.contains(&Command::ResetPlayer {
            id: state.player,
            position: tuning.player_start(),
        }));
        assert!(commands.contains(&Command::StartSpawnTimer));
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_round_results_follow_round_numbers() {
        let tuning = Tuning::default();
        let mut state = GameState::new(8);
        let mut results = Vec::new();

        for score in [2, 0] {
            let (_, bad) = spawn_both(&mut state, &tuning);
            state.score = score;
            let hit = ContactEvent::new((state.player, Category::Hazard), (bad, Category::BadItem));
            for event in [Event::Contact(hit), Event::Contact(hit), Event::Restart] {
                results.extend(step(&mut state, &event, &tuning).into_iter().filter_map(
                    |c| match c {
                        Command::RoundEnded(result) => Some(result),
                        _ => None,
                    },
                ));
            }
        }
        // Round 3 is still running and has nothing to report
        assert_eq!(state.round, 3);
        assert_eq!(
            results,
            vec![
                RoundResult { round: 1, score: 2 },
                RoundResult { round: 2, score: 0 },
            ]
        );
    }

    #[test]
    fn test_item_exit_removes_once() {
        let tuning = Tuning::default();
        let mut state = GameState::new(2);
        let (good, _) = spawn_both(&mut state, &tuning);

        assert_eq!(
            step(&mut state, &Event::ItemExited(good), &tuning),
            vec![Command::Remove(good)]
        );
        assert!(step(&mut state, &Event::ItemExited(good), &tuning).is_empty());
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let events = [
            Event::SpawnTimer,
            Event::Tap,
            Event::SpawnTimer,
            Event::SpawnTimer,
            Event::Tap,
            Event::SpawnTimer,
        ];
        for event in &events {
            let a = step(&mut state1, event, &tuning);
            let b = step(&mut state2, event, &tuning);
            assert_eq!(a, b);
        }

        let snapshot1 = serde_json::to_string(&state1).expect("serialize");
        let snapshot2 = serde_json::to_string(&state2).expect("serialize");
        assert_eq!(snapshot1, snapshot2);
    }
}
