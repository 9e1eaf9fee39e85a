//! Engine seam
//!
//! The simulation never touches a physics or rendering engine directly. It
//! emits [`Command`]s, and a [`Host`] carries them out. Any engine can be
//! plugged in by implementing the trait; [`HeadlessWorld`] is a minimal
//! in-process one for tests and the demo binary.

pub mod headless;

pub use headless::HeadlessWorld;

use glam::Vec2;

use crate::sim::{
    Command, EntityId, EntitySpec, Event, GamePhase, GameState, RoundResult, step,
};
use crate::tuning::Tuning;

/// Services the game needs from its engine
pub trait Host {
    /// Add a visual and physical body to the world
    fn spawn(&mut self, spec: &EntitySpec);

    /// Remove a body; must tolerate ids that are already gone
    fn remove(&mut self, id: EntityId);

    fn apply_impulse(&mut self, id: EntityId, impulse: Vec2);

    /// Move a body and stop it
    fn reset_body(&mut self, id: EntityId, position: Vec2);

    /// Start or stop the periodic spawn timer
    fn set_spawn_timer(&mut self, running: bool);

    /// Score display hook
    fn score_changed(&mut self, _score: u64) {}

    /// Game-over overlay hook
    fn phase_changed(&mut self, _phase: GamePhase) {}

    /// Called once per round that ended in game over
    fn round_ended(&mut self, _result: RoundResult) {}
}

/// Carry out commands in order
pub fn apply<H: Host + ?Sized>(commands: &[Command], host: &mut H) {
    for command in commands {
        match command {
            Command::Spawn(spec) => host.spawn(spec),
            Command::Remove(id) => host.remove(*id),
            Command::ApplyImpulse { id, impulse } => host.apply_impulse(*id, *impulse),
            Command::ResetPlayer { id, position } => host.reset_body(*id, *position),
            Command::StartSpawnTimer => host.set_spawn_timer(true),
            Command::StopSpawnTimer => host.set_spawn_timer(false),
            Command::ScoreChanged(score) => host.score_changed(*score),
            Command::PhaseChanged(phase) => host.phase_changed(*phase),
            Command::RoundEnded(result) => host.round_ended(*result),
        }
    }
}

/// Step each event through the game and apply the results to `host`.
///
/// Returns every command issued, in order.
pub fn dispatch<H, I>(
    state: &mut GameState,
    tuning: &Tuning,
    events: I,
    host: &mut H,
) -> Vec<Command>
where
    H: Host + ?Sized,
    I: IntoIterator<Item = Event>,
{
    let mut issued = Vec::new();
    for event in events {
        let commands = step(state, &event, tuning);
        apply(&commands, &mut *host);
        issued.extend(commands);
    }
    issued
}
