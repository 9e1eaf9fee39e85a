//! Player input
//!
//! A tap is the only input. While running it kicks the player upward.

use glam::Vec2;

use super::state::GamePhase;
use crate::tuning::Tuning;

/// Impulse for one tap, or `None` when taps don't move the player
pub fn on_tap(phase: GamePhase, tuning: &Tuning) -> Option<Vec2> {
    match phase {
        GamePhase::Running => Some(Vec2::new(0.0, tuning.tap_impulse)),
        GamePhase::GameOver => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_while_running() {
        let tuning = Tuning::default();
        assert_eq!(on_tap(GamePhase::Running, &tuning), Some(Vec2::new(0.0, 500.0)));
    }

    #[test]
    fn test_tap_while_game_over() {
        assert_eq!(on_tap(GamePhase::GameOver, &Tuning::default()), None);
    }
}
