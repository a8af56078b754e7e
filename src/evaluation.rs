// Heuristic state evaluation shared by both search strategies

use crate::game::Simulation;
use crate::pathfinding::target_distance;
use crate::profile;

/// Score of a dead player. Dominates every other value and nothing else equals it.
pub const DEAD_SCORE: f64 = f64::NEG_INFINITY;

/// Signed length difference between `player` and its longest living opponent
pub fn length_difference<S: Simulation>(state: &S, player: usize) -> i64 {
    let longest_enemy = (0..state.player_count())
        .filter(|&i| i != player && !state.is_dead(i))
        .map(|i| state.size(i))
        .max()
        .unwrap_or(0);

    state.size(player) as i64 - longest_enemy as i64
}

/// Scores `state` from `player`'s point of view.
///
/// The length difference dominates; the reciprocal target distance adds a
/// proximity bonus in (0, 1]. An unreachable target contributes almost nothing.
pub fn evaluate<S: Simulation>(state: &S, player: usize) -> f64 {
    profile!("eval", {
        if state.is_dead(player) {
            return DEAD_SCORE;
        }

        let distance = target_distance(state, player);
        length_difference(state, player) as f64 + 1.0 / f64::from(distance)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::UNREACHABLE;
    use crate::types::{Coord, Direction, GameState, Snake};

    #[test]
    fn test_unreachable_bonus_is_tiny_but_positive() {
        let bonus = 1.0 / f64::from(UNREACHABLE);
        assert!(bonus > 0.0);
        assert!(bonus < 1e-9);
    }

    #[test]
    fn test_length_difference_ignores_dead_opponents() {
        let mut state = GameState::new(
            8,
            8,
            vec![
                Snake::new(vec![Coord::new(1, 1), Coord::new(0, 1)], Direction::East),
                Snake::new(
                    vec![Coord::new(5, 5), Coord::new(5, 6), Coord::new(5, 7)],
                    Direction::North,
                ),
            ],
            Some(Coord::new(3, 1)),
        );
        assert_eq!(length_difference(&state, 0), -1);

        state.snakes[1].alive = false;
        state.snakes[1].body.clear();
        assert_eq!(length_difference(&state, 0), 2);
    }

    #[test]
    fn test_evaluate_adds_reciprocal_distance() {
        let state = GameState::new(
            5,
            5,
            vec![Snake::new(vec![Coord::new(0, 0)], Direction::East)],
            Some(Coord::new(0, 2)),
        );
        let score = evaluate(&state, 0);
        assert!((score - (1.0 + 0.5)).abs() < 1e-12);
    }
}
