// Simulation service consumed by the search engine
//
// The engine never looks inside a game state directly. It queries and mutates
// private clones through this trait, so any grid snake implementation can be
// searched as long as it provides these primitives.

use crate::types::{Coord, Direction, GameState};

/// Queries and clone-side mutations the search needs from a game state
pub trait Simulation: Clone {
    fn is_dead(&self, player: usize) -> bool;
    fn is_game_over(&self) -> bool;
    /// Body length of `player`
    fn size(&self, player: usize) -> usize;
    fn player_count(&self) -> usize;
    fn target(&self) -> Option<Coord>;
    /// Body segments of `player`, head first
    fn body(&self, player: usize) -> &[Coord];
    fn last_orientation(&self, player: usize) -> Direction;
    fn is_legal_move(&self, player: usize, direction: Direction) -> bool;
    /// Whether `coord` lies on the playing field
    fn in_bounds(&self, coord: &Coord) -> bool;

    fn set_orientation(&mut self, player: usize, direction: Direction);
    /// Advances `player` one cell along its orientation
    fn update_player_position(&mut self, player: usize);
    /// Places a new target at a random position
    fn choose_next_target(&mut self);

    fn has_target(&self) -> bool {
        self.target().is_some()
    }

    fn head(&self, player: usize) -> Option<Coord> {
        self.body(player).first().copied()
    }
}

impl Simulation for GameState {
    fn is_dead(&self, player: usize) -> bool {
        self.snakes.get(player).map_or(true, |s| !s.alive)
    }

    fn is_game_over(&self) -> bool {
        let living = self.living_players();
        living == 0 || (self.snakes.len() > 1 && living <= 1)
    }

    fn size(&self, player: usize) -> usize {
        self.snakes.get(player).map_or(0, |s| s.body.len())
    }

    fn player_count(&self) -> usize {
        self.snakes.len()
    }

    fn target(&self) -> Option<Coord> {
        self.target
    }

    fn body(&self, player: usize) -> &[Coord] {
        self.snakes.get(player).map_or(&[][..], |s| s.body.as_slice())
    }

    fn last_orientation(&self, player: usize) -> Direction {
        self.snakes
            .get(player)
            .map_or(Direction::North, |s| s.orientation)
    }

    fn is_legal_move(&self, player: usize, direction: Direction) -> bool {
        self.legal(player, direction)
    }

    fn in_bounds(&self, coord: &Coord) -> bool {
        GameState::in_bounds(self, coord)
    }

    fn set_orientation(&mut self, player: usize, direction: Direction) {
        if let Some(snake) = self.snakes.get_mut(player) {
            snake.orientation = direction;
        }
    }

    fn update_player_position(&mut self, player: usize) {
        self.step(player);
    }

    fn choose_next_target(&mut self) {
        self.respawn_target(&mut rand::rng());
    }
}
