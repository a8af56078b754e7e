// Shared fixtures for integration tests

#![allow(dead_code)]

use snake_search::types::{Coord, Direction, GameState, Snake};

pub fn coords(cells: &[(i32, i32)]) -> Vec<Coord> {
    cells.iter().map(|&(x, y)| Coord::new(x, y)).collect()
}

pub fn snake(cells: &[(i32, i32)], facing: Direction) -> Snake {
    Snake::new(coords(cells), facing)
}

pub fn board(width: i32, height: i32, snakes: Vec<Snake>, target: Option<(i32, i32)>) -> GameState {
    GameState::new(width, height, snakes, target.map(|(x, y)| Coord::new(x, y)))
}

/// Two snakes on an open 7x7 board with the target far from both heads
pub fn open_duel() -> GameState {
    board(
        7,
        7,
        vec![
            snake(&[(1, 3), (0, 3)], Direction::East),
            snake(&[(3, 1), (3, 0)], Direction::South),
        ],
        Some((6, 6)),
    )
}

/// A length-3 snake at the open end of a 4x1 corridor: one move survives
/// the first ply, nothing survives the second
pub fn dead_end_corridor() -> GameState {
    board(
        4,
        1,
        vec![snake(&[(2, 0), (1, 0), (0, 0)], Direction::East)],
        Some((0, 0)),
    )
}
