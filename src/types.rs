// Grid snake game types
// Coordinates, orientations and the reference simulation the search engine plays on

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 2D coordinate on the grid
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// The four orthogonal neighbours, in no particular order
    pub fn neighbors(&self) -> [Coord; 4] {
        [
            Coord::new(self.x + 1, self.y),
            Coord::new(self.x - 1, self.y),
            Coord::new(self.x, self.y + 1),
            Coord::new(self.x, self.y - 1),
        ]
    }

    pub fn manhattan_distance(&self, other: &Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Represents the four possible orientations of a snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Returns all orientations in child-generation order
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    /// Converts direction to its lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    /// Parses a direction name, case-insensitive
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "east" | "e" => Ok(Direction::East),
            "south" | "s" => Ok(Direction::South),
            "west" | "w" => Ok(Direction::West),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Calculates the next coordinate when moving in this direction.
    /// North decreases y.
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::North => Coord { x: coord.x, y: coord.y - 1 },
            Direction::East => Coord { x: coord.x + 1, y: coord.y },
            Direction::South => Coord { x: coord.x, y: coord.y + 1 },
            Direction::West => Coord { x: coord.x - 1, y: coord.y },
        }
    }
}

/// A single player's snake
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head first
    pub body: Vec<Coord>,
    pub orientation: Direction,
    pub alive: bool,
    /// Segments still to be added by holding the tail in place
    #[serde(default)]
    pub pending_growth: u32,
}

impl Snake {
    pub fn new(body: Vec<Coord>, orientation: Direction) -> Self {
        let alive = !body.is_empty();
        Snake {
            body,
            orientation,
            alive,
            pending_growth: 0,
        }
    }

    pub fn head(&self) -> Option<Coord> {
        self.body.first().copied()
    }
}

/// Reference grid simulation: snakes move one at a time, a single target
/// respawns at a random free cell after being eaten
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GameState {
    pub width: i32,
    pub height: i32,
    pub snakes: Vec<Snake>,
    pub target: Option<Coord>,
    pub growth_per_target: u32,
}

impl GameState {
    pub fn new(width: i32, height: i32, snakes: Vec<Snake>, target: Option<Coord>) -> Self {
        GameState {
            width,
            height,
            snakes,
            target,
            growth_per_target: 1,
        }
    }

    /// Builds a game with `players` straight snakes of `initial_length`,
    /// spread over the board rows and facing east
    pub fn with_players(width: i32, height: i32, players: usize, initial_length: usize) -> Self {
        let snakes = (0..players)
            .map(|p| {
                let y = ((p as i32 + 1) * height) / (players as i32 + 1);
                let head_x = (initial_length as i32 - 1).min(width - 1);
                let body = (0..initial_length as i32)
                    .map(|i| Coord::new((head_x - i).max(0), y))
                    .collect();
                Snake::new(body, Direction::East)
            })
            .collect();

        GameState::new(width, height, snakes, None)
    }

    pub fn with_growth(mut self, growth_per_target: u32) -> Self {
        self.growth_per_target = growth_per_target;
        self
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    pub fn living_players(&self) -> usize {
        self.snakes.iter().filter(|s| s.alive).count()
    }

    fn occupied_cells(&self) -> HashSet<Coord> {
        self.snakes
            .iter()
            .filter(|s| s.alive)
            .flat_map(|s| s.body.iter().copied())
            .collect()
    }

    /// Checks whether `coord` is covered by a body segment once `player`'s
    /// tail has been released for this move
    fn collides(&self, player: usize, coord: &Coord) -> bool {
        self.snakes.iter().enumerate().any(|(i, snake)| {
            if !snake.alive {
                return false;
            }
            let vacating_tail = i == player && snake.pending_growth == 0;
            let len = if vacating_tail {
                snake.body.len().saturating_sub(1)
            } else {
                snake.body.len()
            };
            snake.body[..len].contains(coord)
        })
    }

    fn kill(&mut self, player: usize) {
        let snake = &mut self.snakes[player];
        snake.alive = false;
        snake.body.clear();
        snake.pending_growth = 0;
    }

    pub(crate) fn step(&mut self, player: usize) {
        let Some(snake) = self.snakes.get(player) else {
            return;
        };
        if !snake.alive {
            return;
        }
        let Some(head) = snake.head() else {
            return;
        };
        let next = snake.orientation.apply(&head);
        let reversed = snake.body.get(1) == Some(&next);

        if reversed || !self.in_bounds(&next) || self.collides(player, &next) {
            self.kill(player);
            return;
        }

        let ate = self.target == Some(next);
        let growth = self.growth_per_target;
        let snake = &mut self.snakes[player];
        snake.body.insert(0, next);
        if snake.pending_growth > 0 {
            snake.pending_growth -= 1;
        } else {
            snake.body.pop();
        }
        if ate {
            snake.pending_growth += growth;
            self.target = None;
        }
    }

    pub(crate) fn respawn_target<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let occupied = self.occupied_cells();
        let free: Vec<Coord> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Coord::new(x, y)))
            .filter(|c| !occupied.contains(c))
            .collect();

        self.target = match free.choose(rng) {
            Some(cell) => Some(*cell),
            None if self.width > 0 && self.height > 0 => Some(Coord::new(
                rng.random_range(0..self.width),
                rng.random_range(0..self.height),
            )),
            None => None,
        };
    }

    pub(crate) fn legal(&self, player: usize, direction: Direction) -> bool {
        let Some(snake) = self.snakes.get(player) else {
            return false;
        };
        let Some(head) = snake.head().filter(|_| snake.alive) else {
            return false;
        };
        let next = direction.apply(&head);
        if !self.in_bounds(&next) {
            return false;
        }
        if snake.body.get(1) == Some(&next) {
            return false;
        }
        !self.collides(player, &next)
    }

    /// Renders the board as text, one character per cell
    pub fn render(&self) -> String {
        let mut rows = vec![vec!['.'; self.width.max(0) as usize]; self.height.max(0) as usize];
        if let Some(t) = self.target.filter(|t| self.in_bounds(t)) {
            rows[t.y as usize][t.x as usize] = '*';
        }
        for (i, snake) in self.snakes.iter().enumerate() {
            for (j, seg) in snake.body.iter().enumerate() {
                if !self.in_bounds(seg) {
                    continue;
                }
                let glyph = std::char::from_digit(i as u32 % 10, 10).unwrap_or('#');
                rows[seg.y as usize][seg.x as usize] = if j == 0 { 'H' } else { glyph };
            }
        }
        rows.into_iter()
            .map(|r| r.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
