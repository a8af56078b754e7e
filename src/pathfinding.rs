// Grid distance estimation
//
// Best-first search from a player's head to the target over the 4-neighbourhood.
// Body segments are treated as obstacles only for as long as they would still be
// on the board after the number of moves the search has looked ahead.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::game::Simulation;
use crate::profile;
use crate::types::Coord;

/// Distance reported when the target cannot be reached.
/// Longer than any real path, so it loses every comparison.
pub const UNREACHABLE: u32 = u32::MAX;

/// Frontier entry of the path search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathNode {
    position: Coord,
    distance: u32,
    /// Lookahead ply used for occupancy checks of this node's neighbours
    depth: u32,
}

impl PathNode {
    fn priority(&self) -> u32 {
        self.distance
    }
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cells covered by snake bodies, mapped to the number of moves they stay covered
#[derive(Debug, Default)]
pub struct OccupancyMap {
    remaining: HashMap<Coord, u32>,
}

impl OccupancyMap {
    /// Segment `i` (head = 0) of a body of length `L` vacates after `L - i` moves
    pub fn from_state<S: Simulation>(state: &S) -> Self {
        let mut remaining = HashMap::new();
        for player in 0..state.player_count() {
            if state.is_dead(player) {
                continue;
            }
            let body = state.body(player);
            let len = body.len() as u32;
            for (i, segment) in body.iter().enumerate() {
                let plies = len - i as u32;
                remaining
                    .entry(*segment)
                    .and_modify(|p: &mut u32| *p = (*p).max(plies))
                    .or_insert(plies);
            }
        }
        OccupancyMap { remaining }
    }

    /// Whether `coord` is still covered by a body after `depth` moves
    pub fn is_occupied(&self, coord: &Coord, depth: u32) -> bool {
        self.remaining.get(coord).is_some_and(|&plies| depth < plies)
    }
}

/// Whether `coord` is blocked at lookahead ply `depth`, walls included
pub fn is_blocked<S: Simulation>(state: &S, occupancy: &OccupancyMap, coord: &Coord, depth: u32) -> bool {
    !state.in_bounds(coord) || occupancy.is_occupied(coord, depth)
}

/// Minimum number of orthogonal steps from `player`'s head to the target.
///
/// Returns [`UNREACHABLE`] when the player has no head, there is no target, or
/// every route is blocked.
pub fn target_distance<S: Simulation>(state: &S, player: usize) -> u32 {
    profile!("path_search", {
        let (Some(start), Some(target)) = (state.head(player), state.target()) else {
            return UNREACHABLE;
        };

        let occupancy = OccupancyMap::from_state(state);
        let mut frontier = BinaryHeap::new();
        // Best distance found per position
        let mut closed: HashMap<Coord, u32> = HashMap::new();

        frontier.push(Reverse(PathNode {
            position: start,
            distance: 0,
            depth: 0,
        }));
        closed.insert(start, 0);

        while let Some(Reverse(node)) = frontier.pop() {
            let next_distance = node.distance + 1;

            for position in node.position.neighbors() {
                // Found before insertion, saves one expansion
                if position == target {
                    return next_distance;
                }

                if is_blocked(state, &occupancy, &position, node.depth) {
                    continue;
                }

                let improves = closed
                    .get(&position)
                    .map_or(true, |&best| next_distance < best);
                if improves {
                    closed.insert(position, next_distance);
                    frontier.push(Reverse(PathNode {
                        position,
                        distance: next_distance,
                        depth: node.depth + 1,
                    }));
                }
            }
        }

        UNREACHABLE
    })
}
