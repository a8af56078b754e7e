// Iterative deepening move selection
//
// Both search strategies share the same driver: expand the root once, then
// re-search every candidate move at depth 1, 2, 3, ... until the time budget
// runs out. The clock is only checked between candidates, so one slow
// evaluation can overrun the budget.

use log::{debug, info, warn};
use std::time::{Duration, Instant};

use crate::evaluation::DEAD_SCORE;
use crate::game::Simulation;
use crate::node::GameTreeNode;
use crate::profile;
use crate::types::Direction;

/// A search strategy that can value one root candidate at a given depth
pub trait CandidateSearch<S: Simulation> {
    /// Short label for logs and profiling
    fn name(&self) -> &'static str;

    /// Player the search decides for
    fn player(&self) -> usize;

    fn candidate_value(&self, candidate: &GameTreeNode<S>, depth: u32) -> f64;
}

/// Result of one move selection
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub direction: Direction,
    /// Deepest pass that was started
    pub depth_reached: u32,
    /// Last recorded value of every candidate, in generation order
    pub values: Vec<(Direction, f64)>,
    /// Every candidate led to death at the last depth searched
    pub forced_loss: bool,
}

/// Anytime iterative deepening driver
#[derive(Debug, Clone, Copy)]
pub struct MoveSelector {
    budget: Duration,
    max_depth: Option<u32>,
}

impl MoveSelector {
    pub fn new(budget: Duration) -> Self {
        MoveSelector {
            budget,
            max_depth: None,
        }
    }

    /// Stops deepening after `max_depth` passes even if time remains
    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn has_time(&self, start: &Instant) -> bool {
        start.elapsed() < self.budget
    }

    /// Picks a move for the search's player in `state`
    pub fn select<S, T>(&self, state: &S, search: &T) -> SearchOutcome
    where
        S: Simulation,
        T: CandidateSearch<S>,
    {
        let start = Instant::now();
        let player = search.player();
        let candidates = GameTreeNode::new(state.clone(), player).children();
        let mut values = vec![0.0; candidates.len()];
        let mut depth = 1;
        let mut depth_reached = 0;

        let snapshot = |values: &[f64]| -> Vec<(Direction, f64)> {
            candidates
                .iter()
                .zip(values)
                .map(|(c, v)| (c.orientation_of(player), *v))
                .collect()
        };

        while self.has_time(&start) && self.max_depth.map_or(true, |max| depth <= max) {
            depth_reached = depth;
            let mut fallback: Option<usize> = None;
            let mut fallback_value = DEAD_SCORE;
            let mut living_move_found = false;

            for (i, candidate) in candidates.iter().enumerate() {
                // Known losses stay losses at greater depth
                if values[i] == DEAD_SCORE {
                    continue;
                }

                let value = profile!(search.name(), {
                    search.candidate_value(candidate, depth)
                });

                if value == DEAD_SCORE {
                    // Best pre-death position from the previous pass
                    if values[i] > fallback_value {
                        fallback = Some(i);
                        fallback_value = values[i];
                    }
                } else {
                    living_move_found = true;
                }
                values[i] = value;

                if !self.has_time(&start) {
                    break;
                }
            }

            debug!(
                "{} player {} depth {}: {:?}",
                search.name(),
                player,
                depth,
                snapshot(&values)
            );

            if !living_move_found {
                let direction = fallback
                    .map(|i| candidates[i].orientation_of(player))
                    .unwrap_or(Direction::North);
                warn!(
                    "{} player {}: every move dies at depth {}, falling back to {}",
                    search.name(),
                    player,
                    depth,
                    direction.as_str()
                );
                return SearchOutcome {
                    direction,
                    depth_reached,
                    values: snapshot(&values),
                    forced_loss: true,
                };
            }

            depth += 1;
        }

        // First candidate wins ties
        let mut best: Option<(usize, f64)> = None;
        for (i, &value) in values.iter().enumerate() {
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((i, value));
            }
        }
        let direction = best
            .map(|(i, _)| candidates[i].orientation_of(player))
            .unwrap_or(Direction::North);

        info!(
            "{} player {}: chose {} at depth {} in {}ms",
            search.name(),
            player,
            direction.as_str(),
            depth_reached,
            start.elapsed().as_millis()
        );

        SearchOutcome {
            direction,
            depth_reached,
            values: snapshot(&values),
            forced_loss: false,
        }
    }
}
