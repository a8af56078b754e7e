// Game tree nodes
//
// A node owns a private snapshot of the game. Nodes without a target are chance
// nodes (the target has to respawn); all others are decision nodes where the
// acting player picks one of the four orientations.

use crate::game::Simulation;
use crate::profile;
use crate::types::Direction;

/// Number of sampled respawns below a chance node
pub const CHANCE_SAMPLE_COUNT: usize = 5;

/// Whether the node waits on a player's choice or on a target respawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Decision,
    Chance,
}

#[derive(Debug, Clone)]
pub struct GameTreeNode<S> {
    state: S,
    current_player: usize,
}

impl<S: Simulation> GameTreeNode<S> {
    pub fn new(state: S, current_player: usize) -> Self {
        GameTreeNode {
            state,
            current_player,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn kind(&self) -> NodeKind {
        if self.state.has_target() {
            NodeKind::Decision
        } else {
            NodeKind::Chance
        }
    }

    pub fn is_chance(&self) -> bool {
        self.kind() == NodeKind::Chance
    }

    /// The orientation `player` ended up with in this node's snapshot
    pub fn orientation_of(&self, player: usize) -> Direction {
        self.state.last_orientation(player)
    }

    /// Generates the successors of this node.
    ///
    /// Chance nodes yield [`CHANCE_SAMPLE_COUNT`] independently respawned
    /// targets with the acting player unchanged. Decision nodes yield one child
    /// per orientation in North, East, South, West order.
    pub fn children(&self) -> Vec<GameTreeNode<S>> {
        profile!("expand", {
            match self.kind() {
                NodeKind::Chance => (0..CHANCE_SAMPLE_COUNT)
                    .map(|_| {
                        let mut state = self.state.clone();
                        state.choose_next_target();
                        GameTreeNode::new(state, self.current_player)
                    })
                    .collect(),
                NodeKind::Decision => Direction::all()
                    .into_iter()
                    .map(|direction| {
                        let mut state = self.state.clone();
                        state.set_orientation(self.current_player, direction);
                        state.update_player_position(self.current_player);
                        let next = next_player(&state, self.current_player);
                        GameTreeNode::new(state, next)
                    })
                    .collect(),
            }
        })
    }
}

/// Next living player after `mover`, or `mover` itself once the game is over
pub fn next_player<S: Simulation>(state: &S, mover: usize) -> usize {
    if state.is_game_over() {
        return mover;
    }

    let count = state.player_count();
    let mut next = mover;
    // Bounded by the player count; a living player exists while the game runs
    for _ in 0..count {
        next = (next + 1) % count;
        if !state.is_dead(next) {
            break;
        }
    }
    next
}
