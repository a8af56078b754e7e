// Non-paranoid (max^n) search
//
// Every player, opponents included, is assumed to pick the move that is best for
// itself. Values are vectors indexed by player, but they are only computed on
// demand: a decision node needs just its acting player's entry to choose a child,
// and the root only ever reads the searcher's entry.

use std::cell::OnceCell;

use crate::evaluation::evaluate;
use crate::game::Simulation;
use crate::iterative_deepening::CandidateSearch;
use crate::node::{GameTreeNode, NodeKind};

/// Lazily evaluated per-player values of a searched subtree
#[derive(Debug)]
pub enum EvaluatedState<S> {
    /// A single leaf snapshot
    Direct { state: S, values: Vec<OnceCell<f64>> },
    /// Equally likely outcomes below a chance node
    Aggregate {
        outcomes: Vec<EvaluatedState<S>>,
        values: Vec<OnceCell<f64>>,
    },
}

impl<S: Simulation> EvaluatedState<S> {
    pub fn direct(state: S) -> Self {
        let values = (0..state.player_count()).map(|_| OnceCell::new()).collect();
        EvaluatedState::Direct { state, values }
    }

    pub fn aggregate(outcomes: Vec<EvaluatedState<S>>, player_count: usize) -> Self {
        let values = (0..player_count).map(|_| OnceCell::new()).collect();
        EvaluatedState::Aggregate { outcomes, values }
    }

    /// Value of this subtree for `player`, computed on first read and cached
    pub fn value(&self, player: usize) -> f64 {
        match self {
            EvaluatedState::Direct { state, values } => match values.get(player) {
                Some(cell) => *cell.get_or_init(|| evaluate(state, player)),
                None => evaluate(state, player),
            },
            EvaluatedState::Aggregate { outcomes, values } => {
                let average = || {
                    let total: f64 = outcomes.iter().map(|o| o.value(player)).sum();
                    total / outcomes.len() as f64
                };
                match values.get(player) {
                    Some(cell) => *cell.get_or_init(average),
                    None => average(),
                }
            }
        }
    }

    /// Whether `player`'s value has already been computed
    #[cfg(test)]
    pub(crate) fn is_cached(&self, player: usize) -> bool {
        let values = match self {
            EvaluatedState::Direct { values, .. } => values,
            EvaluatedState::Aggregate { values, .. } => values,
        };
        values.get(player).is_some_and(|cell| cell.get().is_some())
    }
}

/// Max^n search from the point of view of `player`
#[derive(Debug, Clone, Copy)]
pub struct NonParanoidSearch {
    player: usize,
}

impl NonParanoidSearch {
    pub fn new(player: usize) -> Self {
        NonParanoidSearch { player }
    }

    /// Searches `node` until `target_depth` decisions have been made.
    ///
    /// Chance nodes do not consume depth. A decision node passes up its best
    /// child's result for the acting player as-is, so nothing computed below is
    /// recomputed above.
    pub fn search<S: Simulation>(
        &self,
        node: &GameTreeNode<S>,
        target_depth: u32,
    ) -> EvaluatedState<S> {
        if node.kind() == NodeKind::Decision && target_depth <= 1 {
            return EvaluatedState::direct(node.state().clone());
        }

        let children = node.children();
        if children.is_empty() {
            return EvaluatedState::direct(node.state().clone());
        }

        if node.is_chance() {
            let outcomes = children
                .iter()
                .map(|child| self.search(child, target_depth))
                .collect();
            return EvaluatedState::aggregate(outcomes, node.state().player_count());
        }

        let mover = node.current_player();
        let mut best: Option<EvaluatedState<S>> = None;
        for child in &children {
            let evaluated = self.search(child, target_depth - 1);
            let better = match &best {
                None => true,
                Some(current) => evaluated.value(mover) > current.value(mover),
            };
            if better {
                best = Some(evaluated);
            }
        }

        match best {
            Some(evaluated) => evaluated,
            None => EvaluatedState::direct(node.state().clone()),
        }
    }
}

impl<S: Simulation> CandidateSearch<S> for NonParanoidSearch {
    fn name(&self) -> &'static str {
        "non_paranoid"
    }

    fn player(&self) -> usize {
        self.player
    }

    fn candidate_value(&self, candidate: &GameTreeNode<S>, depth: u32) -> f64 {
        self.search(candidate, depth).value(self.player)
    }
}
