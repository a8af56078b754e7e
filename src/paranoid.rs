// Paranoid alpha-beta search
//
// Every player other than the searcher is treated as an adversary minimizing the
// searcher's score, which reduces the multiplayer tree to a two-sided one with a
// single scalar value per node.

use crate::evaluation::{evaluate, DEAD_SCORE};
use crate::game::Simulation;
use crate::iterative_deepening::CandidateSearch;
use crate::node::GameTreeNode;
use crate::simple_profiler::record_alpha_beta_cutoff;

#[derive(Debug, Clone, Copy)]
pub struct ParanoidSearch {
    searcher: usize,
}

impl ParanoidSearch {
    pub fn new(searcher: usize) -> Self {
        ParanoidSearch { searcher }
    }

    pub fn searcher(&self) -> usize {
        self.searcher
    }

    fn is_leaf<S: Simulation>(&self, node: &GameTreeNode<S>, target_depth: u32) -> bool {
        node.state().is_dead(self.searcher) || (target_depth <= 1 && !node.is_chance())
    }

    /// Alpha-beta value of `node` for the searcher.
    ///
    /// Chance nodes average their outcomes at the same depth and never prune,
    /// since an average is not bounded by the window of any single outcome.
    pub fn search<S: Simulation>(
        &self,
        node: &GameTreeNode<S>,
        mut alpha: f64,
        mut beta: f64,
        target_depth: u32,
    ) -> f64 {
        if self.is_leaf(node, target_depth) {
            return evaluate(node.state(), self.searcher);
        }

        let children = node.children();
        if children.is_empty() {
            return evaluate(node.state(), self.searcher);
        }

        if node.is_chance() {
            let total: f64 = children
                .iter()
                .map(|child| self.search(child, alpha, beta, target_depth))
                .sum();
            return total / children.len() as f64;
        }

        if node.current_player() == self.searcher {
            let mut value = f64::NEG_INFINITY;
            for child in &children {
                value = value.max(self.search(child, alpha, beta, target_depth - 1));
                alpha = alpha.max(value);
                if beta <= alpha {
                    record_alpha_beta_cutoff();
                    break;
                }
            }
            return value;
        }

        let mut value = f64::INFINITY;
        for child in &children {
            value = value.min(self.search(child, alpha, beta, target_depth - 1));
            beta = beta.min(value);
            // A move that kills the searcher cannot be beaten
            if beta <= alpha || value == DEAD_SCORE {
                record_alpha_beta_cutoff();
                break;
            }
        }
        value
    }

    /// Full-width paranoid minimax without any cutoffs.
    ///
    /// Reference for checking that pruning never changes a decision.
    pub fn search_unpruned<S: Simulation>(&self, node: &GameTreeNode<S>, target_depth: u32) -> f64 {
        if self.is_leaf(node, target_depth) {
            return evaluate(node.state(), self.searcher);
        }

        let children = node.children();
        if children.is_empty() {
            return evaluate(node.state(), self.searcher);
        }

        if node.is_chance() {
            let total: f64 = children
                .iter()
                .map(|child| self.search_unpruned(child, target_depth))
                .sum();
            return total / children.len() as f64;
        }

        let values = children
            .iter()
            .map(|child| self.search_unpruned(child, target_depth - 1));
        if node.current_player() == self.searcher {
            values.fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.fold(f64::INFINITY, f64::min)
        }
    }
}

impl<S: Simulation> CandidateSearch<S> for ParanoidSearch {
    fn name(&self) -> &'static str {
        "paranoid"
    }

    fn player(&self) -> usize {
        self.searcher
    }

    fn candidate_value(&self, candidate: &GameTreeNode<S>, depth: u32) -> f64 {
        self.search(candidate, f64::NEG_INFINITY, f64::INFINITY, depth)
    }
}
