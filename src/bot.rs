// Snake agents
//
// A Bot owns a player slot and a decision strategy. Each call to do_move looks at
// the shared game state, decides on an orientation and applies it with a single
// set_orientation call. Nothing is carried over between turns apart from the
// decision counter used for the debug log.

use log::{debug, info};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::game::Simulation;
use crate::iterative_deepening::{MoveSelector, SearchOutcome};
use crate::non_paranoid::NonParanoidSearch;
use crate::paranoid::ParanoidSearch;
use crate::types::Direction;

/// Decision strategy of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    /// Alpha-beta, all opponents minimize our score
    Paranoid,
    /// Max^n, every player maximizes its own score
    NonParanoid,
    /// Uniformly random legal move
    Random,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Paranoid => "paranoid",
            AgentKind::NonParanoid => "non-paranoid",
            AgentKind::Random => "random",
        }
    }

    pub fn parse(s: &str) -> Result<AgentKind, String> {
        match s.trim().to_lowercase().as_str() {
            "paranoid" => Ok(AgentKind::Paranoid),
            "non-paranoid" | "nonparanoid" | "non_paranoid" => Ok(AgentKind::NonParanoid),
            "random" => Ok(AgentKind::Random),
            _ => Err(format!("Unknown agent kind: {}", s)),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single decision and how far the search got
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub direction: Direction,
    pub depth_reached: u32,
    pub forced_loss: bool,
}

impl From<SearchOutcome> for Decision {
    fn from(outcome: SearchOutcome) -> Self {
        Decision {
            direction: outcome.direction,
            depth_reached: outcome.depth_reached,
            forced_loss: outcome.forced_loss,
        }
    }
}

pub struct Bot {
    kind: AgentKind,
    index: usize,
    selector: MoveSelector,
    logger: DebugLogger,
    turn: Cell<u32>,
}

impl Bot {
    /// Creates a new agent for player `index`
    ///
    /// # Arguments
    /// * `config` - Static configuration; only the timing section is used here
    /// * `kind` - Decision strategy
    /// * `index` - Player slot this agent moves
    pub fn new(config: &Config, kind: AgentKind, index: usize) -> Self {
        let selector = MoveSelector::new(config.timing.move_budget())
            .with_max_depth(config.timing.max_search_depth);
        Bot {
            kind,
            index,
            selector,
            logger: DebugLogger::disabled(),
            turn: Cell::new(0),
        }
    }

    pub fn with_logger(mut self, logger: DebugLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Decides on a move without touching `state`.
    ///
    /// Returns `None` only for the random agent when no legal move exists.
    pub fn decide<S: Simulation>(&self, state: &S) -> Option<Decision> {
        match self.kind {
            AgentKind::Paranoid => Some(
                self.selector
                    .select(state, &ParanoidSearch::new(self.index))
                    .into(),
            ),
            AgentKind::NonParanoid => Some(
                self.selector
                    .select(state, &NonParanoidSearch::new(self.index))
                    .into(),
            ),
            AgentKind::Random => {
                let options: Vec<Direction> = Direction::all()
                    .into_iter()
                    .filter(|&d| state.is_legal_move(self.index, d))
                    .collect();
                options.choose(&mut rand::rng()).map(|&direction| Decision {
                    direction,
                    depth_reached: 0,
                    forced_loss: false,
                })
            }
        }
    }

    /// Chooses and applies this agent's next orientation
    pub fn do_move<S: Simulation + Serialize>(&self, state: &mut S) {
        let turn = self.turn.get();
        self.turn.set(turn + 1);

        let Some(decision) = self.decide(state) else {
            debug!("Player {} ({}): no legal move", self.index, self.kind);
            return;
        };

        info!(
            "Turn {} player {} ({}): {} (depth {})",
            turn,
            self.index,
            self.kind,
            decision.direction.as_str(),
            decision.depth_reached
        );
        self.logger.log_decision(
            turn,
            self.index,
            self.kind,
            decision.direction,
            decision.depth_reached,
            &*state,
        );

        state.set_orientation(self.index, decision.direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, GameState, Snake};

    #[test]
    fn test_agent_kind_parse() {
        assert_eq!(AgentKind::parse("paranoid").unwrap(), AgentKind::Paranoid);
        assert_eq!(AgentKind::parse("Non-Paranoid").unwrap(), AgentKind::NonParanoid);
        assert_eq!(AgentKind::parse("non_paranoid").unwrap(), AgentKind::NonParanoid);
        assert_eq!(AgentKind::parse("random").unwrap(), AgentKind::Random);
        assert!(AgentKind::parse("greedy").is_err());
    }

    #[test]
    fn test_random_agent_only_picks_legal_moves() {
        let config = Config::default_hardcoded();
        let bot = Bot::new(&config, AgentKind::Random, 0);
        // Corner with the neck to the east: only south is legal
        let state = GameState::new(
            4,
            4,
            vec![Snake::new(vec![Coord::new(0, 0), Coord::new(1, 0)], Direction::West)],
            Some(Coord::new(3, 3)),
        );
        for _ in 0..20 {
            let decision = bot.decide(&state).expect("south is legal");
            assert_eq!(decision.direction, Direction::South);
        }
    }

    #[test]
    fn test_random_agent_without_options_leaves_orientation() {
        let config = Config::default_hardcoded();
        let bot = Bot::new(&config, AgentKind::Random, 0);
        let mut state = GameState::new(
            3,
            1,
            vec![Snake::new(
                vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)],
                Direction::East,
            )],
            Some(Coord::new(2, 0)),
        );
        bot.do_move(&mut state);
        assert_eq!(state.snakes[0].orientation, Direction::East);
    }
}
