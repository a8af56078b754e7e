// Agent integration tests: single orientation update per turn, decision log and replay

mod common;

use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

use common::{board, open_duel, snake};
use snake_search::bot::{AgentKind, Bot};
use snake_search::config::Config;
use snake_search::debug_logger::DebugLogger;
use snake_search::game::Simulation;
use snake_search::replay::ReplayEngine;
use snake_search::types::{Coord, Direction, GameState};

/// Game state that counts orientation updates made on this instance only.
/// Clones start from zero, so updates on search snapshots are not counted.
#[derive(Serialize)]
struct CountingState {
    inner: GameState,
    #[serde(skip)]
    orientation_updates: Rc<Cell<usize>>,
}

impl CountingState {
    fn new(inner: GameState) -> Self {
        CountingState {
            inner,
            orientation_updates: Rc::new(Cell::new(0)),
        }
    }

    fn updates(&self) -> usize {
        self.orientation_updates.get()
    }
}

impl Clone for CountingState {
    fn clone(&self) -> Self {
        CountingState::new(self.inner.clone())
    }
}

impl Simulation for CountingState {
    fn is_dead(&self, player: usize) -> bool {
        self.inner.is_dead(player)
    }

    fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    fn size(&self, player: usize) -> usize {
        self.inner.size(player)
    }

    fn player_count(&self) -> usize {
        self.inner.player_count()
    }

    fn target(&self) -> Option<Coord> {
        self.inner.target()
    }

    fn body(&self, player: usize) -> &[Coord] {
        self.inner.body(player)
    }

    fn last_orientation(&self, player: usize) -> Direction {
        self.inner.last_orientation(player)
    }

    fn is_legal_move(&self, player: usize, direction: Direction) -> bool {
        self.inner.is_legal_move(player, direction)
    }

    fn in_bounds(&self, coord: &Coord) -> bool {
        Simulation::in_bounds(&self.inner, coord)
    }

    fn set_orientation(&mut self, player: usize, direction: Direction) {
        self.orientation_updates.set(self.orientation_updates.get() + 1);
        self.inner.set_orientation(player, direction);
    }

    fn update_player_position(&mut self, player: usize) {
        self.inner.update_player_position(player);
    }

    fn choose_next_target(&mut self) {
        self.inner.choose_next_target();
    }
}

fn shallow_config(max_depth: u32) -> Config {
    let mut config = Config::default_hardcoded();
    config.timing.move_budget_ms = 30_000;
    config.timing.max_search_depth = Some(max_depth);
    config
}

fn temp_log(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("snake_search_{}_{}.jsonl", name, std::process::id()))
        .to_string_lossy()
        .to_string()
}

#[test]
fn test_each_agent_sets_orientation_once_per_turn() {
    let config = shallow_config(2);
    for kind in [AgentKind::Paranoid, AgentKind::NonParanoid, AgentKind::Random] {
        let bot = Bot::new(&config, kind, 0);
        let mut state = CountingState::new(open_duel());
        bot.do_move(&mut state);
        assert_eq!(state.updates(), 1, "{} agent", kind);
    }
}

#[test]
fn test_search_agent_sets_orientation_even_when_every_move_dies() {
    let config = shallow_config(3);
    let trapped = board(
        3,
        1,
        vec![snake(&[(0, 0), (1, 0), (2, 0)], Direction::West)],
        Some((2, 0)),
    );
    for kind in [AgentKind::Paranoid, AgentKind::NonParanoid] {
        let bot = Bot::new(&config, kind, 0);
        let mut state = CountingState::new(trapped.clone());
        bot.do_move(&mut state);
        assert_eq!(state.updates(), 1);
        assert_eq!(state.inner.last_orientation(0), Direction::North);
    }
}

#[test]
fn test_do_move_does_not_advance_the_snake() {
    let config = shallow_config(2);
    let bot = Bot::new(&config, AgentKind::Paranoid, 1);
    let mut state = open_duel();
    let before = state.clone();
    bot.do_move(&mut state);
    assert_eq!(state.snakes[1].body, before.snakes[1].body);
    assert_eq!(state.snakes[0], before.snakes[0]);
    assert_eq!(state.target, before.target);
}

#[test]
fn test_decision_log_replays_to_the_same_moves() {
    let path = temp_log("bot_replay");
    let config = shallow_config(2);
    let logger = DebugLogger::new(true, &path);
    let bots: Vec<Bot> = [AgentKind::Paranoid, AgentKind::NonParanoid]
        .into_iter()
        .enumerate()
        .map(|(i, kind)| Bot::new(&config, kind, i).with_logger(logger.clone()))
        .collect();

    // Three rounds on an open board, far from the target
    let mut state = board(
        12,
        12,
        vec![
            snake(&[(2, 5), (1, 5), (0, 5)], Direction::East),
            snake(&[(9, 6), (10, 6), (11, 6)], Direction::West),
        ],
        Some((6, 0)),
    );
    let mut played = Vec::new();
    for _ in 0..3 {
        for bot in &bots {
            played.push((bot.index(), state.clone()));
            bot.do_move(&mut state);
            state.update_player_position(bot.index());
        }
    }

    let engine = ReplayEngine::new(config, false);
    let entries = engine.load_log_file(&path).expect("log should parse");
    assert_eq!(entries.len(), played.len());
    for (entry, (player, logged_state)) in entries.iter().zip(&played) {
        assert_eq!(entry.player, *player);
        assert_eq!(&entry.state, logged_state);
        assert_eq!(entry.depth_reached, 2);
    }
    assert_eq!(entries[0].agent, AgentKind::Paranoid);
    assert_eq!(entries[1].agent, AgentKind::NonParanoid);

    let results = engine.replay_all(&entries);
    let stats = engine.generate_stats(&results);
    assert_eq!(stats.total, entries.len());
    assert_eq!(stats.mismatches(), 0);
    assert_eq!(stats.forced_losses, 0);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_validate_expected_moves_against_logged_turns() {
    let path = temp_log("bot_validate");
    let config = shallow_config(1);
    let logger = DebugLogger::new(true, &path);
    let bot = Bot::new(&config, AgentKind::Paranoid, 0).with_logger(logger);

    // North and south leave the board; east is closest to the target
    let mut state = board(
        6,
        1,
        vec![snake(&[(1, 0), (0, 0)], Direction::East)],
        Some((5, 0)),
    );
    bot.do_move(&mut state);

    let engine = ReplayEngine::new(config, false);
    let entries = engine.load_log_file(&path).expect("log should parse");
    assert_eq!(entries.len(), 1);
    assert!(engine
        .validate_expected_moves(&entries, &[(0, vec![Direction::East])])
        .is_ok());
    assert!(engine
        .validate_expected_moves(&entries, &[(0, vec![Direction::West])])
        .is_err());

    let _ = std::fs::remove_file(&path);
}
