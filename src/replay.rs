// Decision log replay
//
// Reads the JSONL file written by the debug logger, runs the logged agent again
// on every recorded state and compares the two moves. Chance sampling and the
// wall-clock budget make searches non-deterministic, so a mismatch is a hint to
// look closer rather than a failure. A depth cap in [timing] makes replays of
// shallow searches exact.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::{AgentKind, Bot, Decision};
use crate::config::Config;
use crate::types::{Direction, GameState};

/// One line of the decision log
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub turn: u32,
    pub player: usize,
    pub agent: AgentKind,
    pub chosen_move: Direction,
    pub depth_reached: u32,
    pub state: GameState,
    pub timestamp: String,
}

/// Logged decision next to its re-run
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u32,
    pub player: usize,
    pub agent: AgentKind,
    pub logged_move: Direction,
    pub replayed_move: Direction,
    pub logged_depth: u32,
    pub replayed_depth: u32,
    /// The re-run found every move fatal
    pub forced_loss: bool,
    pub elapsed_ms: u128,
}

impl ReplayResult {
    pub fn matches(&self) -> bool {
        self.logged_move == self.replayed_move
    }
}

/// Match counts for one agent kind
#[derive(Debug, Clone, PartialEq)]
pub struct AgentStats {
    pub agent: AgentKind,
    pub decisions: usize,
    pub matches: usize,
}

#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total: usize,
    pub matches: usize,
    pub forced_losses: usize,
    pub per_agent: Vec<AgentStats>,
    pub avg_depth: f64,
    pub avg_elapsed_ms: f64,
}

impl ReplayStats {
    pub fn mismatches(&self) -> usize {
        self.total - self.matches
    }

    /// Percentage of re-runs that agreed with the log
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.matches as f64 / self.total as f64
    }
}

pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// `config` supplies the move budget and depth cap used for the re-runs
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Parses a decision log, skipping blank lines
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let path = log_path.as_ref();
        let file = File::open(path)
            .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", index + 1, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str::<LogEntry>(&line)
                .map_err(|e| format!("Invalid log entry on line {}: {}", index + 1, e))?;
            entries.push(entry);
        }

        info!("Loaded {} decisions from {}", entries.len(), path.display());
        Ok(entries)
    }

    /// Runs `agent` for `player` on `state` and times it
    pub fn replay_turn(
        &self,
        state: &GameState,
        player: usize,
        agent: AgentKind,
    ) -> Result<(Decision, u128), String> {
        if player >= state.snakes.len() {
            return Err(format!(
                "Player {} does not exist, the state has {} snakes",
                player,
                state.snakes.len()
            ));
        }

        let start = Instant::now();
        let decision = Bot::new(&self.config, agent, player)
            .decide(state)
            .ok_or_else(|| format!("Player {} ({}) has no legal move", player, agent))?;
        Ok((decision, start.elapsed().as_millis()))
    }

    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        let (decision, elapsed_ms) = self.replay_turn(&entry.state, entry.player, entry.agent)?;
        let result = ReplayResult {
            turn: entry.turn,
            player: entry.player,
            agent: entry.agent,
            logged_move: entry.chosen_move,
            replayed_move: decision.direction,
            logged_depth: entry.depth_reached,
            replayed_depth: decision.depth_reached,
            forced_loss: decision.forced_loss,
            elapsed_ms,
        };

        if self.verbose {
            if result.matches() {
                info!(
                    "Turn {} player {} ({}): {} at depth {} [{}ms]",
                    result.turn,
                    result.player,
                    result.agent,
                    result.replayed_move.as_str(),
                    result.replayed_depth,
                    result.elapsed_ms
                );
            } else {
                warn!(
                    "Turn {} player {} ({}): logged {} at depth {}, replayed {} at depth {} [{}ms]",
                    result.turn,
                    result.player,
                    result.agent,
                    result.logged_move.as_str(),
                    result.logged_depth,
                    result.replayed_move.as_str(),
                    result.replayed_depth,
                    result.elapsed_ms
                );
            }
        }

        Ok(result)
    }

    /// Replays every entry; entries that cannot be replayed are logged and left out
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Skipping turn {} player {}: {}", entry.turn, entry.player, e);
                    None
                }
            })
            .collect()
    }

    /// Replays all entries of the given turns, for every player that moved in them
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turns: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut selected = Vec::new();
        for &turn in turns {
            let before = selected.len();
            selected.extend(entries.iter().filter(|e| e.turn == turn).cloned());
            if selected.len() == before {
                return Err(format!("Turn {} is not in the log", turn));
            }
        }
        Ok(self.replay_all(&selected))
    }

    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let mut per_agent: Vec<AgentStats> = Vec::new();
        for result in results {
            let index = match per_agent.iter().position(|s| s.agent == result.agent) {
                Some(index) => index,
                None => {
                    per_agent.push(AgentStats {
                        agent: result.agent,
                        decisions: 0,
                        matches: 0,
                    });
                    per_agent.len() - 1
                }
            };
            per_agent[index].decisions += 1;
            if result.matches() {
                per_agent[index].matches += 1;
            }
        }

        let total = results.len();
        let mean = |sum: f64| if total > 0 { sum / total as f64 } else { 0.0 };
        ReplayStats {
            total,
            matches: results.iter().filter(|r| r.matches()).count(),
            forced_losses: results.iter().filter(|r| r.forced_loss).count(),
            per_agent,
            avg_depth: mean(results.iter().map(|r| r.replayed_depth as f64).sum()),
            avg_elapsed_ms: mean(results.iter().map(|r| r.elapsed_ms as f64).sum()),
        }
    }

    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Decisions:      {}", stats.total);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate());
        println!("Mismatches:     {}", stats.mismatches());
        println!("Forced losses:  {}", stats.forced_losses);
        println!("Average depth:  {:.1}", stats.avg_depth);
        println!("Average time:   {:.1}ms", stats.avg_elapsed_ms);
        for agent in &stats.per_agent {
            println!(
                "  {:<13} {}/{} matched",
                agent.agent.as_str(),
                agent.matches,
                agent.decisions
            );
        }
        println!("═══════════════════════════════════════════════════════════\n");

        for result in results.iter().filter(|r| !r.matches()) {
            println!(
                "Turn {} player {} ({}): {} → {} (depth {} → {})",
                result.turn,
                result.player,
                result.agent,
                result.logged_move.as_str(),
                result.replayed_move.as_str(),
                result.logged_depth,
                result.replayed_depth
            );
        }
    }

    /// Checks that the first logged decision of each turn is one of the accepted moves
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected: &[(u32, Vec<Direction>)],
    ) -> Result<(), String> {
        for (turn, accepted) in expected {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} is not in the log", turn))?;

            if !accepted.contains(&entry.chosen_move) {
                let names: Vec<&str> = accepted.iter().map(|d| d.as_str()).collect();
                return Err(format!(
                    "Turn {}: expected {}, logged {}",
                    turn,
                    names.join(" or "),
                    entry.chosen_move.as_str()
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Snake};

    fn entry(turn: u32, chosen_move: Direction) -> LogEntry {
        LogEntry {
            turn,
            player: 0,
            agent: AgentKind::Paranoid,
            chosen_move,
            depth_reached: 2,
            state: GameState::new(
                5,
                5,
                vec![Snake::new(vec![Coord::new(2, 2)], Direction::North)],
                Some(Coord::new(2, 0)),
            ),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn result(agent: AgentKind, logged: Direction, replayed: Direction) -> ReplayResult {
        ReplayResult {
            turn: 0,
            player: 0,
            agent,
            logged_move: logged,
            replayed_move: replayed,
            logged_depth: 1,
            replayed_depth: 3,
            forced_loss: false,
            elapsed_ms: 4,
        }
    }

    #[test]
    fn test_generate_stats_per_agent() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let results = vec![
            result(AgentKind::Paranoid, Direction::North, Direction::North),
            result(AgentKind::NonParanoid, Direction::North, Direction::East),
            result(AgentKind::Paranoid, Direction::West, Direction::West),
        ];
        let stats = engine.generate_stats(&results);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.matches, 2);
        assert_eq!(stats.mismatches(), 1);
        assert!((stats.avg_depth - 3.0).abs() < 1e-9);
        assert_eq!(
            stats.per_agent,
            vec![
                AgentStats {
                    agent: AgentKind::Paranoid,
                    decisions: 2,
                    matches: 2
                },
                AgentStats {
                    agent: AgentKind::NonParanoid,
                    decisions: 1,
                    matches: 0
                },
            ]
        );
    }

    #[test]
    fn test_empty_stats_have_zero_rate() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let stats = engine.generate_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.match_rate(), 0.0);
    }

    #[test]
    fn test_validate_expected_moves() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let entries = vec![entry(3, Direction::North), entry(4, Direction::East)];

        assert!(engine
            .validate_expected_moves(&entries, &[(3, vec![Direction::North])])
            .is_ok());
        assert!(engine
            .validate_expected_moves(&entries, &[(4, vec![Direction::North, Direction::South])])
            .is_err());
        assert!(engine
            .validate_expected_moves(&entries, &[(9, vec![Direction::North])])
            .is_err());
    }

    #[test]
    fn test_replay_turn_rejects_unknown_player() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let e = entry(0, Direction::North);
        assert!(engine.replay_turn(&e.state, 3, AgentKind::Paranoid).is_err());
    }

    #[test]
    fn test_replay_turns_rejects_missing_turn() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let entries = vec![entry(1, Direction::North)];
        assert!(engine.replay_turns(&entries, &[2]).is_err());
    }
}
