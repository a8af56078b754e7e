// Configuration module for reading Snake.toml
// Timing, game rules and agent line-up for the search engine and its tools

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::bot::AgentKind;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub game_rules: GameRulesConfig,
    pub agents: AgentsConfig,
    pub debug: DebugConfig,
    pub profiling: ProfilingConfig,
}

/// Per-move time budget and depth limits
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub move_budget_ms: u64,
    /// Optional cap on iterative deepening; unlimited when absent
    #[serde(default)]
    pub max_search_depth: Option<u32>,
}

impl GameRulesConfig {
    /// Every snake starts on its own row, straight along it
    pub fn check_player_count(&self, players: usize) -> Result<(), String> {
        if players > self.height as usize {
            return Err(format!(
                "{} players do not fit on a board with {} rows",
                players, self.height
            ));
        }
        Ok(())
    }
}

impl TimingConfig {
    pub fn move_budget(&self) -> Duration {
        Duration::from_millis(self.move_budget_ms)
    }
}

/// Board and growth rules for locally played matches
#[derive(Debug, Deserialize, Clone)]
pub struct GameRulesConfig {
    pub width: i32,
    pub height: i32,
    pub initial_length: usize,
    pub growth_per_target: u32,
    pub max_turns: u32,
}

/// Agent kind per player slot, in player order
#[derive(Debug, Deserialize, Clone)]
pub struct AgentsConfig {
    pub players: Vec<AgentKind>,
}

/// Decision log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

/// Performance profiling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ProfilingConfig {
    pub enabled: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                move_budget_ms: 100,
                max_search_depth: None,
            },
            game_rules: GameRulesConfig {
                width: 12,
                height: 12,
                initial_length: 3,
                growth_per_target: 1,
                max_turns: 500,
            },
            agents: AgentsConfig {
                players: vec![AgentKind::Paranoid, AgentKind::NonParanoid, AgentKind::Random],
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snake_search_decisions.jsonl".to_string(),
            },
            profiling: ProfilingConfig { enabled: false },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    fn validate(&self) -> Result<(), String> {
        let rules = &self.game_rules;
        if rules.width <= 0 || rules.height <= 0 {
            return Err(format!(
                "Board must have positive dimensions, got {}x{}",
                rules.width, rules.height
            ));
        }
        if rules.initial_length == 0 {
            return Err("initial_length must be at least 1".to_string());
        }
        if rules.initial_length > rules.width as usize {
            return Err(format!(
                "initial_length {} does not fit in board width {}",
                rules.initial_length, rules.width
            ));
        }
        rules.check_player_count(self.agents.players.len())?;
        if self.timing.max_search_depth == Some(0) {
            return Err("max_search_depth must be at least 1 when set".to_string());
        }
        Ok(())
    }
}
