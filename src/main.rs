// Headless local match runner
//
// Usage:
//   cargo run -- [--agents paranoid,non-paranoid,random] [--config Snake.toml] [--show]
//
// Plays one match on the board described in [game_rules]. Players move one at a
// time in index order; the target respawns as soon as it has been eaten.

use log::info;
use std::env;
use std::process;
use std::time::Instant;

use snake_search::bot::{AgentKind, Bot};
use snake_search::config::Config;
use snake_search::debug_logger::DebugLogger;
use snake_search::game::Simulation;
use snake_search::simple_profiler;
use snake_search::types::GameState;

struct Options {
    config_path: Option<String>,
    agents: Option<Vec<AgentKind>>,
    show: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config_path: None,
        agents: None,
        show: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                options.config_path = Some(args.get(i).ok_or("--config requires a value")?.clone());
            }
            "--agents" => {
                i += 1;
                let value = args.get(i).ok_or("--agents requires a value")?;
                let agents = value
                    .split(',')
                    .map(AgentKind::parse)
                    .collect::<Result<Vec<_>, _>>()?;
                options.agents = Some(agents);
            }
            "--show" => options.show = true,
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(options)
}

fn play(config: &Config, agents: &[AgentKind], show: bool) -> GameState {
    let rules = &config.game_rules;
    let mut state = GameState::with_players(rules.width, rules.height, agents.len(), rules.initial_length)
        .with_growth(rules.growth_per_target);
    state.choose_next_target();

    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
    let bots: Vec<Bot> = agents
        .iter()
        .enumerate()
        .map(|(i, &kind)| Bot::new(config, kind, i).with_logger(logger.clone()))
        .collect();

    for turn in 0..rules.max_turns {
        for bot in &bots {
            if state.is_game_over() {
                break;
            }
            if state.is_dead(bot.index()) {
                continue;
            }
            bot.do_move(&mut state);
            state.update_player_position(bot.index());
            if !state.has_target() {
                state.choose_next_target();
            }
        }

        if show {
            println!("Turn {}\n{}\n", turn, state.render());
        }
        if state.is_game_over() {
            info!("Game over after {} turns", turn + 1);
            break;
        }
    }

    state
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let config = match &options.config_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => Config::load_or_default(),
    };
    if config.profiling.enabled {
        simple_profiler::enable();
    }

    let agents = options.agents.unwrap_or_else(|| config.agents.players.clone());
    if agents.is_empty() {
        eprintln!("Error: at least one agent is required");
        process::exit(1);
    }
    if let Err(e) = config.game_rules.check_player_count(agents.len()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    info!(
        "Starting match: {}",
        agents.iter().map(|a| a.as_str()).collect::<Vec<_>>().join(" vs ")
    );

    let start = Instant::now();
    let state = play(&config, &agents, options.show);

    simple_profiler::merge_thread_local();
    simple_profiler::print_report(start.elapsed().as_millis() as u64);

    println!("Final standings:");
    for (i, kind) in agents.iter().enumerate() {
        println!(
            "  player {} ({}): length {}{}",
            i,
            kind,
            state.size(i),
            if state.is_dead(i) { ", dead" } else { "" }
        );
    }
}
