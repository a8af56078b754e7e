// Standalone replay tool for analyzing decision logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --validate             Validate expected moves against the log
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use snake_search::config::Config;
use snake_search::replay::ReplayEngine;
use snake_search::types::Direction;

fn print_usage() {
    eprintln!("Snake Search Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --validate <T:M,...>    Validate expected moves (format: turn:move,...)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Replay all turns");
    eprintln!("  replay snake_search_decisions.jsonl --all");
    eprintln!();
    eprintln!("  # Replay specific turns");
    eprintln!("  replay snake_search_decisions.jsonl --turns 5,10,15");
    eprintln!();
    eprintln!("  # Validate expected moves (alternatives separated by '|')");
    eprintln!("  replay snake_search_decisions.jsonl --validate 5:north,10:east|south");
}

fn parse_turns(s: &str) -> Result<Vec<u32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<u32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(u32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let (turn, moves) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("Invalid format '{}'. Expected 'turn:move'", pair))?;

            let turn = turn
                .parse::<u32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", turn, e))?;
            let moves = moves
                .split('|')
                .map(Direction::parse)
                .collect::<Result<Vec<_>, _>>()?;

            Ok((turn, moves))
        })
        .collect()
}

fn run(args: &[String]) -> Result<(), String> {
    let log_file = &args[1];
    let mut replay_all = false;
    let mut turns: Option<Vec<u32>> = None;
    let mut expected: Option<Vec<(u32, Vec<Direction>)>> = None;
    let mut verbose = false;
    let mut config_path = "Snake.toml".to_string();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => replay_all = true,
            "--verbose" => verbose = true,
            "--turns" => {
                i += 1;
                let value = args.get(i).ok_or("--turns requires a value")?;
                turns = Some(parse_turns(value)?);
            }
            "--validate" => {
                i += 1;
                let value = args.get(i).ok_or("--validate requires a value")?;
                expected = Some(parse_expected_moves(value)?);
            }
            "--config" => {
                i += 1;
                config_path = args.get(i).ok_or("--config requires a value")?.clone();
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        log::warn!("{} - using hardcoded defaults", e);
        Config::default_hardcoded()
    });
    let engine = ReplayEngine::new(config, verbose);
    let entries = engine.load_log_file(log_file)?;

    if let Some(expected) = expected {
        engine.validate_expected_moves(&entries, &expected)?;
        println!("All {} expected moves validated", expected.len());
        return Ok(());
    }

    let results = match turns {
        Some(turns) => engine.replay_turns(&entries, &turns)?,
        None if replay_all => engine.replay_all(&entries),
        None => return Err("Specify --all, --turns or --validate".to_string()),
    };

    engine.print_report(&results);
    Ok(())
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
