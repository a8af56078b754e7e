// Library exports for the snake search engine
// This allows the match runner, the replay tool and the tests to share the core logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod evaluation;
pub mod game;
pub mod iterative_deepening;
pub mod node;
pub mod non_paranoid;
pub mod paranoid;
pub mod pathfinding;
pub mod replay;
pub mod simple_profiler;
pub mod types;
