//! Tournament Runner for Two Flags engines
//!
//! This crate provides infrastructure for:
//! - Running matches between engines from any setup position
//! - Round-robin tournaments described by a TOML file
//! - JSON result files and plain-text reports
//!
//! # Usage
//!
//! ```bash
//! # Run a match between alpha-beta and MCTS
//! cargo run -p tournament -- match alphabeta mcts --games 20 --movetime 200
//!
//! # Run every pairing listed in a config file
//! cargo run -p tournament -- run tournament.toml --out results.json
//! ```

mod config;
mod engines;
mod error;
mod match_runner;
mod results;

pub use config::*;
pub use engines::*;
pub use error::*;
pub use match_runner::*;
pub use results::*;
