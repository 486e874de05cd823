//! Two Flags player
//!
//! Speaks the server line protocol on stdin/stdout. Logs go to stderr.

mod config;
mod player;
mod policy;

use anyhow::{Context, Result, bail};
use std::env;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{AgentConfig, EngineKind};
use player::Player;
use policy::DepthSchedule;

fn print_usage() {
    eprintln!("Two Flags Agent");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  flags_agent [options] < server > server");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE   TOML agent configuration");
    eprintln!("  --engine NAME   alphabeta, mcts or random (default alphabeta)");
    eprintln!("  --depth D       fixed depth cap for every move");
    eprintln!("  --seed N        make play reproducible");
    eprintln!("  --ponder        think on the opponent's time");
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{flag} needs a value"))
}

/// Builds the config from `--config` and then lets the other flags override it.
fn parse_args(args: &[String]) -> Result<Option<AgentConfig>> {
    let mut path = None;
    let mut engine = None;
    let mut depth = None;
    let mut seed = None;
    let mut ponder = false;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config" | "-c" => path = Some(PathBuf::from(value(args, i, flag)?)),
            "--engine" | "-e" => engine = Some(value(args, i, flag)?.parse::<EngineKind>()?),
            "--depth" | "-d" => depth = Some(value(args, i, flag)?.parse::<u8>()?),
            "--seed" => seed = Some(value(args, i, flag)?.parse::<u64>()?),
            "--ponder" => {
                ponder = true;
                i += 1;
                continue;
            }
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown option {other}"),
        }
        i += 2;
    }

    let mut config = match path {
        Some(path) => AgentConfig::load(&path)?,
        None => AgentConfig::default(),
    };
    if let Some(engine) = engine {
        config.engine = engine;
    }
    if let Some(depth) = depth {
        config.depth = DepthSchedule::fixed(depth);
    }
    if let Some(seed) = seed {
        config.set_seed(seed);
    }
    config.ponder |= ponder;
    Ok(Some(config))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(config) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };

    let mut player = Player::new(config.clone());
    info!(engine = ?config.engine, ponder = config.ponder, "agent ready");

    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout().lock());
    player.run(stdin.lock(), &mut stdout)
}
