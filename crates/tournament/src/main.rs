//! Tournament CLI
//!
//! Run matches between engines and write the results as JSON.

use anyhow::{Context, Result, bail};
use std::env;
use std::path::{Path, PathBuf};
use tournament::{
    ENGINE_NAMES, MatchConfig, MatchRunner, TournamentConfig, TournamentResults, create_engine,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Two Flags Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament match <engine1> <engine2> [options]");
    println!("  tournament run <config.toml> [--out FILE]");
    println!("  tournament report <results.json>");
    println!();
    println!("Options:");
    println!("  --games N       games to play (default 10)");
    println!("  --depth D       depth cap per move (default 4)");
    println!("  --movetime MS   time per move in milliseconds");
    println!("  --max-plies N   plies before a draw is declared (default 200)");
    println!("  --setup TEXT    starting position, e.g. \"Setup Wa2 Bh7\"");
    println!("  --seed N        make engine play reproducible");
    println!("  --ponder        think on the opponent's time");
    println!("  --out FILE      write results as JSON");
    println!();
    println!("Engines: {}", ENGINE_NAMES.join(", "));
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{flag} needs a value"))
}

/// Applies `--flag value` options to `config`; returns (seed, output path).
fn parse_options(
    args: &[String],
    config: &mut MatchConfig,
) -> Result<(Option<u64>, Option<PathBuf>)> {
    let mut seed = None;
    let mut out = None;
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--games" | "-g" => config.num_games = value(args, i, flag)?.parse()?,
            "--depth" | "-d" => config.depth = value(args, i, flag)?.parse()?,
            "--movetime" | "-t" => config.move_time_ms = Some(value(args, i, flag)?.parse()?),
            "--max-plies" => config.max_plies = value(args, i, flag)?.parse()?,
            "--setup" => config.setup = value(args, i, flag)?.to_string(),
            "--seed" => seed = Some(value(args, i, flag)?.parse()?),
            "--out" | "-o" => out = Some(PathBuf::from(value(args, i, flag)?)),
            "--ponder" => {
                config.ponder = true;
                i += 1;
                continue;
            }
            other => bail!("unknown option {other}"),
        }
        i += 2;
    }
    Ok((seed, out))
}

fn save(results: &TournamentResults, out: Option<&Path>) -> Result<()> {
    if let Some(path) = out {
        results.save(path)?;
        info!(path = %path.display(), "results written");
    }
    Ok(())
}

fn run_match(args: &[String]) -> Result<()> {
    let [engine1_spec, engine2_spec, rest @ ..] = args else {
        print_usage();
        bail!("match requires two engine names");
    };

    let mut config = TournamentConfig {
        name: format!("{engine1_spec} vs {engine2_spec}"),
        engines: vec![engine1_spec.clone(), engine2_spec.clone()],
        ..Default::default()
    };
    let (seed, out) = parse_options(rest, &mut config.match_config)?;
    config.seed = seed;

    println!("=== Match: {engine1_spec} vs {engine2_spec} ===");
    println!(
        "Games: {}, Depth: {}",
        config.match_config.num_games, config.match_config.depth
    );
    println!();

    let mut engine1 = create_engine(engine1_spec, seed)?;
    let mut engine2 = create_engine(engine2_spec, seed.map(|s| s.wrapping_add(1)))?;

    let runner = MatchRunner::new(config.match_config.clone());
    let result = runner.run_match(engine1.as_mut(), engine2.as_mut())?;

    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        engine1_spec, result.wins, result.losses, result.draws
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    let mut results = TournamentResults::new(&config.name, config.engines.clone(), config.clone());
    results.add_match(engine1_spec, engine2_spec, result);
    save(&results, out.as_deref())
}

fn run_tournament(args: &[String]) -> Result<()> {
    let [path, rest @ ..] = args else {
        print_usage();
        bail!("run requires a config file");
    };
    let config = TournamentConfig::load(Path::new(path))?;
    let mut scratch = config.match_config.clone();
    let (_, out) = parse_options(rest, &mut scratch)?;

    let mut results = TournamentResults::new(&config.name, config.engines.clone(), config.clone());
    let runner = MatchRunner::new(config.match_config.clone());

    for (index, (a, b)) in config.pairings().into_iter().enumerate() {
        println!("--- {a} vs {b} ---");
        let seed = config.seed.map(|s| s.wrapping_add(2 * index as u64));
        let mut engine1 = create_engine(a, seed)?;
        let mut engine2 = create_engine(b, seed.map(|s| s.wrapping_add(1)))?;

        let result = runner.run_match(engine1.as_mut(), engine2.as_mut())?;
        println!(
            "Result: {}-{}-{} (Score: {:.1}%)",
            result.wins,
            result.losses,
            result.draws,
            result.score() * 100.0
        );
        results.add_match(a, b, result);
    }

    results.print_report();
    save(&results, out.as_deref())
}

fn show_report(args: &[String]) -> Result<()> {
    let [path, ..] = args else {
        bail!("report requires a results file");
    };
    let results = TournamentResults::load(Path::new(path))
        .with_context(|| format!("cannot show report for {path}"))?;
    results.print_report();
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "match" => run_match(&args[2..]),
        "run" => run_tournament(&args[2..]),
        "report" => show_report(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            bail!("unknown command: {other}")
        }
    }
}
