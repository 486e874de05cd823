//! Match tallies saved as JSON, plus a plain-text standings report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::TournamentConfig;
use crate::error::TournamentError;
use crate::match_runner::MatchResult;

/// Everything a tournament run produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TournamentResults {
    pub name: String,
    pub participants: Vec<String>,
    /// One entry per pairing, in play order
    pub matches: Vec<MatchEntry>,
    /// Settings the games were played with
    pub config: TournamentConfig,
}

/// One pairing; `result` is from `engine1`'s side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEntry {
    pub engine1: String,
    pub engine2: String,
    pub result: MatchResult,
}

/// Points and game counts for one participant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standing {
    pub engine: String,
    pub points: f64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl TournamentResults {
    pub fn new(name: &str, participants: Vec<String>, config: TournamentConfig) -> Self {
        Self {
            name: name.to_string(),
            participants,
            matches: Vec::new(),
            config,
        }
    }

    pub fn add_match(&mut self, engine1: &str, engine2: &str, result: MatchResult) {
        self.matches.push(MatchEntry {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            result,
        });
    }

    /// Writes pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), TournamentError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| TournamentError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TournamentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Totals per participant, best score first (name breaks ties).
    pub fn standings(&self) -> Vec<Standing> {
        let mut table: BTreeMap<&str, Standing> = self
            .participants
            .iter()
            .map(|name| {
                (
                    name.as_str(),
                    Standing {
                        engine: name.clone(),
                        ..Default::default()
                    },
                )
            })
            .collect();

        for entry in &self.matches {
            let r = &entry.result;
            for (name, wins, losses) in [
                (entry.engine1.as_str(), r.wins, r.losses),
                (entry.engine2.as_str(), r.losses, r.wins),
            ] {
                let row = table.entry(name).or_insert_with(|| Standing {
                    engine: name.to_string(),
                    ..Default::default()
                });
                row.wins += wins;
                row.losses += losses;
                row.draws += r.draws;
                row.points += wins as f64 + 0.5 * r.draws as f64;
            }
        }

        let mut rows: Vec<Standing> = table.into_values().collect();
        rows.sort_by(|a, b| b.points.total_cmp(&a.points).then_with(|| a.engine.cmp(&b.engine)));
        rows
    }

    /// Per-pairing tallies followed by the standings table.
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Tournament: {} ===\n\n", self.name));
        report.push_str(&format!("Participants: {}\n", self.participants.join(", ")));
        let mc = &self.config.match_config;
        report.push_str(&format!(
            "Config: {} games/match, depth {}, move time {}, max plies {}\n\n",
            mc.num_games,
            mc.depth,
            mc.move_time_ms
                .map_or_else(|| "none".to_string(), |ms| format!("{ms} ms")),
            mc.max_plies
        ));

        report.push_str("Results:\n");
        report.push_str(&format!(
            "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}\n",
            "Engine 1", "Engine 2", "W", "L", "D"
        ));
        report.push_str(&"-".repeat(60));
        report.push('\n');

        for entry in &self.matches {
            report.push_str(&format!(
                "{:<20} vs {:<20} {:>5}-{:<5}-{:<5}\n",
                entry.engine1,
                entry.engine2,
                entry.result.wins,
                entry.result.losses,
                entry.result.draws
            ));
        }

        report.push_str("\nStandings:\n");
        for (rank, row) in self.standings().iter().enumerate() {
            report.push_str(&format!(
                "{:>2}. {:<20} {:>6.1}  (+{} -{} ={})\n",
                rank + 1,
                row.engine,
                row.points,
                row.wins,
                row.losses,
                row.draws
            ));
        }

        report
    }

    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
