//! Bot-vs-bot arena runner: many seeded self-play games in parallel.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;

use crate::engine::simulator::{player_names, simulate_game, Lineup, SimulationError, SimulationOutcome};
use crate::game::config::Rules;
use crate::game::types::{Party, Victory};

/// Aggregated results from an arena run.
#[derive(Debug, Clone, Default)]
pub struct ArenaResult {
    pub num_games: usize,
    pub num_players: usize,
    pub wins: BTreeMap<Party, usize>,
    pub reasons: BTreeMap<Victory, usize>,
    pub game_actions: Vec<usize>,
    pub game_durations_ms: Vec<f64>,
}

impl ArenaResult {
    pub fn win_rate(&self, party: Party) -> f64 {
        *self.wins.get(&party).unwrap_or(&0) as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_actions(&self) -> f64 {
        if self.game_actions.is_empty() {
            return 0.0;
        }
        self.game_actions.iter().sum::<usize>() as f64 / self.game_actions.len() as f64
    }

    /// Wilson score interval for the party's win rate.
    pub fn confidence_interval_95(&self, party: Party) -> (f64, f64) {
        let n = self.num_games;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(party);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Arena Results ({} games, {} players)",
            self.num_games, self.num_players
        )];
        lines.push("=".repeat(60));
        for party in [Party::Liberal, Party::Fascist] {
            let (ci_lo, ci_hi) = self.confidence_interval_95(party);
            lines.push(format!(
                "  {:>10}: {:4} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]",
                format!("{party:?}"),
                self.wins.get(&party).copied().unwrap_or(0),
                self.win_rate(party) * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
            ));
        }
        for (victory, count) in &self.reasons {
            lines.push(format!("    {count:4}  {victory}"));
        }
        lines.push(format!("  Avg actions per game: {:.1}", self.avg_actions()));
        if !self.game_durations_ms.is_empty() {
            let total_ms = self.game_durations_ms.iter().sum::<f64>();
            let avg_ms = total_ms / self.game_durations_ms.len() as f64;
            lines.push(format!("  Avg game: {:.2}ms  |  Total CPU: {:.1}s", avg_ms, total_ms / 1000.0));
        }
        lines.join("\n")
    }

    fn record(&mut self, outcome: &SimulationOutcome, elapsed_ms: f64) {
        *self.wins.entry(outcome.victory.winning_party()).or_default() += 1;
        *self.reasons.entry(outcome.victory).or_default() += 1;
        self.game_actions.push(outcome.actions);
        self.game_durations_ms.push(elapsed_ms);
    }
}

/// Run `num_games` games with seeds `base_seed..` and aggregate outcomes.
/// Stops at the first game that breaks an invariant.
pub fn run_arena(
    rules: &Rules,
    lineup: Lineup<'_>,
    num_games: usize,
    base_seed: u64,
    num_players: usize,
) -> Result<ArenaResult, SimulationError> {
    let names = player_names(num_players);
    let outcomes: Vec<(SimulationOutcome, f64)> = (0..num_games)
        .into_par_iter()
        .map(|game_idx| -> Result<(SimulationOutcome, f64), SimulationError> {
            let seed = base_seed + game_idx as u64;
            let t0 = Instant::now();
            let outcome = simulate_game(rules, &names, seed, lineup).map_err(|e| {
                tracing::error!(seed, error = %e, "arena game failed");
                e
            })?;
            Ok((outcome, t0.elapsed().as_secs_f64() * 1000.0))
        })
        .collect::<Result<_, SimulationError>>()?;

    let mut result = ArenaResult { num_games, num_players, ..ArenaResult::default() };
    for (outcome, elapsed_ms) in &outcomes {
        result.record(outcome, *elapsed_ms);
    }
    Ok(result)
}
