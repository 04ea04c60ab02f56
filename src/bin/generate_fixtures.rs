//! Fixture generator for benchmarks.
//!
//! Plays deterministic self-play games and captures running-state snapshots
//! after a given number of applied actions. Run with:
//!
//!     cargo run --bin generate_fixtures

use std::fs;
use std::path::PathBuf;

use secret_hitler_engine::engine::simulator::{play_game, player_names, Lineup};
use secret_hitler_engine::engine::strategy::RandomStrategy;
use secret_hitler_engine::game::config::Rules;
use secret_hitler_engine::game::state::GameState;

const SEEDS: [u64; 3] = [42, 123, 999];
const PLAYER_COUNTS: [usize; 3] = [5, 7, 10];
const CHECKPOINTS: [usize; 4] = [15, 40, 80, 140];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("benches/fixtures");
    fs::create_dir_all(&fixtures_dir)?;

    let rules = Rules::default();
    let mut total_generated = 0;

    for &players in &PLAYER_COUNTS {
        for &seed in &SEEDS {
            let mut captured: Vec<(usize, GameState)> = Vec::new();
            play_game(&rules, &player_names(players), seed, Lineup::uniform(&RandomStrategy), |n, state| {
                if CHECKPOINTS.contains(&n) && state.running().is_some() {
                    captured.push((n, state.clone()));
                }
            })?;

            for (actions, state) in captured {
                let label = format!("p{players}_seed{seed}_a{actions}");
                let fixture = serde_json::json!({
                    "label": label,
                    "players": players,
                    "seed": seed,
                    "actions": actions,
                    "state": state,
                });
                let path = fixtures_dir.join(format!("{label}.json"));
                fs::write(&path, serde_json::to_string_pretty(&fixture)?)?;
                total_generated += 1;
                println!("  wrote {}", path.display());
            }
        }
    }

    println!("\nGenerated {total_generated} fixtures in {}", fixtures_dir.display());
    Ok(())
}
