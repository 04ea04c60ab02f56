use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use secret_hitler_engine::engine::arena::run_arena;
use secret_hitler_engine::engine::rules::load_default_rules;
use secret_hitler_engine::engine::simulator::Lineup;
use secret_hitler_engine::engine::strategy::{PartisanStrategy, RandomStrategy, Strategy};

#[derive(Clone, Copy, ValueEnum)]
enum StrategyKind {
    Random,
    Partisan,
}

impl StrategyKind {
    fn strategy(self) -> &'static dyn Strategy {
        match self {
            StrategyKind::Random => &RandomStrategy,
            StrategyKind::Partisan => &PartisanStrategy,
        }
    }
}

#[derive(Parser)]
#[command(name = "secret-hitler-engine", about = "Secret Hitler rules engine self-play arena")]
struct Cli {
    /// Number of games to play
    #[arg(short, long, default_value = "1000")]
    games: usize,

    /// Players per game
    #[arg(short, long, default_value = "7")]
    players: usize,

    /// Seed of the first game; game i uses seed + i
    #[arg(short, long, default_value = "0")]
    seed: u64,

    #[arg(long, value_enum, default_value = "partisan")]
    liberals: StrategyKind,

    #[arg(long, value_enum, default_value = "partisan")]
    fascists: StrategyKind,

    /// Path to game_rules.toml (default: auto-discover)
    #[arg(long, env = "SECRET_HITLER_RULES")]
    rules: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let rules = load_default_rules(cli.rules.as_deref());
    if rules.configuration_for(cli.players).is_none() {
        return Err(format!(
            "rules do not support {} players ({}..={})",
            cli.players, rules.min_players, rules.max_players
        )
        .into());
    }

    let lineup = Lineup { liberal: cli.liberals.strategy(), fascist: cli.fascists.strategy() };
    tracing::info!(
        games = cli.games,
        players = cli.players,
        liberals = lineup.liberal.name(),
        fascists = lineup.fascist.name(),
        "starting arena"
    );

    let result = run_arena(&rules, lineup, cli.games, cli.seed, cli.players)?;
    println!("{}", result.summary());
    Ok(())
}
