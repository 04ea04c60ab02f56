//! Criterion benchmarks for the transition hot path.
//!
//! Run with:
//!     cargo bench --bench transitions
//!
//! Uses fixtures from `cargo run --bin generate_fixtures` when present and
//! plays the same games in-process otherwise.

use std::fs;
use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use secret_hitler_engine::engine::arena::run_arena;
use secret_hitler_engine::engine::simulator::{play_game, player_names, simulate_game, Lineup};
use secret_hitler_engine::engine::strategy::{PartisanStrategy, RandomStrategy};
use secret_hitler_engine::game::{apply, check_state, legal_actions, GameState, Rules};

struct Fixture {
    label: String,
    state: GameState,
}

fn load_fixtures() -> Vec<Fixture> {
    let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("benches/fixtures");
    let Ok(dir) = fs::read_dir(&fixtures_dir) else {
        return generated_fixtures();
    };

    let mut entries: Vec<_> = dir
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let fixtures: Vec<Fixture> = entries
        .iter()
        .map(|entry| {
            let path = entry.path();
            let json_str = fs::read_to_string(&path)
                .unwrap_or_else(|_| panic!("Failed to read fixture {:?}", path));
            let fixture_json: serde_json::Value =
                serde_json::from_str(&json_str).unwrap_or_else(|_| panic!("Invalid JSON in {:?}", path));
            let state: GameState = serde_json::from_value(fixture_json["state"].clone())
                .unwrap_or_else(|e| panic!("Failed to decode state from {:?}: {e}", path));
            let label = fixture_json["label"].as_str().unwrap_or("unlabelled").to_string();
            Fixture { label, state }
        })
        .collect();

    if fixtures.is_empty() {
        generated_fixtures()
    } else {
        fixtures
    }
}

fn generated_fixtures() -> Vec<Fixture> {
    let mut fixtures = Vec::new();
    for players in [5, 7, 10] {
        play_game(&Rules::default(), &player_names(players), 42, Lineup::uniform(&RandomStrategy), |n, state| {
            if n % 25 == 0 && state.running().is_some() {
                fixtures.push(Fixture { label: format!("p{players}_a{n}"), state: state.clone() });
            }
        })
        .expect("self-play failed");
    }
    fixtures
}

fn bench_legal_actions(c: &mut Criterion) {
    let fixtures = load_fixtures();
    let mut group = c.benchmark_group("legal_actions");
    for fixture in &fixtures {
        group.bench_with_input(BenchmarkId::new("legal_actions", &fixture.label), &fixture.state, |b, state| {
            b.iter(|| legal_actions(state));
        });
    }
    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let fixtures = load_fixtures();
    let mut group = c.benchmark_group("apply");
    for fixture in &fixtures {
        let Some(action) = legal_actions(&fixture.state).into_iter().next() else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("first_legal", &fixture.label), &fixture.state, |b, state| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| apply(state, &action, &mut rng));
        });
    }
    group.finish();
}

fn bench_coherence(c: &mut Criterion) {
    let fixtures = load_fixtures();
    let mut group = c.benchmark_group("check_state");
    for fixture in &fixtures {
        group.bench_with_input(BenchmarkId::new("check_state", &fixture.label), &fixture.state, |b, state| {
            b.iter(|| check_state(state));
        });
    }
    group.finish();
}

fn bench_full_games(c: &mut Criterion) {
    let rules = Rules::default();
    let mut group = c.benchmark_group("full_game");
    for players in [5, 7, 10] {
        let names = player_names(players);
        group.bench_with_input(BenchmarkId::new("random", players), &names, |b, names| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                simulate_game(&rules, names, seed, Lineup::uniform(&RandomStrategy))
            });
        });
    }
    group.bench_function("arena_100_partisan_7p", |b| {
        b.iter(|| run_arena(&rules, Lineup::uniform(&PartisanStrategy), 100, 0, 7));
    });
    group.finish();
}

criterion_group!(benches, bench_legal_actions, bench_apply, bench_coherence, bench_full_games);
criterion_main!(benches);
