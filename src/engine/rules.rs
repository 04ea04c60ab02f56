//! Rule sets loaded from TOML at runtime for the arena CLI and lobbies.
//!
//! Any field missing from the file falls back to the standard game, so a
//! file that only sets `chaos_threshold = 4` is a complete rule set.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::game::config::{Rules, MAX_PLAYERS, MIN_PLAYERS};
use crate::game::deck::{FASCIST_CARDS, LIBERAL_CARDS, STANDARD_DRAW};

pub const RULES_FILE: &str = "game_rules.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid rules: {0}")]
    Invalid(String),
}

/// Load and validate rules from a TOML file at the given path.
pub fn load_rules(path: &Path) -> Result<Rules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = parse_rules(&content).map_err(|e| match e {
        ConfigError::Parse { source, .. } => ConfigError::Parse { path: path.to_path_buf(), source },
        other => other,
    })?;
    Ok(rules)
}

pub fn parse_rules(content: &str) -> Result<Rules, ConfigError> {
    let rules: Rules = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;
    validate(&rules)?;
    Ok(rules)
}

/// Try an explicit path, then well-known locations, falling back to the
/// standard rules when nothing usable is found.
pub fn load_default_rules(explicit: Option<&Path>) -> Rules {
    let candidates: Vec<PathBuf> = explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain([PathBuf::from(RULES_FILE), Path::new("..").join(RULES_FILE)])
        .collect();
    for p in &candidates {
        if !p.exists() {
            continue;
        }
        match load_rules(p) {
            Ok(rules) => {
                tracing::info!(path = %p.display(), brackets = rules.brackets.len(), "loaded game rules");
                return rules;
            }
            Err(e) => {
                tracing::warn!(path = %p.display(), error = %e, "failed to load game rules");
            }
        }
    }
    tracing::info!("no {RULES_FILE} found, using standard rules");
    Rules::default()
}

fn validate(rules: &Rules) -> Result<(), ConfigError> {
    let invalid = |msg: String| Err(ConfigError::Invalid(msg));

    if rules.min_players < MIN_PLAYERS || rules.max_players > MAX_PLAYERS {
        return invalid(format!(
            "player limits {}..={} must lie within {MIN_PLAYERS}..={MAX_PLAYERS}",
            rules.min_players, rules.max_players
        ));
    }
    if rules.min_players > rules.max_players {
        return invalid(format!("min_players {} exceeds max_players {}", rules.min_players, rules.max_players));
    }
    if rules.liberal_policy_goal == 0 || rules.fascist_policy_goal == 0 || rules.chaos_threshold == 0 {
        return invalid("policy goals and chaos threshold must be positive".into());
    }
    if rules.liberal_policy_goal > LIBERAL_CARDS {
        return invalid(format!("liberal goal {} exceeds the deck", rules.liberal_policy_goal));
    }
    if rules.fascist_policy_goal > FASCIST_CARDS {
        return invalid(format!("fascist goal {} exceeds the deck", rules.fascist_policy_goal));
    }
    // One short of both goals, a hand of three must still leave a full draw behind.
    let enacted = (rules.liberal_policy_goal - 1) + (rules.fascist_policy_goal - 1);
    let in_play = LIBERAL_CARDS + FASCIST_CARDS - enacted;
    if in_play < 2 * STANDARD_DRAW as u32 {
        return invalid(format!(
            "goals {} and {} leave {in_play} cards in play, at least {} are needed",
            rules.liberal_policy_goal,
            rules.fascist_policy_goal,
            2 * STANDARD_DRAW
        ));
    }
    for n in rules.min_players..=rules.max_players {
        let Some(bracket) = rules.bracket_for(n) else {
            return invalid(format!("no bracket covers {n} players"));
        };
        if bracket.fascists + 1 >= n {
            return invalid(format!("{} fascists leave no liberals at {n} players", bracket.fascists));
        }
    }
    Ok(())
}
