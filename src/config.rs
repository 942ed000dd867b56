//! Environment-driven defaults for the command line.
//!
//! Unset variables fall back to defaults. Unparseable values are logged and
//! also fall back, so a typo never aborts a run.

use std::env;

pub const DEFAULT_TRIALS: u64 = 10_000;
pub const DEFAULT_MAX_TRIALS: u64 = 1_000_000;

pub const TRIALS_VAR: &str = "RISK_ODDS_TRIALS";
pub const MAX_TRIALS_VAR: &str = "RISK_ODDS_MAX_TRIALS";
pub const SEED_VAR: &str = "RISK_ODDS_SEED";
pub const WORKERS_VAR: &str = "RISK_ODDS_WORKERS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Trials run when the command line does not give a count.
    pub default_trials: u64,
    /// Largest accepted trial count.
    pub max_trials: u64,
    /// Fixed seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Worker threads for parallel runs; 0 means the Rayon default.
    pub workers: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            default_trials: DEFAULT_TRIALS,
            max_trials: DEFAULT_MAX_TRIALS,
            seed: None,
            workers: 0,
        }
    }
}

impl SimulatorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_trials = parse_var(&lookup, MAX_TRIALS_VAR, defaults.max_trials, |v| v >= 1);
        let mut default_trials =
            parse_var(&lookup, TRIALS_VAR, defaults.default_trials, |v| v >= 1);
        if default_trials > max_trials {
            tracing::warn!(
                default_trials,
                max_trials,
                "{TRIALS_VAR} exceeds {MAX_TRIALS_VAR}, clamping"
            );
            default_trials = max_trials;
        }

        Self {
            default_trials,
            max_trials,
            seed: lookup(SEED_VAR).and_then(|raw| parse_or_warn(SEED_VAR, &raw)),
            workers: parse_var(&lookup, WORKERS_VAR, defaults.workers, |_| true),
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T, accept: impl Fn(T) -> bool) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match parse_or_warn::<T>(key, &raw) {
            Some(value) if accept(value) => value,
            Some(value) => {
                tracing::warn!(key, %value, %default, "value out of range, using default");
                default
            }
            None => default,
        },
        None => default,
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    let parsed = raw.trim().parse::<T>().ok();
    if parsed.is_none() {
        tracing::warn!(key, raw, "invalid value, using default");
    }
    parsed
}
