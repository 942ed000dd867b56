use serde::Serialize;

use crate::battle::{entropy_seed, simulate_battle, Rng, TraceMode};
use crate::config::SimulatorConfig;
use crate::error::Result;
use crate::parallel::{run_simulation_batches, WorkerPool};
use crate::report::{render_table, render_text, LossChart};
use crate::simulator::{simulate, AggregateResult, BattleParams};

pub const USAGE: &str = "usage: risk_odds <simulate|battle|help>\n  \
    risk_odds simulate <attackers> <defenders> [trials] [--seed N] [--workers N] [--parallel] [--table|--json]\n  \
    risk_odds battle <attackers> <defenders> [--seed N]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Battle,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub positionals: Vec<String>,
    pub seed: Option<u64>,
    pub workers: Option<usize>,
    pub parallel: bool,
    pub format: OutputFormat,
}

impl CliOptions {
    pub fn parse(args: &[String]) -> Self {
        let mut options = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--table" => options.format = OutputFormat::Table,
                "--json" => options.format = OutputFormat::Json,
                "--parallel" => options.parallel = true,
                "--seed" => options.seed = parse_flag_value(iter.next(), "seed"),
                "--workers" => options.workers = parse_flag_value(iter.next(), "workers"),
                _ => options.positionals.push(arg.clone()),
            }
        }
        options
    }
}

#[derive(Debug, Serialize)]
struct SimulateOutput<'a> {
    seed: u64,
    parallel: bool,
    result: &'a AggregateResult,
    chart: LossChart,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("battle") => Some(Command::Battle),
        Some("help" | "--help" | "-h") => Some(Command::Help),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let config = SimulatorConfig::from_env();
    run_with_config(args, &config)
}

pub fn run_with_config(args: &[String], config: &SimulatorConfig) -> i32 {
    let rest = args.get(2..).unwrap_or_default();
    match parse_command(args) {
        Some(Command::Simulate) => handle_simulate(&CliOptions::parse(rest), config),
        Some(Command::Battle) => handle_battle(&CliOptions::parse(rest), config),
        Some(Command::Help) => {
            println!("{USAGE}");
            0
        }
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_simulate(options: &CliOptions, config: &SimulatorConfig) -> i32 {
    if options.positionals.len() < 2 {
        eprintln!("usage: risk_odds simulate <attackers> <defenders> [trials]");
        return 2;
    }
    match run_simulate(options, config) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("simulate failed: {err}");
            err.exit_code()
        }
    }
}

fn run_simulate(options: &CliOptions, config: &SimulatorConfig) -> Result<String> {
    let trials = options
        .positionals
        .get(2)
        .cloned()
        .unwrap_or_else(|| config.default_trials.to_string());
    let params = BattleParams::parse(&options.positionals[0], &options.positionals[1], &trials)?
        .with_trial_limit(config.max_trials)?;
    let seed = resolve_seed(options, config)?;
    let workers = options.workers.unwrap_or(config.workers);
    let parallel = options.parallel || workers > 0;

    let result = if parallel {
        run_simulation_batches(&params, seed, &WorkerPool::with_workers(workers))?
    } else {
        simulate(&params, &mut Rng::new(seed))
    };

    Ok(match options.format {
        OutputFormat::Text => render_text(&result),
        OutputFormat::Table => render_table(&result),
        OutputFormat::Json => serde_json::to_string_pretty(&SimulateOutput {
            seed,
            parallel,
            chart: LossChart::from_result(&result),
            result: &result,
        })?,
    })
}

fn handle_battle(options: &CliOptions, config: &SimulatorConfig) -> i32 {
    let [attackers, defenders, ..] = options.positionals.as_slice() else {
        eprintln!("usage: risk_odds battle <attackers> <defenders> [--seed N]");
        return 2;
    };
    let outcome = BattleParams::parse(attackers, defenders, "1").and_then(|params| {
        let seed = resolve_seed(options, config)?;
        let report = simulate_battle(
            params.attackers(),
            params.defenders(),
            &mut Rng::new(seed),
            TraceMode::Rounds,
        );
        Ok(serde_json::to_string_pretty(&report)?)
    });
    match outcome {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("battle failed: {err}");
            err.exit_code()
        }
    }
}

fn resolve_seed(options: &CliOptions, config: &SimulatorConfig) -> Result<u64> {
    match options.seed.or(config.seed) {
        Some(seed) => Ok(seed),
        None => Ok(entropy_seed()?),
    }
}

fn parse_flag_value<T: std::str::FromStr>(raw: Option<&String>, name: &str) -> Option<T> {
    let value = raw?;
    let parsed = value.parse::<T>().ok();
    if parsed.is_none() {
        eprintln!("invalid {name} '{value}', ignoring");
    }
    parsed
}
