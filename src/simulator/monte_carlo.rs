use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use crate::battle::{fight, BattleState, DiceSource, Rng, Side, TrialResult};
use crate::parallel::batch_ranges;
use crate::simulator::{BattleParams, LossSeries};

/// Fixed batch count for parallel runs so results depend only on the seed,
/// not on how many cores the machine has.
pub const PARALLEL_BATCH_COUNT: usize = 64;

/// Running totals for a set of trials. Tallies from disjoint trial sets merge
/// by addition, so batches can be combined in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub trials: u64,
    pub attacker_wins: u64,
    pub attacker_survivors: u64,
    pub defender_survivors: u64,
    pub losses: LossSeries,
}

impl Tally {
    pub fn record(&mut self, result: &TrialResult) {
        self.trials += 1;
        match result.winner {
            Side::Attacker => {
                self.attacker_wins += 1;
                self.attacker_survivors += u64::from(result.survivors);
            }
            Side::Defender => self.defender_survivors += u64::from(result.survivors),
        }
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        self.trials += other.trials;
        self.attacker_wins += other.attacker_wins;
        self.attacker_survivors += other.attacker_survivors;
        self.defender_survivors += other.defender_survivors;
        self.losses.merge(&other.losses);
        self
    }

    pub fn defender_wins(&self) -> u64 {
        self.trials - self.attacker_wins
    }

    pub fn into_result(self, params: &BattleParams) -> AggregateResult {
        let defender_wins = self.defender_wins();
        let attacker_win_rate = if self.trials == 0 {
            0.0
        } else {
            100.0 * self.attacker_wins as f64 / self.trials as f64
        };
        let avg_attacker_survivors = if self.attacker_wins == 0 {
            0.0
        } else {
            self.attacker_survivors as f64 / self.attacker_wins as f64
        };
        let avg_defender_survivors = if defender_wins == 0 {
            0.0
        } else {
            self.defender_survivors as f64 / defender_wins as f64
        };
        let (attacker_avg_losses, defender_avg_losses) = self.losses.averages(self.trials);

        AggregateResult {
            attackers: params.attackers(),
            defenders: params.defenders(),
            trials: self.trials,
            attacker_wins: self.attacker_wins,
            attacker_win_rate,
            avg_attacker_survivors,
            avg_defender_survivors,
            attacker_avg_losses,
            defender_avg_losses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub attackers: u32,
    pub defenders: u32,
    pub trials: u64,
    pub attacker_wins: u64,
    /// Percentage in `0.0..=100.0`.
    pub attacker_win_rate: f64,
    /// Mean attacker units left, over trials the attacker won.
    pub avg_attacker_survivors: f64,
    /// Mean defender units left, over trials the defender won.
    pub avg_defender_survivors: f64,
    /// Average attacker losses at each confrontation index, starting at round 1.
    pub attacker_avg_losses: Vec<f64>,
    pub defender_avg_losses: Vec<f64>,
}

impl AggregateResult {
    pub fn defender_wins(&self) -> u64 {
        self.trials - self.attacker_wins
    }

    /// Longest battle observed, in confrontations.
    pub fn rounds(&self) -> usize {
        self.attacker_avg_losses.len()
    }
}

/// Runs `trials` independent battles from the starting forces in `params`.
pub fn run_trials<D>(params: &BattleParams, trials: u64, dice: &mut D) -> Tally
where
    D: DiceSource + ?Sized,
{
    let start = BattleState::new(params.attackers(), params.defenders());
    let mut tally = Tally::default();
    for _ in 0..trials {
        let losses = &mut tally.losses;
        let result = fight(start, dice, |outcome| losses.record(outcome));
        tracing::trace!(
            winner = ?result.winner,
            survivors = result.survivors,
            confrontations = result.confrontations,
            "battle resolved"
        );
        tally.record(&result);
    }
    tally
}

/// Sequential Monte Carlo run drawing every die from `dice`.
pub fn simulate<D>(params: &BattleParams, dice: &mut D) -> AggregateResult
where
    D: DiceSource + ?Sized,
{
    let started = Instant::now();
    let result = run_trials(params, params.trials(), dice).into_result(params);
    log_run(&result, started, "sequential");
    result
}

/// Like [simulate] but splits trials into batches run across the current Rayon pool.
/// Each batch draws from its own [Rng] stream derived from `seed`; the output is
/// identical for the same params and seed whatever the worker count.
pub fn simulate_parallel(params: &BattleParams, seed: u64) -> AggregateResult {
    let started = Instant::now();
    let ranges = batch_ranges(params.trials() as usize, PARALLEL_BATCH_COUNT);

    let tally = ranges
        .into_par_iter()
        .enumerate()
        .map(|(batch, (start, end))| {
            let mut rng = Rng::for_stream(seed, batch as u64);
            run_trials(params, (end - start) as u64, &mut rng)
        })
        .reduce(Tally::default, Tally::merge);

    let result = tally.into_result(params);
    log_run(&result, started, "parallel");
    result
}

fn log_run(result: &AggregateResult, started: Instant, mode: &str) {
    tracing::debug!(
        mode,
        attackers = result.attackers,
        defenders = result.defenders,
        trials = result.trials,
        win_rate = result.attacker_win_rate,
        rounds = result.rounds(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "simulation finished"
    );
}
