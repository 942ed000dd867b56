//! Per-round loss buckets accumulated across trials.
//!
//! Index `i` holds the losses of confrontation `i + 1` summed over every trial
//! that lasted that long. Buckets are appended the first time any trial reaches
//! a new round, so both sides always have the same length.

use serde::Serialize;

use crate::battle::RoundOutcome;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LossSeries {
    attacker: Vec<u64>,
    defender: Vec<u64>,
}

impl LossSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &RoundOutcome) {
        let index = outcome.round.saturating_sub(1) as usize;
        self.ensure_len(index + 1);
        self.attacker[index] += u64::from(outcome.attacker_losses);
        self.defender[index] += u64::from(outcome.defender_losses);
    }

    pub fn len(&self) -> usize {
        self.attacker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacker.is_empty()
    }

    pub fn attacker_totals(&self) -> &[u64] {
        &self.attacker
    }

    pub fn defender_totals(&self) -> &[u64] {
        &self.defender
    }

    /// Elementwise sum; the shorter series is zero-extended first.
    pub fn merge(&mut self, other: &LossSeries) {
        self.ensure_len(other.len());
        for (total, add) in self.attacker.iter_mut().zip(&other.attacker) {
            *total += add;
        }
        for (total, add) in self.defender.iter_mut().zip(&other.defender) {
            *total += add;
        }
    }

    /// Average losses per round over `trials` battles, as `(attacker, defender)`.
    pub fn averages(&self, trials: u64) -> (Vec<f64>, Vec<f64>) {
        if trials == 0 {
            return (vec![0.0; self.len()], vec![0.0; self.len()]);
        }
        let divisor = trials as f64;
        let average = |totals: &[u64]| -> Vec<f64> {
            totals.iter().map(|&total| total as f64 / divisor).collect()
        };
        (average(&self.attacker), average(&self.defender))
    }

    fn ensure_len(&mut self, len: usize) {
        if self.attacker.len() < len {
            self.attacker.resize(len, 0);
            self.defender.resize(len, 0);
        }
    }
}
