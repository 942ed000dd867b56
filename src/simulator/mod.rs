pub mod loss_series;
pub mod monte_carlo;

use serde::Serialize;

use crate::error::{Result, SimulationError};

pub use loss_series::LossSeries;
pub use monte_carlo::{
    run_trials, simulate, simulate_parallel, AggregateResult, Tally, PARALLEL_BATCH_COUNT,
};

/// Validated simulator input. Every count is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BattleParams {
    attackers: u32,
    defenders: u32,
    trials: u64,
}

impl BattleParams {
    pub fn new(attackers: u32, defenders: u32, trials: u64) -> Result<Self> {
        if attackers < 1 {
            return Err(SimulationError::invalid_input("attackers", attackers));
        }
        if defenders < 1 {
            return Err(SimulationError::invalid_input("defenders", defenders));
        }
        if trials < 1 {
            return Err(SimulationError::invalid_input("trials", trials));
        }
        Ok(Self {
            attackers,
            defenders,
            trials,
        })
    }

    /// Parses user-entered values. Anything that is not a positive integer is rejected.
    pub fn parse(attackers: &str, defenders: &str, trials: &str) -> Result<Self> {
        Self::new(
            parse_positive(attackers, "attackers")?,
            parse_positive(defenders, "defenders")?,
            u64::from(parse_positive(trials, "trials")?),
        )
    }

    /// Rejects runs larger than `max_trials`.
    pub fn with_trial_limit(self, max_trials: u64) -> Result<Self> {
        if self.trials > max_trials {
            return Err(SimulationError::TooManyTrials {
                requested: self.trials,
                max: max_trials,
            });
        }
        Ok(self)
    }

    pub fn attackers(&self) -> u32 {
        self.attackers
    }

    pub fn defenders(&self) -> u32 {
        self.defenders
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }
}

fn parse_positive(raw: &str, field: &'static str) -> Result<u32> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 1 => {
            u32::try_from(value).map_err(|_| SimulationError::invalid_input(field, raw))
        }
        _ => Err(SimulationError::invalid_input(field, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_counts() {
        assert!(BattleParams::new(0, 1, 1).is_err());
        assert!(BattleParams::new(1, 0, 1).is_err());
        assert!(BattleParams::new(1, 1, 0).is_err());
        assert!(BattleParams::new(1, 1, 1).is_ok());
    }

    #[test]
    fn parse_rejects_non_positive_and_non_integer_values() {
        for bad in ["0", "-3", "2.5", "abc", ""] {
            let err = BattleParams::parse(bad, "1", "1").expect_err("should reject");
            assert!(
                matches!(err, SimulationError::InvalidInput { field: "attackers", .. }),
                "unexpected error for '{bad}': {err}"
            );
        }
        let err = BattleParams::parse("3", "2", "-1").expect_err("should reject trials");
        assert!(err.to_string().starts_with("Values must be positive."));
    }

    #[test]
    fn parse_accepts_surrounding_whitespace() {
        let params = BattleParams::parse(" 10 ", "4", "2500").expect("valid input");
        assert_eq!(params.attackers(), 10);
        assert_eq!(params.defenders(), 4);
        assert_eq!(params.trials(), 2500);
    }

    #[test]
    fn trial_limit_is_enforced() {
        let params = BattleParams::new(3, 3, 500).expect("valid input");
        assert!(params.with_trial_limit(500).is_ok());
        let err = params.with_trial_limit(499).expect_err("over the limit");
        assert!(matches!(
            err,
            SimulationError::TooManyTrials {
                requested: 500,
                max: 499
            }
        ));
    }
}
