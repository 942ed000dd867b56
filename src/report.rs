//! Presentation of simulation results: the plain-text result block, a
//! one-line table row and the per-round loss chart data.

use std::fmt::Write as _;

use serde::Serialize;

use crate::simulator::AggregateResult;

pub const ATTACKER_SERIES_LABEL: &str = "Attacker avg. losses";
pub const DEFENDER_SERIES_LABEL: &str = "Defender avg. losses";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: &'static str,
    pub data: Vec<f64>,
}

/// Line-chart data for average losses per round. Labels run `1..=n`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossChart {
    pub labels: Vec<usize>,
    pub attacker: ChartSeries,
    pub defender: ChartSeries,
}

impl LossChart {
    pub fn from_result(result: &AggregateResult) -> Self {
        let length = result
            .attacker_avg_losses
            .len()
            .max(result.defender_avg_losses.len());
        Self {
            labels: (1..=length).collect(),
            attacker: ChartSeries {
                label: ATTACKER_SERIES_LABEL,
                data: result.attacker_avg_losses.clone(),
            },
            defender: ChartSeries {
                label: DEFENDER_SERIES_LABEL,
                data: result.defender_avg_losses.clone(),
            },
        }
    }
}

pub fn render_text(result: &AggregateResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} simulations", group_thousands(result.trials));
    let _ = writeln!(
        out,
        "Armies (A/D): {} / {}",
        result.attackers, result.defenders
    );
    let _ = writeln!(
        out,
        "Attacker win chance: {:.2}%",
        result.attacker_win_rate
    );
    let _ = writeln!(
        out,
        "Avg. remaining if A wins: {}",
        survivors_display(result.attacker_wins, result.avg_attacker_survivors)
    );
    let _ = write!(
        out,
        "Avg. remaining if D wins: {}",
        survivors_display(result.defender_wins(), result.avg_defender_survivors)
    );
    out
}

pub fn render_table(result: &AggregateResult) -> String {
    format!(
        "attackers\tdefenders\ttrials\twin_rate\tavg_attacker_remaining\tavg_defender_remaining\trounds\n{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{}",
        result.attackers,
        result.defenders,
        result.trials,
        result.attacker_win_rate,
        result.avg_attacker_survivors,
        result.avg_defender_survivors,
        result.rounds()
    )
}

/// A side that never won has no meaningful average and is shown as a bare `0`.
fn survivors_display(wins: u64, average: f64) -> String {
    if wins == 0 {
        "0".to_string()
    } else {
        format!("{average:.2}")
    }
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
