//! Single-battle resolution for Risk-style dice combat.
//!
//! Each exchange rolls up to three attacker dice and two defender dice,
//! sorts both sides descending and pairs them highest against highest.
//! Every pairing is one confrontation and advances the battle's round index.

use serde::Serialize;

use crate::battle::rng::DiceSource;

pub const DIE_FACES: u8 = 6;
pub const ATTACKER_DICE_CAP: u32 = 3;
pub const DEFENDER_DICE_CAP: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Attacker,
    Defender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    InProgress,
    AttackerWon,
    DefenderWon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BattleState {
    pub attackers: u32,
    pub defenders: u32,
}

impl BattleState {
    pub fn new(attackers: u32, defenders: u32) -> Self {
        Self {
            attackers,
            defenders,
        }
    }

    pub fn phase(&self) -> BattlePhase {
        if self.defenders == 0 {
            BattlePhase::AttackerWon
        } else if self.attackers == 0 {
            BattlePhase::DefenderWon
        } else {
            BattlePhase::InProgress
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase() != BattlePhase::InProgress
    }

    /// Dice each side throws this exchange: `(min(3, attackers), min(2, defenders))`.
    pub fn dice_counts(&self) -> (usize, usize) {
        (
            self.attackers.min(ATTACKER_DICE_CAP) as usize,
            self.defenders.min(DEFENDER_DICE_CAP) as usize,
        )
    }

    fn apply_loss(&mut self, loser: Side) {
        match loser {
            Side::Attacker => self.attackers -= 1,
            Side::Defender => self.defenders -= 1,
        }
    }
}

/// One confrontation: a single attacker die against a single defender die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    /// 1-based confrontation index within the battle.
    pub round: u32,
    pub attacker_roll: u8,
    pub defender_roll: u8,
    pub attacker_losses: u32,
    pub defender_losses: u32,
}

impl RoundOutcome {
    fn resolve(round: u32, attacker_roll: u8, defender_roll: u8) -> Self {
        // Ties go to the defender.
        let defender_lost = attacker_roll > defender_roll;
        Self {
            round,
            attacker_roll,
            defender_roll,
            attacker_losses: u32::from(!defender_lost),
            defender_losses: u32::from(defender_lost),
        }
    }

    pub fn loser(&self) -> Side {
        if self.defender_losses > 0 {
            Side::Defender
        } else {
            Side::Attacker
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialResult {
    pub winner: Side,
    /// Units left on the winning side.
    pub survivors: u32,
    /// Confrontations resolved before one side was exhausted.
    pub confrontations: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    #[default]
    Off,
    Rounds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleReport {
    pub attackers: u32,
    pub defenders: u32,
    pub result: TrialResult,
    pub rounds: Vec<RoundOutcome>,
}

/// Resolves one battle to exhaustion, calling `on_round` after every confrontation.
///
/// Callers are expected to start both sides at one unit or more. A side that
/// starts at zero has already lost and no dice are drawn.
pub fn fight<D, F>(start: BattleState, dice: &mut D, mut on_round: F) -> TrialResult
where
    D: DiceSource + ?Sized,
    F: FnMut(&RoundOutcome),
{
    let mut state = start;
    let mut round = 0u32;
    let mut attacker_buf = [0u8; ATTACKER_DICE_CAP as usize];
    let mut defender_buf = [0u8; DEFENDER_DICE_CAP as usize];

    while !state.is_over() {
        let (attacker_dice, defender_dice) = state.dice_counts();
        let attacker_rolls = roll_sorted(dice, &mut attacker_buf[..attacker_dice]);
        let defender_rolls = roll_sorted(dice, &mut defender_buf[..defender_dice]);

        for (&attacker_roll, &defender_roll) in attacker_rolls.iter().zip(defender_rolls.iter()) {
            round += 1;
            let outcome = RoundOutcome::resolve(round, attacker_roll, defender_roll);
            state.apply_loss(outcome.loser());
            on_round(&outcome);
            if state.is_over() {
                break;
            }
        }
    }

    let (winner, survivors) = match state.phase() {
        BattlePhase::AttackerWon => (Side::Attacker, state.attackers),
        _ => (Side::Defender, state.defenders),
    };

    TrialResult {
        winner,
        survivors,
        confrontations: round,
    }
}

/// Resolves one battle and optionally records every confrontation.
pub fn simulate_battle<D>(
    attackers: u32,
    defenders: u32,
    dice: &mut D,
    trace_mode: TraceMode,
) -> BattleReport
where
    D: DiceSource + ?Sized,
{
    let mut rounds = Vec::new();
    let result = fight(BattleState::new(attackers, defenders), dice, |outcome| {
        if trace_mode == TraceMode::Rounds {
            rounds.push(*outcome);
        }
    });

    BattleReport {
        attackers,
        defenders,
        result,
        rounds,
    }
}

fn roll_sorted<'a, D>(dice: &mut D, rolls: &'a mut [u8]) -> &'a [u8]
where
    D: DiceSource + ?Sized,
{
    for roll in rolls.iter_mut() {
        *roll = dice.roll_die();
    }
    rolls.sort_unstable_by(|a, b| b.cmp(a));
    rolls
}
