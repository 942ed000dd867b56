pub mod engine;
pub mod rng;

pub use engine::{
    fight, simulate_battle, BattlePhase, BattleReport, BattleState, RoundOutcome, Side,
    TraceMode, TrialResult, ATTACKER_DICE_CAP, DEFENDER_DICE_CAP, DIE_FACES,
};
pub use rng::{entropy_seed, DiceSource, Rng, ScriptedDice};
