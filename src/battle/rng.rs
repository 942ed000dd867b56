//! Fast PRNG for battle simulation. Uses SplitMix64 for throughput and good statistical quality.
//! Deterministic: same seed produces the same sequence. Not cryptographically secure.

use crate::battle::engine::DIE_FACES;

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// Source of six-sided die rolls. Every call yields a value in `1..=6`.
pub trait DiceSource {
    fn roll_die(&mut self) -> u8;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Independent stream `stream` derived from `seed`, one per parallel batch.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        let mut mixer = Self::new(seed ^ stream.wrapping_mul(SPLITMIX64_M2));
        Self::new(mixer.next_u64())
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }
}

impl DiceSource for Rng {
    /// Multiply-high reduction of a 64-bit draw onto the six faces.
    #[inline]
    fn roll_die(&mut self) -> u8 {
        let face = (u128::from(self.next_u64()) * u128::from(DIE_FACES)) >> 64;
        face as u8 + 1
    }
}

/// Seed from the operating system, used when no fixed seed is configured.
pub fn entropy_seed() -> Result<u64, getrandom::Error> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes)?;
    Ok(u64::from_le_bytes(bytes))
}

/// Replays a fixed list of faces, wrapping around when exhausted.
/// Lets tests script exact battles.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        let faces = faces.into();
        assert!(!faces.is_empty(), "scripted dice need at least one face");
        assert!(
            faces.iter().all(|face| (1..=DIE_FACES).contains(face)),
            "scripted faces must be in 1..=6"
        );
        Self { faces, cursor: 0 }
    }

    /// Number of faces consumed so far.
    pub fn rolls(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}
