// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine - Per-Sample Seed Derivation

use serde::{Deserialize, Serialize};

use crate::types::{Profile, Scenario};

/// Width of the additive seed band reserved for each scenario.
pub const SCENARIO_SEED_BAND: i64 = 1000;

/// How a per-sample seed is derived from the run seed.
///
/// Both strategies are pure functions of (run seed, profile, scenario,
/// sample index), so results never depend on execution order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// `seed + profile.seed_offset + scenario.seed_offset * 1000 + i`.
    ///
    /// Streams of neighbouring scenarios overlap once `i` reaches the band
    /// width, i.e. at 1000 iterations or more.
    #[default]
    Additive,
    /// blake3 over (seed, profile name, scenario id, i). Collision resistant
    /// at any iteration count, but produces different numbers than `Additive`.
    Hashed,
}

impl SeedStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Additive => "additive",
            Self::Hashed => "hashed",
        }
    }

    /// Seed for sample `i` of `profile` under `scenario`.
    pub fn sample_seed(&self, seed: u64, profile: &Profile, scenario: &Scenario, i: u64) -> u64 {
        match self {
            Self::Additive => seed
                .wrapping_add_signed(profile.seed_offset)
                .wrapping_add_signed(scenario.seed_offset.wrapping_mul(SCENARIO_SEED_BAND))
                .wrapping_add(i),
            Self::Hashed => hashed_seed(seed, &profile.name, &scenario.scenario_id, i),
        }
    }

    /// Whether `iterations` samples stay inside one scenario's seed band.
    pub fn bands_overlap(&self, iterations: usize) -> bool {
        matches!(self, Self::Additive) && iterations as u64 >= SCENARIO_SEED_BAND as u64
    }
}

impl std::fmt::Display for SeedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeedStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "additive" => Ok(Self::Additive),
            "hashed" => Ok(Self::Hashed),
            other => Err(format!("unknown seed strategy '{other}' (expected additive|hashed)")),
        }
    }
}

// Strings are length-prefixed so ("ab", "c") and ("a", "bc") hash apart.
fn hashed_seed(seed: u64, profile: &str, scenario: &str, i: u64) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed.to_le_bytes());
    hasher.update(&(profile.len() as u64).to_le_bytes());
    hasher.update(profile.as_bytes());
    hasher.update(&(scenario.len() as u64).to_le_bytes());
    hasher.update(scenario.as_bytes());
    hasher.update(&i.to_le_bytes());
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}
