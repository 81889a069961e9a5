use std::fmt;
use std::time::Duration;

use convca_core::prelude::*;

/// Which built-in rule to simulate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum RuleKind {
    /// Conway's Game of Life.
    Life,
    /// Continuous Lenia with a single-ring kernel.
    Lenia,
}
impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Life => write!(f, "life"),
            RuleKind::Lenia => write!(f, "lenia"),
        }
    }
}

#[derive(Debug)]
pub struct SimConfig {
    pub rule: RuleKind,
    pub lenia: LeniaParams,
    pub size: Size,
    /// Number of generations to simulate before stopping, or 0 to run until
    /// interrupted.
    pub generations: usize,
    pub interval: Duration,
    pub seed: Option<u64>,
}
impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rule: RuleKind::Life,
            lenia: LeniaParams::default(),
            size: (64, 32),
            generations: 0,
            interval: Duration::from_millis(100),
            seed: None,
        }
    }
}
impl SimConfig {
    /// Returns whether the simulation should stop once it reaches `generation`.
    pub fn is_limit(&self, generation: usize) -> bool {
        self.generations != 0 && generation >= self.generations
    }
}
