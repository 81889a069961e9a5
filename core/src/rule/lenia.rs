use log::debug;
use rand::Rng;
use std::fmt;

use super::{CellRules, Color, RuleError, RuleResult};
use crate::kernel::Kernel;
use crate::math::{exponential_shell, gaussian_growth};

/// Parameters for a [`Lenia`] rule.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LeniaParams {
    /// Kernel radius, in cells.
    pub radius: usize,
    /// Convolution value at which growth is maximal.
    pub mu: f64,
    /// Width of the growth bump.
    pub sigma: f64,
    /// Time step; growth is scaled by this before being added to a cell.
    pub dt: f64,
}
impl Default for LeniaParams {
    /// Orbium parameters.
    fn default() -> Self {
        Self {
            radius: 13,
            mu: 0.15,
            sigma: 0.015,
            dt: 0.1,
        }
    }
}

/// Continuous-valued automaton whose cells are in the range `[0, 1]`.
///
/// The kernel is a single smooth ring normalized to sum to 1, growth is a
/// Gaussian bump around `mu` scaled by `dt`, and the state mapping clamps back
/// onto `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Lenia {
    params: LeniaParams,
    kernel: Kernel,
}
impl Lenia {
    /// Constructs a Lenia rule, building its kernel.
    pub fn new(params: LeniaParams) -> RuleResult<Self> {
        if params.radius < 2 {
            return Err(invalid("radius", "must be at least 2"));
        }
        if !(params.sigma > 0.0 && params.sigma.is_finite()) {
            return Err(invalid("sigma", "must be positive"));
        }
        if !params.mu.is_finite() {
            return Err(invalid("mu", "must be finite"));
        }
        if !(params.dt > 0.0 && params.dt <= 1.0) {
            return Err(invalid("dt", "must be in the range (0, 1]"));
        }
        let kernel = Kernel::ring(params.radius, exponential_shell)?;
        debug!("Constructed Lenia rule {:?}", params);
        Ok(Self { params, kernel })
    }

    /// Returns the rule's parameters.
    pub fn params(&self) -> &LeniaParams {
        &self.params
    }
}
impl fmt::Display for Lenia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        write!(
            f,
            "Lenia(R={}, mu={}, sigma={}, dt={})",
            p.radius, p.mu, p.sigma, p.dt,
        )
    }
}

fn invalid(name: &'static str, reason: &str) -> RuleError {
    RuleError::InvalidParameter {
        name,
        reason: reason.to_owned(),
    }
}

impl CellRules for Lenia {
    type Cell = f64;

    fn empty(&self) -> f64 {
        0.0
    }
    fn full(&self) -> f64 {
        1.0
    }

    fn mult(&self, cell: f64, weight: f64) -> f64 {
        cell * weight
    }
    fn add(&self, cell: f64, delta: f64) -> f64 {
        cell + delta
    }

    fn kernel(&self) -> &Kernel {
        &self.kernel
    }
    fn growth_mapping(&self, conv: f64) -> f64 {
        self.params.dt * gaussian_growth(conv, self.params.mu, self.params.sigma)
    }
    fn state_mapping(&self, n: f64) -> f64 {
        n.max(0.0).min(1.0)
    }

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(0.0..1.0)
    }
    fn value_to_color(&self, cell: f64) -> Color {
        colorous::VIRIDIS.eval_continuous(cell)
    }
}
