//! Geometric concurrency stepping.
//!
//! A range `[start, end]` expands to `start, start*m, start*m^2, ...` with the
//! last step clamped to exactly `end`, so every sweep finishes at its
//! configured ceiling instead of overshooting it.

use crate::error::SweepError;
use std::fmt;
use std::str::FromStr;

/// Multiplier between successive concurrency values. Always at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepSize(u32);

impl StepSize {
    pub const DEFAULT: Self = Self(2);

    pub fn new(multiplier: u32) -> Result<Self, SweepError> {
        if multiplier < 2 {
            return Err(SweepError::InvalidStepSize(multiplier.to_string()));
        }
        Ok(Self(multiplier))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for StepSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for StepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StepSize {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let multiplier =
            s.trim().parse::<u32>().map_err(|_| SweepError::InvalidStepSize(s.to_string()))?;
        Self::new(multiplier)
    }
}

/// Concurrency values for the inclusive range `[start, end]`.
///
/// Returns an empty list when `start > end`.
pub fn concurrency_steps(start: u32, end: u32, step: StepSize) -> Vec<u32> {
    let mut values = Vec::new();
    if start > end {
        return values;
    }

    let mut conc = start;
    loop {
        values.push(conc);
        if conc == end {
            break;
        }
        conc = conc.saturating_mul(step.get()).min(end);
    }
    values
}
