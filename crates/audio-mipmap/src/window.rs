//! Symmetric taper windows used to shape FIR kernels.
//!
//! Every window maps a size `L` to `L` weights with `w[i] == w[L - 1 - i]`.
//! Sizes below 2 are rejected because the formulas divide by `L - 1`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{FilterDesignError, UnknownWindow};

/// Closed set of window shapes available to the filter designer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WindowFunction {
    /// Classic Blackman (alpha = 0.16).
    Blackman,
    /// Hamming (0.54 / 0.46). Used for every mipmap level by default.
    #[default]
    Hamming,
    /// 4-term Nuttall with continuous first derivative.
    Nuttall,
}

impl WindowFunction {
    pub const ALL: [WindowFunction; 3] = [
        WindowFunction::Blackman,
        WindowFunction::Hamming,
        WindowFunction::Nuttall,
    ];

    /// Generate `size` window weights.
    pub fn generate(self, size: usize) -> Result<Vec<f64>, FilterDesignError> {
        if size < 2 {
            return Err(FilterDesignError::WindowTooShort(size));
        }

        let span = (size - 1) as f64;
        let weights = (0..size)
            .map(|i| {
                let phase = 2.0 * PI * i as f64 / span;
                self.weight(phase)
            })
            .collect();
        Ok(weights)
    }

    /// Weight at `phase = 2*pi*i / (L - 1)`.
    fn weight(self, phase: f64) -> f64 {
        match self {
            WindowFunction::Blackman => {
                const ALPHA: f64 = 0.16;
                let a0 = (1.0 - ALPHA) / 2.0;
                let a1 = 0.5;
                let a2 = ALPHA / 2.0;
                a0 - a1 * phase.cos() + a2 * (2.0 * phase).cos()
            }
            WindowFunction::Hamming => 0.54 - 0.46 * phase.cos(),
            WindowFunction::Nuttall => {
                0.355768 - 0.487396 * phase.cos() + 0.144232 * (2.0 * phase).cos()
                    - 0.012604 * (3.0 * phase).cos()
            }
        }
    }

    /// Smallest kernel length whose coefficients do not all vanish.
    ///
    /// Blackman and Nuttall are zero at both ends, so a 2-tap kernel made
    /// from them sums to zero. A single tap skips the window altogether.
    pub fn min_taps(self) -> usize {
        match self {
            WindowFunction::Hamming => 1,
            WindowFunction::Blackman | WindowFunction::Nuttall => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WindowFunction::Blackman => "blackman",
            WindowFunction::Hamming => "hamming",
            WindowFunction::Nuttall => "nuttall",
        }
    }
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowFunction {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownWindow(s.to_string()))
    }
}
