//! Windowed-sinc FIR lowpass design and length-preserving convolution.
//!
//! A [`FirSpec`] describes the filter (cutoff, sampling rate, taps, window).
//! [`FirSpec::design`] turns it into a [`LowPassFilter`] whose kernel sums to
//! 1.0, and [`LowPassFilter::apply`] convolves a buffer with it. The output
//! has the same length as the input and stays time-aligned with it: the
//! kernel is centered on each output sample and samples outside the input
//! are treated as zero.

use std::f64::consts::PI;

use crate::error::FilterDesignError;
use crate::window::WindowFunction;

/// Parameters of a windowed-sinc lowpass filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FirSpec {
    /// Cutoff frequency in Hz. Must satisfy `0 < cutoff_hz < sample_rate_hz / 2`.
    pub cutoff_hz: f64,
    /// Sampling frequency in Hz.
    pub sample_rate_hz: f64,
    /// Number of kernel coefficients.
    ///
    /// Odd counts center exactly on a sample; even counts sit half a sample
    /// late.
    pub taps: usize,
    /// Taper applied to the ideal sinc response.
    pub window: WindowFunction,
}

impl FirSpec {
    pub fn new(cutoff_hz: f64, sample_rate_hz: f64, taps: usize, window: WindowFunction) -> Self {
        Self {
            cutoff_hz,
            sample_rate_hz,
            taps,
            window,
        }
    }

    /// Check the parameters without computing anything.
    pub fn validate(&self) -> Result<(), FilterDesignError> {
        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            return Err(FilterDesignError::InvalidSampleRate(self.sample_rate_hz));
        }
        let nyquist_hz = self.sample_rate_hz / 2.0;
        if !self.cutoff_hz.is_finite() || self.cutoff_hz <= 0.0 || self.cutoff_hz >= nyquist_hz {
            return Err(FilterDesignError::InvalidCutoff {
                cutoff_hz: self.cutoff_hz,
                nyquist_hz,
            });
        }
        if self.taps == 0 {
            return Err(FilterDesignError::ZeroTaps);
        }
        let min = self.window.min_taps();
        if self.taps < min {
            return Err(FilterDesignError::TooFewTaps {
                taps: self.taps,
                min,
                window: self.window,
            });
        }
        Ok(())
    }

    /// Cutoff as a fraction of the sampling rate, in `(0, 0.5)`.
    pub fn normalized_cutoff(&self) -> f64 {
        self.cutoff_hz / self.sample_rate_hz
    }

    /// Compute the unity-gain lowpass kernel.
    pub fn lowpass_kernel(&self) -> Result<Vec<f64>, FilterDesignError> {
        self.validate()?;

        // A lone tap normalizes to the identity whatever the window says.
        if self.taps == 1 {
            return Ok(vec![1.0]);
        }

        let fc = self.normalized_cutoff();
        let center = (self.taps - 1) as f64 / 2.0;
        let window = self.window.generate(self.taps)?;

        let mut kernel: Vec<f64> = window
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let x = i as f64 - center;
                let sinc = if x == 0.0 {
                    2.0 * fc
                } else {
                    (2.0 * PI * fc * x).sin() / (PI * x)
                };
                sinc * w
            })
            .collect();

        let sum: f64 = kernel.iter().sum();
        if !sum.is_finite() || sum <= 0.0 {
            return Err(FilterDesignError::DegenerateKernel(sum));
        }
        for c in &mut kernel {
            *c /= sum;
        }
        Ok(kernel)
    }

    /// Design the filter described by this spec.
    pub fn design(&self) -> Result<LowPassFilter, FilterDesignError> {
        let kernel = self.lowpass_kernel()?;
        Ok(LowPassFilter { kernel })
    }
}

/// A designed lowpass kernel, ready to be applied to sample buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct LowPassFilter {
    kernel: Vec<f64>,
}

impl LowPassFilter {
    pub fn kernel(&self) -> &[f64] {
        &self.kernel
    }

    pub fn taps(&self) -> usize {
        self.kernel.len()
    }

    /// Convolve `input` with the kernel, returning a buffer of the same length.
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        let n = input.len();
        let taps = self.kernel.len();
        let center = (taps - 1) / 2;

        (0..n)
            .map(|i| {
                // Only taps that land inside the input contribute.
                let first = (i + center + 1).saturating_sub(n);
                let last = (i + center).min(taps - 1);
                (first..=last)
                    .map(|j| self.kernel[j] * input[i + center - j])
                    .sum()
            })
            .collect()
    }
}
