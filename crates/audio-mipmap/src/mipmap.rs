//! Single-channel pyramid of band-limited copies of one buffer.
//!
//! Level 0 is the input, stored verbatim. Level `L > 0` is the *input*
//! (not level `L - 1`) lowpassed at `nyquist / (L + 1)`, so every level's
//! response is computed independently from the source. All levels have the
//! input's length and stay time-aligned with it.

use rayon::prelude::*;

use crate::config::MipMapConfig;
use crate::error::{BuildError, LookupError};
use crate::fir::FirSpec;
use crate::lookup::LookupParam;

/// Immutable multi-resolution copy of one channel.
#[derive(Clone, Debug, PartialEq)]
pub struct MipMap {
    buffers: Vec<Vec<f64>>,
}

impl MipMap {
    /// Build a pyramid of `depth` levels with the default 200-tap Hamming design.
    pub fn new(buf: Vec<f64>, sample_rate: f64, depth: usize) -> Result<Self, BuildError> {
        Self::with_config(buf, sample_rate, &MipMapConfig::with_depth(depth))
    }

    /// Build a pyramid as described by `config`.
    ///
    /// Fails without producing anything if `config.depth` is zero or any
    /// level's filter cannot be designed.
    pub fn with_config(
        buf: Vec<f64>,
        sample_rate: f64,
        config: &MipMapConfig,
    ) -> Result<Self, BuildError> {
        if config.depth == 0 {
            return Err(BuildError::ZeroDepth);
        }

        let levels = 1..config.depth;
        let filtered: Vec<Vec<f64>> = if config.parallel {
            levels
                .into_par_iter()
                .map(|level| build_level(&buf, sample_rate, level, config))
                .collect::<Result<_, _>>()?
        } else {
            levels
                .map(|level| build_level(&buf, sample_rate, level, config))
                .collect::<Result<_, _>>()?
        };

        let mut buffers = Vec::with_capacity(config.depth);
        buffers.push(buf);
        buffers.extend(filtered);

        Ok(Self { buffers })
    }

    /// Samples per level.
    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels, including level 0.
    pub fn depth(&self) -> usize {
        self.buffers.len()
    }

    /// Raw samples of `level`, or `None` past the deepest level.
    pub fn buffer(&self, level: usize) -> Option<&[f64]> {
        self.buffers.get(level).map(Vec::as_slice)
    }

    /// Interpolated sample at fractional position `pos` of `level`.
    pub fn lookup(&self, pos: f64, level: usize, wrap: bool) -> Result<f64, LookupError> {
        let buf = self.level(level)?;
        let lp = LookupParam::new(pos, self.len(), wrap)?;
        lp.lookup(buf)
    }

    pub(crate) fn level(&self, level: usize) -> Result<&[f64], LookupError> {
        self.buffer(level).ok_or(LookupError::LevelOutOfRange {
            level,
            depth: self.depth(),
        })
    }
}

/// Lowpass the source buffer for one level.
fn build_level(
    source: &[f64],
    sample_rate: f64,
    level: usize,
    config: &MipMapConfig,
) -> Result<Vec<f64>, BuildError> {
    let cutoff_hz = (sample_rate / 2.0) / (level + 1) as f64;
    let filter = FirSpec::new(cutoff_hz, sample_rate, config.taps, config.window)
        .design()
        .map_err(|source| BuildError::FilterDesign { level, source })?;

    tracing::debug!(level, cutoff_hz, taps = filter.taps(), "building mipmap level");
    Ok(filter.apply(source))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::error::FilterDesignError;
    use crate::window::WindowFunction;

    fn sine(freq: f64, rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / rate).sin())
            .collect()
    }

    #[test]
    fn level_zero_is_the_input() {
        let input = sine(440.0, 44_100.0, 1000);
        let mm = MipMap::new(input.clone(), 44_100.0, 3).unwrap();
        assert_eq!(mm.buffer(0).unwrap(), input.as_slice());
        assert_eq!(mm.depth(), 3);
        assert_eq!(mm.len(), 1000);
    }

    #[test]
    fn all_levels_share_the_input_length() {
        let mm = MipMap::new(sine(440.0, 44_100.0, 777), 44_100.0, 5).unwrap();
        for level in 0..5 {
            assert_eq!(mm.buffer(level).unwrap().len(), 777);
        }
        assert!(mm.buffer(5).is_none());
    }

    #[test]
    fn levels_filter_the_original_not_the_previous_level() {
        let rate = 44_100.0;
        let input = sine(3000.0, rate, 2048);
        let mm = MipMap::new(input.clone(), rate, 3).unwrap();

        for level in 1..3 {
            let cutoff = (rate / 2.0) / (level + 1) as f64;
            let expected = FirSpec::new(cutoff, rate, 200, WindowFunction::Hamming)
                .design()
                .unwrap()
                .apply(&input);
            assert_eq!(mm.buffer(level).unwrap(), expected.as_slice());
        }
    }

    #[test]
    fn deeper_levels_remove_more_high_frequency_content() {
        let rate = 44_100.0;
        // 8 kHz sits below level 1's cutoff (11025 Hz) and above level 2's (7350 Hz).
        let mm = MipMap::new(sine(8000.0, rate, 4096), rate, 3).unwrap();
        let peak = |level: usize| {
            mm.buffer(level).unwrap()[512..3584]
                .iter()
                .fold(0.0f64, |m, v| m.max(v.abs()))
        };
        assert!(peak(1) > 0.9);
        assert!(peak(2) < 0.1);
    }

    #[test]
    fn integer_lookups_return_stored_samples() {
        let mm = MipMap::new(sine(1000.0, 44_100.0, 300), 44_100.0, 2).unwrap();
        for level in 0..2 {
            let buf = mm.buffer(level).unwrap();
            for k in [0usize, 1, 150, 299] {
                assert_eq!(mm.lookup(k as f64, level, true).unwrap(), buf[k]);
            }
        }
    }

    #[test]
    fn lookup_interpolates_with_wrap_and_clamp() {
        let mm = MipMap::new(vec![0.0, 1.0, 2.0, 3.0], 44_100.0, 1).unwrap();
        assert_eq!(mm.lookup(3.5, 0, true).unwrap(), 1.5);
        assert_eq!(mm.lookup(3.5, 0, false).unwrap(), 3.0);
    }

    #[test]
    fn lookup_rejects_bad_level_and_position() {
        let mm = MipMap::new(vec![0.0; 16], 44_100.0, 2).unwrap();
        assert_eq!(
            mm.lookup(1.0, 2, false),
            Err(LookupError::LevelOutOfRange { level: 2, depth: 2 })
        );
        assert_eq!(
            mm.lookup(16.0, 0, true),
            Err(LookupError::PositionOutOfRange { pos: 16.0, len: 16 })
        );
    }

    #[test]
    fn zero_depth_is_rejected() {
        assert!(matches!(
            MipMap::new(vec![0.0; 8], 44_100.0, 0),
            Err(BuildError::ZeroDepth)
        ));
    }

    #[test]
    fn invalid_sample_rate_aborts_construction() {
        let err = MipMap::new(vec![0.0; 8], 0.0, 3).unwrap_err();
        match err {
            BuildError::FilterDesign { level, source } => {
                assert_eq!(level, 1);
                assert_eq!(source, FilterDesignError::InvalidSampleRate(0.0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn depth_one_skips_filter_design() {
        // No filtered level means no cutoff to validate.
        let mm = MipMap::new(vec![1.0, 2.0], 0.0, 1).unwrap();
        assert_eq!(mm.depth(), 1);
    }

    #[test]
    fn zero_taps_fail_at_the_first_filtered_level() {
        let config = MipMapConfig {
            depth: 4,
            taps: 0,
            ..MipMapConfig::default()
        };
        assert!(matches!(
            MipMap::with_config(vec![0.0; 32], 48_000.0, &config),
            Err(BuildError::FilterDesign {
                level: 1,
                source: FilterDesignError::ZeroTaps
            })
        ));
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let input = sine(5000.0, 48_000.0, 3000);
        let sequential = MipMapConfig {
            depth: 6,
            ..MipMapConfig::default()
        };
        let parallel = MipMapConfig {
            parallel: true,
            ..sequential
        };
        let a = MipMap::with_config(input.clone(), 48_000.0, &sequential).unwrap();
        let b = MipMap::with_config(input, 48_000.0, &parallel).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mipmap_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MipMap>();
    }
}
