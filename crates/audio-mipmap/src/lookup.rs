//! Fractional-position linear interpolation.

use crate::error::LookupError;

/// Indices and blend factor for reading a buffer at a fractional position.
///
/// Built fresh for every lookup. `index2` is the sample after `index1`,
/// either wrapped to the start of the buffer or clamped to its last sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookupParam {
    index1: usize,
    index2: usize,
    fraction: f64,
}

impl LookupParam {
    /// Resolve `pos` against a buffer of `len` samples.
    ///
    /// `pos` must be finite and lie in `[0, len)`.
    pub fn new(pos: f64, len: usize, wrap: bool) -> Result<Self, LookupError> {
        if !(pos >= 0.0 && pos < len as f64) {
            return Err(LookupError::PositionOutOfRange { pos, len });
        }

        let index1 = (pos.floor() as usize).min(len - 1);
        let next = index1 + 1;
        let index2 = if wrap { next % len } else { next.min(len - 1) };

        Ok(Self {
            index1,
            index2,
            fraction: pos - index1 as f64,
        })
    }

    pub fn index1(&self) -> usize {
        self.index1
    }

    pub fn index2(&self) -> usize {
        self.index2
    }

    /// Distance past `index1`, in `[0, 1)`.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Interpolate between `buf[index1]` and `buf[index2]`.
    ///
    /// Fails if `buf` is shorter than the length this param was built for.
    #[inline]
    pub fn lookup(&self, buf: &[f64]) -> Result<f64, LookupError> {
        let sample = |index: usize| {
            buf.get(index).copied().ok_or(LookupError::BufferTooShort {
                index,
                len: buf.len(),
            })
        };
        let s1 = sample(self.index1)?;
        let s2 = sample(self.index2)?;
        Ok(s1 + self.fraction * (s2 - s1))
    }
}
