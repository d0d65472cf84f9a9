//! Error types for filter design, pyramid construction and lookups.

use thiserror::Error;

use crate::window::WindowFunction;

/// Errors raised while designing a windowed-sinc kernel.
///
/// Filter design is a pure function of its inputs, so none of these are
/// transient: retrying with the same parameters always fails the same way.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FilterDesignError {
    #[error("cutoff {cutoff_hz} Hz must lie in (0, {nyquist_hz}) Hz")]
    InvalidCutoff { cutoff_hz: f64, nyquist_hz: f64 },

    #[error("invalid sampling frequency: {0} Hz")]
    InvalidSampleRate(f64),

    #[error("tap count must be positive")]
    ZeroTaps,

    #[error("window size {0} is too small (need at least 2)")]
    WindowTooShort(usize),

    #[error("{window} kernels need at least {min} taps, got {taps}")]
    TooFewTaps {
        taps: usize,
        min: usize,
        window: WindowFunction,
    },

    #[error("kernel coefficients sum to {0}, cannot normalize")]
    DegenerateKernel(f64),
}

/// Window name that does not match any [`WindowFunction`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown window function: {0:?}")]
pub struct UnknownWindow(pub String);

/// Errors raised while building a [`MipMap`](crate::MipMap) or
/// [`MipMapSoundFile`](crate::MipMapSoundFile).
///
/// Construction is all-or-nothing: when one of these is returned no pyramid
/// value exists.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("mipmap depth must be at least 1")]
    ZeroDepth,

    #[error("filter design failed at level {level}: {source}")]
    FilterDesign {
        level: usize,
        #[source]
        source: FilterDesignError,
    },

    #[error("sound has no channels")]
    NoChannels,

    #[error("channel {channel} has {actual} frames, expected {expected}")]
    FrameCountMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("interleaved buffer of {samples} samples is not a whole number of {channels}-channel frames")]
    PartialFrame { samples: usize, channels: usize },

    #[error("building channel {channel} failed: {source}")]
    Channel {
        channel: usize,
        #[source]
        source: Box<BuildError>,
    },
}

/// Out-of-range queries against a built pyramid or sound.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LookupError {
    #[error("position {pos} is outside [0, {len})")]
    PositionOutOfRange { pos: f64, len: usize },

    #[error("level {level} is outside [0, {depth})")]
    LevelOutOfRange { level: usize, depth: usize },

    #[error("channel {channel} is outside [0, {channels})")]
    ChannelOutOfRange { channel: usize, channels: usize },

    #[error("output buffer holds {actual} values, expected {expected}")]
    OutputLength { expected: usize, actual: usize },

    #[error("buffer of {len} samples has no index {index}")]
    BufferTooShort { index: usize, len: usize },
}
