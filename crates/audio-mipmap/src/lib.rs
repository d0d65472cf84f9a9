//! Band-limited multi-resolution sample pyramids ("audio mipmaps").
//!
//! A playback engine reading a sound at speed `s` skips roughly `s` samples
//! per output sample and aliases anything above `nyquist / s`. A
//! [`MipMap`] keeps the original samples plus copies lowpassed at
//! `nyquist / 2`, `nyquist / 3`, ... so the reader can pick a copy that is
//! already band-limited for its speed ([`speed_to_depth`]) and interpolate
//! into it at fractional positions ([`LookupParam`]).
//!
//! Everything here works on in-memory `f64` buffers. Decoding files is left
//! to the caller.

pub mod config;
pub mod error;
pub mod fir;
pub mod lookup;
pub mod mipmap;
pub mod mipmap_sound;
pub mod sound;
pub mod speed;
pub mod window;

pub use config::MipMapConfig;
pub use error::{BuildError, FilterDesignError, LookupError, UnknownWindow};
pub use fir::{FirSpec, LowPassFilter};
pub use lookup::LookupParam;
pub use mipmap::MipMap;
pub use mipmap_sound::MipMapSoundFile;
pub use sound::{SoundFile, SoundLookup};
pub use speed::{clamp_level, speed_to_depth};
pub use window::WindowFunction;
