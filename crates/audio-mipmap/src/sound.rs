//! In-memory multi-channel sounds and the lookup surface shared by plain and
//! mipmapped sounds.
//!
//! [`SoundFile`] is what a decoder hands over: deinterleaved channels plus
//! the sample rate. [`SoundLookup`] is what a playback engine reads through,
//! so it can swap a [`SoundFile`] for a
//! [`MipMapSoundFile`](crate::MipMapSoundFile) without other changes.

use crate::error::{BuildError, LookupError};
use crate::lookup::LookupParam;
use crate::speed::{clamp_level, speed_to_depth};

/// Read access to a multi-channel sound, optionally at several resolutions.
///
/// Implementations are immutable after construction, so every method is
/// safe to call concurrently.
pub trait SoundLookup {
    fn num_channels(&self) -> usize;

    /// Sample rate in Hz.
    fn sample_rate(&self) -> f64;

    /// Frames per channel.
    fn num_frames(&self) -> usize;

    /// Length in seconds.
    fn duration(&self) -> f64;

    /// Number of resolution levels.
    fn depth(&self) -> usize;

    /// Raw samples of one channel at one level.
    fn buffer(&self, channel: usize, level: usize) -> Option<&[f64]>;

    /// Interpolated sample of one channel at fractional frame `pos`.
    fn lookup(
        &self,
        pos: f64,
        channel: usize,
        level: usize,
        wrap: bool,
    ) -> Result<f64, LookupError>;

    /// Interpolate every channel at `pos` into `out`, one value per channel.
    ///
    /// `out` must hold exactly [`num_channels`](Self::num_channels) values.
    /// Reusing the same `out` across calls avoids allocating per frame.
    fn lookup_all_into(
        &self,
        pos: f64,
        level: usize,
        wrap: bool,
        out: &mut [f64],
    ) -> Result<(), LookupError>;

    /// Interpolate every channel at `pos` into a freshly allocated vector.
    fn lookup_all(&self, pos: f64, level: usize, wrap: bool) -> Result<Vec<f64>, LookupError> {
        let mut out = vec![0.0; self.num_channels()];
        self.lookup_all_into(pos, level, wrap, &mut out)?;
        Ok(out)
    }

    /// Like [`lookup`](Self::lookup), picking the level from a playback speed.
    fn lookup_with_speed(
        &self,
        pos: f64,
        channel: usize,
        speed: f64,
        wrap: bool,
    ) -> Result<f64, LookupError> {
        self.lookup(pos, channel, self.level_for_speed(speed), wrap)
    }

    /// Like [`lookup_all`](Self::lookup_all), picking the level from a playback speed.
    fn lookup_all_with_speed(
        &self,
        pos: f64,
        speed: f64,
        wrap: bool,
    ) -> Result<Vec<f64>, LookupError> {
        self.lookup_all(pos, self.level_for_speed(speed), wrap)
    }

    /// Level used for `speed`, clamped to the levels this sound has.
    fn level_for_speed(&self, speed: f64) -> usize {
        clamp_level(speed_to_depth(speed), self.depth())
    }
}

/// Deinterleaved in-memory sound with a single resolution.
///
/// Lookups ignore the requested level and always read the original samples.
#[derive(Clone, Debug, PartialEq)]
pub struct SoundFile {
    channels: Vec<Vec<f64>>,
    sample_rate: f64,
}

impl SoundFile {
    /// Wrap already deinterleaved channels. All channels must have the same length.
    pub fn new(channels: Vec<Vec<f64>>, sample_rate: f64) -> Result<Self, BuildError> {
        let expected = channels.first().ok_or(BuildError::NoChannels)?.len();
        if let Some((channel, buf)) = channels
            .iter()
            .enumerate()
            .find(|(_, buf)| buf.len() != expected)
        {
            return Err(BuildError::FrameCountMismatch {
                channel,
                expected,
                actual: buf.len(),
            });
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Split interleaved samples (`frame0[ch0], frame0[ch1], ...`) into channels.
    pub fn from_interleaved(
        samples: &[f64],
        channels: usize,
        sample_rate: f64,
    ) -> Result<Self, BuildError> {
        if channels == 0 {
            return Err(BuildError::NoChannels);
        }
        if samples.len() % channels != 0 {
            return Err(BuildError::PartialFrame {
                samples: samples.len(),
                channels,
            });
        }

        let frames = samples.len() / channels;
        let mut out: Vec<Vec<f64>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();
        for frame in samples.chunks_exact(channels) {
            for (buf, sample) in out.iter_mut().zip(frame) {
                buf.push(*sample);
            }
        }

        Self::new(out, sample_rate)
    }

    /// Give up ownership of the channel buffers.
    pub fn into_channels(self) -> Vec<Vec<f64>> {
        self.channels
    }

    pub fn channel(&self, channel: usize) -> Option<&[f64]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    fn channel_checked(&self, channel: usize) -> Result<&[f64], LookupError> {
        self.channel(channel).ok_or(LookupError::ChannelOutOfRange {
            channel,
            channels: self.channels.len(),
        })
    }
}

impl SoundLookup for SoundFile {
    fn num_channels(&self) -> usize {
        self.channels.len()
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn num_frames(&self) -> usize {
        self.channels[0].len()
    }

    fn duration(&self) -> f64 {
        frames_to_seconds(self.num_frames(), self.sample_rate)
    }

    fn depth(&self) -> usize {
        1
    }

    fn buffer(&self, channel: usize, _level: usize) -> Option<&[f64]> {
        self.channel(channel)
    }

    fn lookup(
        &self,
        pos: f64,
        channel: usize,
        _level: usize,
        wrap: bool,
    ) -> Result<f64, LookupError> {
        let buf = self.channel_checked(channel)?;
        let lp = LookupParam::new(pos, self.num_frames(), wrap)?;
        lp.lookup(buf)
    }

    fn lookup_all_into(
        &self,
        pos: f64,
        _level: usize,
        wrap: bool,
        out: &mut [f64],
    ) -> Result<(), LookupError> {
        check_output_len(out, self.channels.len())?;
        let lp = LookupParam::new(pos, self.num_frames(), wrap)?;
        for (value, buf) in out.iter_mut().zip(&self.channels) {
            *value = lp.lookup(buf)?;
        }
        Ok(())
    }
}

/// Seconds covered by `frames` at `sample_rate`; zero for a non-positive rate.
fn frames_to_seconds(frames: usize, sample_rate: f64) -> f64 {
    if sample_rate > 0.0 {
        frames as f64 / sample_rate
    } else {
        0.0
    }
}

pub(crate) fn check_output_len(out: &[f64], channels: usize) -> Result<(), LookupError> {
    if out.len() != channels {
        return Err(LookupError::OutputLength {
            expected: channels,
            actual: out.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo() -> SoundFile {
        SoundFile::new(
            vec![vec![0.0, 1.0, 2.0, 3.0], vec![0.0, -1.0, -2.0, -3.0]],
            4.0,
        )
        .unwrap()
    }

    #[test]
    fn metadata_from_channels() {
        let sf = stereo();
        assert_eq!(sf.num_channels(), 2);
        assert_eq!(sf.num_frames(), 4);
        assert_eq!(sf.sample_rate(), 4.0);
        assert_eq!(sf.duration(), 1.0);
        assert_eq!(sf.depth(), 1);
    }

    #[test]
    fn rejects_ragged_and_empty_channel_sets() {
        assert!(matches!(
            SoundFile::new(Vec::new(), 44_100.0),
            Err(BuildError::NoChannels)
        ));
        assert!(matches!(
            SoundFile::new(vec![vec![0.0; 4], vec![0.0; 3]], 44_100.0),
            Err(BuildError::FrameCountMismatch {
                channel: 1,
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn deinterleaves() {
        let sf = SoundFile::from_interleaved(&[1.0, -1.0, 2.0, -2.0, 3.0, -3.0], 2, 48_000.0)
            .unwrap();
        assert_eq!(sf.channel(0).unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(sf.channel(1).unwrap(), &[-1.0, -2.0, -3.0]);
        assert_eq!(sf.num_frames(), 3);
    }

    #[test]
    fn interleaved_input_must_be_whole_frames() {
        assert!(matches!(
            SoundFile::from_interleaved(&[1.0, 2.0, 3.0], 2, 48_000.0),
            Err(BuildError::PartialFrame {
                samples: 3,
                channels: 2
            })
        ));
        assert!(matches!(
            SoundFile::from_interleaved(&[], 0, 48_000.0),
            Err(BuildError::NoChannels)
        ));
    }

    #[test]
    fn lookup_all_matches_per_channel_lookup() {
        let sf = stereo();
        for pos in [0.0, 0.5, 2.25, 3.5] {
            for wrap in [true, false] {
                let all = sf.lookup_all(pos, 0, wrap).unwrap();
                assert_eq!(all.len(), 2);
                for (channel, value) in all.iter().enumerate() {
                    assert_eq!(*value, sf.lookup(pos, channel, 0, wrap).unwrap());
                }
            }
        }
        assert_eq!(sf.lookup_all(3.5, 0, true).unwrap(), vec![1.5, -1.5]);
    }

    #[test]
    fn lookup_all_into_checks_output_length() {
        let sf = stereo();
        let mut out = [0.0; 3];
        assert_eq!(
            sf.lookup_all_into(1.0, 0, false, &mut out),
            Err(LookupError::OutputLength {
                expected: 2,
                actual: 3
            })
        );
        let mut out = [0.0; 2];
        sf.lookup_all_into(1.5, 0, false, &mut out).unwrap();
        assert_eq!(out, [1.5, -1.5]);
    }

    #[test]
    fn level_is_ignored_for_flat_sounds() {
        let sf = stereo();
        assert_eq!(sf.lookup(1.0, 0, 5, false).unwrap(), 1.0);
        assert_eq!(sf.buffer(1, 9).unwrap(), sf.channel(1).unwrap());
        assert_eq!(sf.lookup_with_speed(2.0, 0, 8.0, false).unwrap(), 2.0);
        assert_eq!(sf.level_for_speed(8.0), 0);
    }

    #[test]
    fn unknown_channel_is_an_error() {
        let sf = stereo();
        assert_eq!(
            sf.lookup(0.0, 2, 0, true),
            Err(LookupError::ChannelOutOfRange {
                channel: 2,
                channels: 2
            })
        );
    }

    #[test]
    fn into_channels_returns_buffers_verbatim() {
        let channels = vec![vec![0.1, 0.2], vec![0.3, 0.4]];
        let sf = SoundFile::new(channels.clone(), 8000.0).unwrap();
        assert_eq!(sf.into_channels(), channels);
    }
}
