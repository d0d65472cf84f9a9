//! Multi-channel pyramid: one [`MipMap`] per channel with shared metadata.

use rayon::prelude::*;

use crate::config::MipMapConfig;
use crate::error::{BuildError, LookupError};
use crate::lookup::LookupParam;
use crate::mipmap::MipMap;
use crate::sound::{SoundFile, SoundLookup, check_output_len};

/// A sound whose every channel is available at `depth` band-limited levels.
///
/// Built once from a decoded [`SoundFile`]; immutable afterwards. Every
/// channel has the same frame count and depth.
#[derive(Clone, Debug, PartialEq)]
pub struct MipMapSoundFile {
    channels: Vec<MipMap>,
    sample_rate: f64,
    num_frames: usize,
    duration: f64,
    depth: usize,
}

impl MipMapSoundFile {
    /// Build `depth` levels per channel with the default filter design.
    pub fn new(source: SoundFile, depth: usize) -> Result<Self, BuildError> {
        Self::with_config(source, &MipMapConfig::with_depth(depth))
    }

    /// Build every channel as described by `config`.
    ///
    /// The first channel that fails aborts the whole build.
    pub fn with_config(source: SoundFile, config: &MipMapConfig) -> Result<Self, BuildError> {
        let sample_rate = source.sample_rate();
        let num_frames = source.num_frames();
        let duration = source.duration();

        let build = |(channel, buf): (usize, Vec<f64>)| {
            MipMap::with_config(buf, sample_rate, config).map_err(|e| BuildError::Channel {
                channel,
                source: Box::new(e),
            })
        };

        let buffers = source.into_channels();
        let channels: Vec<MipMap> = if config.parallel {
            buffers
                .into_par_iter()
                .enumerate()
                .map(build)
                .collect::<Result<_, _>>()?
        } else {
            buffers
                .into_iter()
                .enumerate()
                .map(build)
                .collect::<Result<_, _>>()?
        };

        tracing::info!(
            channels = channels.len(),
            frames = num_frames,
            depth = config.depth,
            sample_rate,
            window = %config.window,
            taps = config.taps,
            "mipmap sound file built"
        );

        Ok(Self {
            channels,
            sample_rate,
            num_frames,
            duration,
            depth: config.depth,
        })
    }

    /// Pyramid of one channel.
    pub fn channel(&self, channel: usize) -> Option<&MipMap> {
        self.channels.get(channel)
    }

    fn channel_checked(&self, channel: usize) -> Result<&MipMap, LookupError> {
        self.channel(channel).ok_or(LookupError::ChannelOutOfRange {
            channel,
            channels: self.channels.len(),
        })
    }
}

impl SoundLookup for MipMapSoundFile {
    fn num_channels(&self) -> usize {
        self.channels.len()
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn num_frames(&self) -> usize {
        self.num_frames
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn buffer(&self, channel: usize, level: usize) -> Option<&[f64]> {
        self.channel(channel)?.buffer(level)
    }

    fn lookup(&self, pos: f64, channel: usize, level: usize, wrap: bool) -> Result<f64, LookupError> {
        self.channel_checked(channel)?.lookup(pos, level, wrap)
    }

    fn lookup_all_into(
        &self,
        pos: f64,
        level: usize,
        wrap: bool,
        out: &mut [f64],
    ) -> Result<(), LookupError> {
        check_output_len(out, self.channels.len())?;
        if level >= self.depth {
            return Err(LookupError::LevelOutOfRange {
                level,
                depth: self.depth,
            });
        }

        let lp = LookupParam::new(pos, self.num_frames, wrap)?;
        for (value, mm) in out.iter_mut().zip(&self.channels) {
            *value = lp.lookup(mm.level(level)?)?;
        }
        Ok(())
    }
}
