//! Whole-file audio decoding into [`SoundFile`]s.
//!
//! Uses Symphonia to:
//! - probe the input container/codec
//! - decode every packet of the default track into interleaved `f64` samples
//! - deinterleave the result into an in-memory [`SoundFile`]
//!
//! [`load_mipmap`] chains this with [`MipMapSoundFile::with_config`] so a
//! sound can go from disk to a ready pyramid in one call.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use audio_mipmap::{MipMapConfig, MipMapSoundFile, SoundFile, SoundLookup};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CodecParameters, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatReader;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::{formats::FormatOptions, meta::MetadataOptions, probe::Hint};

/// Decode the file at `path` completely.
pub fn decode_file(path: &Path) -> Result<SoundFile> {
    let file = File::open(path).with_context(|| format!("open {:?}", path))?;

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    decode_media_source(Box::new(file), hint).with_context(|| format!("decode {:?}", path))
}

/// Decode an arbitrary Symphonia [`MediaSource`] completely.
pub fn decode_media_source(source: Box<dyn MediaSource>, hint: Hint) -> Result<SoundFile> {
    let mss = MediaSourceStream::new(source, Default::default());

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;

    let format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| anyhow!("No default audio track"))?;

    let channels = track
        .codec_params
        .channels
        .ok_or_else(|| anyhow!("Unknown channels"))?
        .count();

    let rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| anyhow!("Unknown sample rate"))?;

    let track_id = track.id;
    let codec_params: CodecParameters = track.codec_params.clone();
    let samples = decode_track(format, track_id, &codec_params, channels)?;

    let sound = SoundFile::from_interleaved(&samples, channels, rate as f64)?;
    tracing::info!(
        channels,
        frames = sound.num_frames(),
        rate_hz = rate,
        "decoded sound"
    );
    Ok(sound)
}

/// Decode `path` and build a pyramid for every channel.
pub fn load_mipmap(path: &Path, config: &MipMapConfig) -> Result<MipMapSoundFile> {
    let sound = decode_file(path)?;
    MipMapSoundFile::with_config(sound, config)
        .with_context(|| format!("build mipmap for {:?}", path))
}

/// Read every packet of `track_id` and return its samples interleaved.
fn decode_track(
    mut format: Box<dyn FormatReader>,
    track_id: u32,
    codec_params: &CodecParameters,
    channels: usize,
) -> Result<Vec<f64>> {
    let mut decoder =
        symphonia::default::get_codecs().make(codec_params, &DecoderOptions::default())?;

    let capacity = codec_params
        .n_frames
        .and_then(|frames| usize::try_from(frames).ok())
        .map_or(0, |frames| frames.saturating_mul(channels));
    let mut samples = Vec::with_capacity(capacity);

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e).context("read packet"),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(msg)) => {
                tracing::warn!(ts = packet.ts(), "skipping corrupt packet: {msg}");
                continue;
            }
            Err(e) => return Err(e).context("decode packet"),
        };

        let mut sample_buf = SampleBuffer::<f64>::new(decoded.frames() as u64, *decoded.spec());
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    Ok(samples)
}
