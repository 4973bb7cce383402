use std::fmt::Display;
use std::path::Path;

use crate::wav::{convert_to_wav, AudioClip, AudioError};

/// Extensions audrey can decode in-process; anything else goes through FFmpeg.
const NATIVE_FORMATS: &[&str] = &["wav", "flac", "ogg", "caf"];

/// Loads an audio file as a mono clip at its native sample rate.
///
/// Multi-channel audio is averaged down to one channel.
pub fn load_audio(path: &Path) -> Result<AudioClip, AudioError> {
    if !path.exists() {
        return Err(AudioError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if NATIVE_FORMATS.contains(&ext.as_str()) {
        return read_clip(path, path);
    }

    let transcoded = convert_to_wav(path)?;
    read_clip(transcoded.path(), path)
}

/// Decodes `path`; `origin` is the file the user asked for and is used in errors.
fn read_clip(path: &Path, origin: &Path) -> Result<AudioClip, AudioError> {
    let mut reader = audrey::open(path).map_err(|e| decode_error(origin, e))?;
    let description = reader.description();
    let channels = description.channel_count() as usize;
    let sample_rate = description.sample_rate();

    let interleaved = reader
        .samples::<f64>()
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| decode_error(origin, e))?;

    let samples = downmix(&interleaved, channels);
    if samples.is_empty() {
        return Err(AudioError::Empty(origin.to_path_buf()));
    }
    Ok(AudioClip::new(samples, sample_rate))
}

fn decode_error(origin: &Path, err: impl Display) -> AudioError {
    AudioError::Decode {
        path: origin.to_path_buf(),
        message: err.to_string(),
    }
}

/// Averages interleaved frames of `channels` samples into one mono sample each.
/// A trailing partial frame is dropped.
pub fn downmix(interleaved: &[f64], channels: usize) -> Vec<f64> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}
