use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::NamedTempFile;

use crate::wav::AudioError;

/// Transcodes `input_file_path` into a temporary mono 16-bit PCM WAV using FFmpeg.
///
/// The sample rate is left untouched. The returned file is deleted when dropped.
pub fn convert_to_wav(input_file_path: &Path) -> Result<NamedTempFile, AudioError> {
    if !input_file_path.exists() {
        return Err(AudioError::NotFound(input_file_path.to_path_buf()));
    }

    let tmp_file = tempfile::Builder::new()
        .prefix("tmp_")
        .suffix(".wav")
        .tempfile()?;

    let ffmpeg_output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-v")
        .arg("error")
        .arg("-i")
        .arg(input_file_path)
        .arg("-c:a")
        .arg("pcm_s16le")
        .arg("-ac")
        .arg("1")
        .arg(tmp_file.path())
        .output()
        .map_err(|e| AudioError::Transcode {
            path: input_file_path.to_path_buf(),
            message: format!("could not run ffmpeg: {}", e),
        })?;

    if !ffmpeg_output.status.success() {
        return Err(AudioError::Transcode {
            path: input_file_path.to_path_buf(),
            message: format!(
                "ffmpeg exited with {}: {}",
                ffmpeg_output.status,
                String::from_utf8_lossy(&ffmpeg_output.stderr).trim()
            ),
        });
    }

    if fs::metadata(tmp_file.path())?.len() == 0 {
        return Err(AudioError::Transcode {
            path: input_file_path.to_path_buf(),
            message: "ffmpeg did not produce a valid output file".to_string(),
        });
    }

    Ok(tmp_file)
}
