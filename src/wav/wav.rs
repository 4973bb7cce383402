use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Mono audio at its native sample rate, samples scaled to [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        AudioClip { samples, sample_rate }
    }

    /// Length of the clip in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("input file does not exist: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("failed to convert {path} to WAV: {message}")]
    Transcode { path: PathBuf, message: String },
    #[error("{0} contains no audio frames")]
    Empty(PathBuf),
    #[error("failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
