use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::wav::AudioError;

/// Destination for the filtered signal.
pub trait AudioWriter {
    fn write(&mut self, path: &Path, samples: &[f64], sample_rate: u32) -> Result<(), AudioError>;
}

/// Writes mono 16-bit PCM WAV files.
#[derive(Debug, Default, Clone, Copy)]
pub struct WavFileWriter;

impl AudioWriter for WavFileWriter {
    fn write(&mut self, path: &Path, samples: &[f64], sample_rate: u32) -> Result<(), AudioError> {
        let encode_err = |source| AudioError::Encode {
            path: path.to_path_buf(),
            source,
        };

        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).map_err(encode_err)?;
        for &sample in samples {
            writer.write_sample(to_pcm16(sample)).map_err(encode_err)?;
        }
        writer.finalize().map_err(encode_err)?;
        Ok(())
    }
}

/// Quantizes a sample in [-1, 1] to 16-bit PCM, clipping anything outside that range.
pub fn to_pcm16(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16
}
