use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use serde::Serialize;
use slog::{debug, info, o, Logger};

use crate::config::PipelineConfig;
use crate::plot::Visualizer;
use crate::spectral::{self, SpectralError, Spectrum};
use crate::utils;
use crate::wav::{self, AudioClip, AudioWriter};

/// Intermediate and final products of one low-pass pass.
#[derive(Debug, Clone)]
pub struct FilterOutput {
    pub spectrum: Spectrum,
    pub filtered_spectrum: Spectrum,
    pub filtered: Vec<f64>,
}

/// Transform, mask and inverse-transform `samples`. The result has the same length as the input.
pub fn filter_samples(
    samples: &[f64],
    sample_rate: u32,
    cutoff_hz: f64,
) -> Result<FilterOutput, SpectralError> {
    let spectrum = spectral::forward(samples, sample_rate)?;
    let filtered_spectrum = spectral::low_pass(&spectrum, cutoff_hz);
    let filtered = spectral::inverse(&filtered_spectrum)?;
    Ok(FilterOutput {
        spectrum,
        filtered_spectrum,
        filtered,
    })
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub sample_rate: u32,
    pub samples: usize,
    pub duration_secs: f64,
    pub cutoff_hz: f64,
    pub masked_bins: usize,
    pub elapsed: Duration,
}

pub struct Pipeline {
    config: PipelineConfig,
    logger: Logger,
    visualizer: Box<dyn Visualizer>,
    writer: Box<dyn AudioWriter>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        logger: &Logger,
        visualizer: Box<dyn Visualizer>,
        writer: Box<dyn AudioWriter>,
    ) -> Self {
        let logger = logger.new(o!("input" => config.input_path.display().to_string()));
        Pipeline {
            config,
            logger,
            visualizer,
            writer,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Loads the configured input and runs it through [`Pipeline::process`].
    pub fn run(&mut self) -> anyhow::Result<RunReport> {
        let input = &self.config.input_path;
        let clip = wav::load_audio(input)
            .with_context(|| format!("failed to load {}", input.display()))?;
        info!(
            self.logger,
            "Loaded {} | Duration: {:.2}s | Sample Rate: {}Hz",
            utils::display_name(input),
            clip.duration(),
            clip.sample_rate
        );
        self.process(&clip)
    }

    /// Filters an already loaded clip, renders the plots and writes the result.
    ///
    /// Nothing is written if filtering or plotting fails.
    pub fn process(&mut self, clip: &AudioClip) -> anyhow::Result<RunReport> {
        let start = Instant::now();
        let cutoff_hz = self.config.cutoff_hz;

        let output = filter_samples(&clip.samples, clip.sample_rate, cutoff_hz)
            .context("failed to filter samples")?;
        let masked_bins = spectral::masked_bins(&output.spectrum, cutoff_hz);
        debug!(self.logger, "applied low-pass mask";
            "bins" => output.spectrum.len(),
            "masked_bins" => masked_bins,
            "cutoff_hz" => cutoff_hz);

        self.visualizer
            .original_spectrum(&output.spectrum)
            .context("failed to plot original spectrum")?;
        self.visualizer
            .time_comparison(&clip.samples, &output.filtered, clip.sample_rate)
            .context("failed to plot time domain comparison")?;
        self.visualizer
            .filtered_spectrum(&output.filtered_spectrum)
            .context("failed to plot filtered spectrum")?;

        let output_path = &self.config.output_path;
        self.writer
            .write(output_path, &output.filtered, clip.sample_rate)
            .with_context(|| format!("failed to save {}", output_path.display()))?;
        info!(
            self.logger,
            "Filtered audio saved as '{}'",
            output_path.display()
        );

        Ok(RunReport {
            output_path: output_path.clone(),
            sample_rate: clip.sample_rate,
            samples: output.filtered.len(),
            duration_secs: clip.duration(),
            cutoff_hz,
            masked_bins,
            elapsed: start.elapsed(),
        })
    }
}
