use std::io;
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::RGBColor;
use thiserror::Error;

use crate::plot::LineChart;
use crate::spectral::Spectrum;
use crate::utils;

/// Upper frequency shown on the unfiltered spectrum plot.
pub const ORIGINAL_SPECTRUM_MAX_HZ: f64 = 3000.0;
/// Upper frequency shown on the filtered spectrum plot.
pub const FILTERED_SPECTRUM_MAX_HZ: f64 = 1200.0;

const ORIGINAL_COLOR: RGBColor = RGBColor(0, 0, 255);
// lightcoral
const FILTERED_COLOR: RGBColor = RGBColor(240, 128, 128);
// crimson
const FILTERED_SPECTRUM_COLOR: RGBColor = RGBColor(220, 20, 60);

#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to draw plot: {0}")]
    Draw(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Draw(e.to_string())
    }
}

/// Receives the diagnostic views of a filter run, in pipeline order.
pub trait Visualizer {
    fn original_spectrum(&mut self, spectrum: &Spectrum) -> Result<(), PlotError>;

    fn time_comparison(
        &mut self,
        original: &[f64],
        filtered: &[f64],
        sample_rate: u32,
    ) -> Result<(), PlotError>;

    fn filtered_spectrum(&mut self, spectrum: &Spectrum) -> Result<(), PlotError>;
}

/// Discards every plot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVisualizer;

impl Visualizer for NullVisualizer {
    fn original_spectrum(&mut self, _spectrum: &Spectrum) -> Result<(), PlotError> {
        Ok(())
    }

    fn time_comparison(&mut self, _: &[f64], _: &[f64], _: u32) -> Result<(), PlotError> {
        Ok(())
    }

    fn filtered_spectrum(&mut self, _spectrum: &Spectrum) -> Result<(), PlotError> {
        Ok(())
    }
}

/// Renders each plot to a PNG file inside `dir`.
#[derive(Debug, Clone)]
pub struct PngVisualizer {
    dir: PathBuf,
}

impl PngVisualizer {
    pub const ORIGINAL_SPECTRUM_FILE: &'static str = "original_spectrum.png";
    pub const TIME_DOMAIN_FILE: &'static str = "time_domain.png";
    pub const FILTERED_SPECTRUM_FILE: &'static str = "filtered_spectrum.png";

    /// Creates the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PlotError> {
        let dir = dir.into();
        utils::create_folder(&dir)?;
        Ok(PngVisualizer { dir })
    }
}

impl Visualizer for PngVisualizer {
    fn original_spectrum(&mut self, spectrum: &Spectrum) -> Result<(), PlotError> {
        LineChart::new("Original Frequency Spectrum", "Frequency (Hz)", "Magnitude")
            .x_range(0.0, ORIGINAL_SPECTRUM_MAX_HZ)
            .series("Original", spectrum.positive_half().collect(), ORIGINAL_COLOR)
            .save(&self.dir.join(Self::ORIGINAL_SPECTRUM_FILE))
    }

    fn time_comparison(
        &mut self,
        original: &[f64],
        filtered: &[f64],
        sample_rate: u32,
    ) -> Result<(), PlotError> {
        let (times, shown) = first_second(original.len(), sample_rate);
        let pair = |samples: &[f64]| -> Vec<(f64, f64)> {
            times.iter().copied().zip(samples.iter().copied()).take(shown).collect()
        };
        LineChart::new("Time Domain: Original vs. Filtered Signal", "Time (s)", "Amplitude")
            .size(1400, 500)
            .legend()
            .series("Original", pair(original), ORIGINAL_COLOR)
            .series("Filtered (Low-pass)", pair(filtered), FILTERED_COLOR)
            .save(&self.dir.join(Self::TIME_DOMAIN_FILE))
    }

    fn filtered_spectrum(&mut self, spectrum: &Spectrum) -> Result<(), PlotError> {
        LineChart::new("Filtered Frequency Spectrum (Low-pass)", "Frequency (Hz)", "Magnitude")
            .x_range(0.0, FILTERED_SPECTRUM_MAX_HZ)
            .series("Filtered", spectrum.positive_half().collect(), FILTERED_SPECTRUM_COLOR)
            .save(&self.dir.join(Self::FILTERED_SPECTRUM_FILE))
    }
}

/// Time axis for a clip of `len` samples spread evenly over its duration, along with the
/// number of samples that fall in the first second.
fn first_second(len: usize, sample_rate: u32) -> (Vec<f64>, usize) {
    let duration = if sample_rate == 0 {
        0.0
    } else {
        len as f64 / sample_rate as f64
    };
    (linspace(0.0, duration, len), len.min(sample_rate as usize))
}

/// `num` evenly spaced values from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}
