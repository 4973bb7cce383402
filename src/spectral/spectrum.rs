use num_complex::Complex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SpectralError {
    #[error("cannot transform an empty signal")]
    EmptySignal,
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("bin count ({bins}) does not match label count ({freqs})")]
    LengthMismatch { bins: usize, freqs: usize },
}

/// Frequency-domain view of a signal: complex bins paired with their frequency labels (Hz).
///
/// Bins and labels are stored side by side so that any operation that drops or zeroes
/// a bin sees the label it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    bins: Vec<Complex<f64>>,
    freqs: Vec<f64>,
    sample_rate: u32,
}

impl Spectrum {
    pub(crate) fn new(bins: Vec<Complex<f64>>, freqs: Vec<f64>, sample_rate: u32) -> Self {
        debug_assert_eq!(bins.len(), freqs.len());
        Spectrum { bins, freqs, sample_rate }
    }

    /// Builds a spectrum from hand-written bins and labels.
    #[cfg(test)]
    pub(crate) fn from_parts(
        bins: Vec<Complex<f64>>,
        freqs: Vec<f64>,
        sample_rate: u32,
    ) -> Result<Self, SpectralError> {
        if bins.len() != freqs.len() {
            return Err(SpectralError::LengthMismatch {
                bins: bins.len(),
                freqs: freqs.len(),
            });
        }
        if sample_rate == 0 {
            return Err(SpectralError::InvalidSampleRate);
        }
        Ok(Spectrum::new(bins, freqs, sample_rate))
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    pub fn freqs(&self) -> &[f64] {
        &self.freqs
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Iterates `(label, bin)` pairs in bin order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, Complex<f64>)> + '_ {
        self.freqs.iter().copied().zip(self.bins.iter().copied())
    }

    /// `(frequency, magnitude)` for the first `len / 2` bins, i.e. the non-negative
    /// frequencies used for plotting.
    pub fn positive_half(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.iter().take(self.len() / 2).map(|(freq, bin)| (freq, bin.norm()))
    }
}
