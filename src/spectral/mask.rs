use num_complex::Complex;

use crate::spectral::spectrum::Spectrum;

/// Brick-wall low-pass: zeroes every bin whose absolute frequency exceeds `cutoff_hz`.
///
/// Bins at or below the cutoff are copied untouched. A negative cutoff clears every bin;
/// a cutoff of zero keeps only the 0 Hz bin.
pub fn low_pass(spectrum: &Spectrum, cutoff_hz: f64) -> Spectrum {
    let bins = spectrum
        .iter()
        .map(|(freq, bin)| {
            if freq.abs() > cutoff_hz {
                Complex::new(0.0, 0.0)
            } else {
                bin
            }
        })
        .collect();
    Spectrum::new(bins, spectrum.freqs().to_vec(), spectrum.sample_rate())
}

/// Number of bins [`low_pass`] clears for `cutoff_hz`.
pub fn masked_bins(spectrum: &Spectrum, cutoff_hz: f64) -> usize {
    spectrum
        .freqs()
        .iter()
        .filter(|freq| freq.abs() > cutoff_hz)
        .count()
}
