use num_complex::Complex;
use rustfft::FftPlanner;

use crate::spectral::spectrum::{SpectralError, Spectrum};

/// Frequency label of every DFT bin for a signal of `n` samples spaced `spacing` seconds apart.
///
/// Non-negative frequencies come first, followed by the negative ones in ascending order,
/// e.g. `n = 4, spacing = 0.25` gives `[0, 1, -2, -1]`.
pub fn fft_frequencies(n: usize, spacing: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let val = 1.0 / (n as f64 * spacing);
    let positive = n.div_ceil(2);
    let mut result = Vec::with_capacity(n);
    for i in 0..positive {
        result.push(i as f64 * val);
    }
    for i in -((n / 2) as i64)..0 {
        result.push(i as f64 * val);
    }
    result
}

/// Computes the discrete Fourier transform of real samples together with the bin labels.
pub fn forward(samples: &[f64], sample_rate: u32) -> Result<Spectrum, SpectralError> {
    if samples.is_empty() {
        return Err(SpectralError::EmptySignal);
    }
    if sample_rate == 0 {
        return Err(SpectralError::InvalidSampleRate);
    }

    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&v| Complex::new(v, 0.0)).collect();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    let freqs = fft_frequencies(samples.len(), 1.0 / sample_rate as f64);
    Ok(Spectrum::new(buffer, freqs, sample_rate))
}

/// Inverse DFT of `spectrum`, normalized by `1/N`, keeping only the real component.
pub fn inverse(spectrum: &Spectrum) -> Result<Vec<f64>, SpectralError> {
    if spectrum.is_empty() {
        return Err(SpectralError::EmptySignal);
    }

    let mut buffer = spectrum.bins().to_vec();
    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(buffer.len());
    ifft.process(&mut buffer);

    // rustfft leaves the inverse unscaled.
    let scale = 1.0 / buffer.len() as f64;
    Ok(buffer.iter().map(|c| c.re * scale).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::low_pass;
    use rand::Rng;

    const TOLERANCE: f64 = 1e-9;

    fn random_signal(len: usize) -> Vec<f64> {
        let mut rng = rand::rng();
        (0..len).map(|_| rng.random_range(-1.0..1.0)).collect()
    }

    fn assert_close(a: Complex<f64>, b: Complex<f64>) {
        assert!((a - b).norm() < TOLERANCE, "{} != {}", a, b);
    }

    #[test]
    fn test_forward_known_values() {
        let spectrum = forward(&[1.0, 0.0, -1.0, 0.0], 4).unwrap();
        let expected = [0.0, 2.0, 0.0, 2.0];
        for (bin, &want) in spectrum.bins().iter().zip(expected.iter()) {
            assert_close(*bin, Complex::new(want, 0.0));
        }
        assert_eq!(spectrum.freqs(), &[0.0, 1.0, -2.0, -1.0]);
    }

    #[test]
    fn test_forward_matches_summation_for_odd_length() {
        let samples = random_signal(7);
        let spectrum = forward(&samples, 7).unwrap();
        let n = samples.len();
        for k in 0..n {
            let expected: Complex<f64> = samples
                .iter()
                .enumerate()
                .map(|(t, &x)| {
                    let angle = -2.0 * std::f64::consts::PI * (k * t) as f64 / n as f64;
                    Complex::from_polar(x, angle)
                })
                .sum();
            assert_close(spectrum.bins()[k], expected);
        }
    }

    #[test]
    fn test_fft_frequencies_odd_and_even() {
        assert_eq!(fft_frequencies(5, 1.0), vec![0.0, 0.2, 0.4, -0.4, -0.2]);
        assert_eq!(fft_frequencies(4, 0.25), vec![0.0, 1.0, -2.0, -1.0]);
        assert_eq!(fft_frequencies(1, 1.0), vec![0.0]);
        assert!(fft_frequencies(0, 1.0).is_empty());
    }

    #[test]
    fn test_round_trip_restores_signal() {
        for len in [1, 2, 17, 1000, 1024] {
            let samples = random_signal(len);
            let spectrum = forward(&samples, 44100).unwrap();
            let restored = inverse(&spectrum).unwrap();
            assert_eq!(restored.len(), samples.len());
            let max_err = samples
                .iter()
                .zip(restored.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            assert!(max_err < 1e-6, "len {} max error {}", len, max_err);
        }
    }

    #[test]
    fn test_real_input_has_conjugate_symmetry() {
        for len in [33, 32] {
            let samples = random_signal(len);
            let spectrum = forward(&samples, 8000).unwrap();
            let bins = spectrum.bins();
            let n = bins.len();
            for k in 0..n {
                assert_close(bins[k], bins[(n - k) % n].conj());
            }
        }
    }

    #[test]
    fn test_even_length_nyquist_bin_is_real() {
        let spectrum = forward(&random_signal(32), 8000).unwrap();
        let nyquist = 16;
        assert_eq!(spectrum.freqs()[nyquist], -4000.0);
        assert!(spectrum.bins()[nyquist].im.abs() < TOLERANCE);
        // A cutoff at sr/2 keeps the Nyquist bin.
        assert_eq!(low_pass(&spectrum, 4000.0).bins()[nyquist], spectrum.bins()[nyquist]);
    }

    #[test]
    fn test_shapes_follow_input_length() {
        let samples = random_signal(101);
        let spectrum = forward(&samples, 22050).unwrap();
        assert_eq!(spectrum.len(), 101);
        assert_eq!(spectrum.freqs().len(), 101);
        assert_eq!(inverse(&spectrum).unwrap().len(), 101);
    }

    #[test]
    fn test_inverse_of_zero_spectrum_is_silence() {
        let spectrum = Spectrum::from_parts(
            vec![Complex::new(0.0, 0.0); 4],
            fft_frequencies(4, 0.25),
            4,
        )
        .unwrap();
        assert_eq!(inverse(&spectrum).unwrap(), vec![0.0; 4]);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(forward(&[], 44100).unwrap_err(), SpectralError::EmptySignal);
        let empty = Spectrum::from_parts(Vec::new(), Vec::new(), 44100).unwrap();
        assert_eq!(inverse(&empty).unwrap_err(), SpectralError::EmptySignal);
    }

    #[test]
    fn test_zero_sample_rate_is_rejected() {
        assert_eq!(
            forward(&[1.0, 2.0], 0).unwrap_err(),
            SpectralError::InvalidSampleRate
        );
    }
}
