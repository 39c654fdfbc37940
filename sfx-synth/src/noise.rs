//! Noise generation and moving-average shaping
//!
//! Noise comes from an explicitly passed, seedable generator so every buffer
//! can be reproduced from its seed. Coloring uses centred moving averages:
//! the average itself is a gentle low-pass, and subtracting it from the
//! input gives the matching high-pass.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::{Result, SynthError};

/// Distribution of raw noise samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseDistribution {
    /// Standard normal (mean 0, variance 1)
    #[default]
    Gaussian,
    /// Uniform in -1.0 to 1.0
    Uniform,
}

/// Spectral shaping applied to a noise buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseShape {
    /// Unfiltered
    #[default]
    Raw,
    /// Centred moving average over an odd `window`
    LowPass { window: usize },
    /// Input minus its centred moving average over an odd `window`
    HighPass { window: usize },
}

impl NoiseShape {
    /// Apply the shape to any buffer
    ///
    /// # Errors
    /// `InvalidParameter` if the window is zero or even.
    pub fn apply(&self, samples: &[f32]) -> Result<Vec<f32>> {
        match *self {
            NoiseShape::Raw => Ok(samples.to_vec()),
            NoiseShape::LowPass { window } => moving_average(samples, window),
            NoiseShape::HighPass { window } => {
                let smoothed = moving_average(samples, window)?;
                Ok(samples
                    .iter()
                    .zip(&smoothed)
                    .map(|(raw, low)| raw - low)
                    .collect())
            }
        }
    }
}

/// Seedable noise source
///
/// Wraps a PCG32 stream. Two generators created with the same seed produce
/// identical sequences.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    rng: Pcg32,
    distribution: NoiseDistribution,
}

impl NoiseGenerator {
    /// Gaussian noise generator seeded with `seed`
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            distribution: NoiseDistribution::Gaussian,
        }
    }

    /// Switch the raw sample distribution
    pub fn with_distribution(mut self, distribution: NoiseDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn distribution(&self) -> NoiseDistribution {
        self.distribution
    }

    /// Draw one raw sample
    pub fn next_sample(&mut self) -> f32 {
        match self.distribution {
            NoiseDistribution::Gaussian => {
                // Box-Muller; 1 - u keeps the logarithm away from zero
                let u1: f64 = 1.0 - self.rng.random::<f64>();
                let u2: f64 = self.rng.random::<f64>();
                ((-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()) as f32
            }
            NoiseDistribution::Uniform => self.rng.random_range(-1.0f32..1.0),
        }
    }
}

/// Generate a shaped noise burst
///
/// # Arguments
/// * `generator` - Noise source (advanced by `len` draws)
/// * `len` - Number of samples
/// * `amplitude` - Scale applied to the raw samples before shaping
/// * `shape` - Optional low-pass/high-pass coloring
pub fn noise(
    generator: &mut NoiseGenerator,
    len: usize,
    amplitude: f32,
    shape: NoiseShape,
) -> Result<Vec<f32>> {
    if !amplitude.is_finite() {
        return Err(SynthError::InvalidParameter(format!(
            "noise amplitude must be finite, got {amplitude}"
        )));
    }

    let raw: Vec<f32> = (0..len)
        .map(|_| generator.next_sample() * amplitude)
        .collect();

    match shape {
        NoiseShape::Raw => Ok(raw),
        shape => shape.apply(&raw),
    }
}

/// Centred moving average
///
/// `output[i]` is the mean of `samples[i - window/2 ..= i + window/2]`,
/// restricted to indices inside the buffer. Edges therefore average over a
/// shorter window instead of wrapping around or reading zeros.
///
/// # Errors
/// `InvalidParameter` if `window` is zero or even.
pub fn moving_average(samples: &[f32], window: usize) -> Result<Vec<f32>> {
    if window == 0 || window % 2 == 0 {
        return Err(SynthError::InvalidParameter(format!(
            "moving average window must be odd, got {window}"
        )));
    }

    let half = window / 2;

    // Prefix sums make every window O(1)
    let mut prefix = Vec::with_capacity(samples.len() + 1);
    prefix.push(0.0f64);
    let mut running = 0.0f64;
    for &s in samples {
        running += f64::from(s);
        prefix.push(running);
    }

    Ok((0..samples.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(samples.len());
            ((prefix[hi] - prefix[lo]) / (hi - lo) as f64) as f32
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_reproducibility() {
        let mut a = NoiseGenerator::seeded(42);
        let mut b = NoiseGenerator::seeded(42);
        let first = noise(&mut a, 512, 0.5, NoiseShape::Raw).unwrap();
        let second = noise(&mut b, 512, 0.5, NoiseShape::Raw).unwrap();
        assert_eq!(first, second);

        let mut c = NoiseGenerator::seeded(43);
        let other = noise(&mut c, 512, 0.5, NoiseShape::Raw).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_gaussian_statistics() {
        let mut generator = NoiseGenerator::seeded(7);
        let samples = noise(&mut generator, 20000, 1.0, NoiseShape::Raw).unwrap();
        let n = samples.len() as f64;
        let mean = samples.iter().map(|&s| f64::from(s)).sum::<f64>() / n;
        let variance = samples
            .iter()
            .map(|&s| (f64::from(s) - mean).powi(2))
            .sum::<f64>()
            / n;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((variance - 1.0).abs() < 0.1, "variance {variance}");
        assert!(samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_uniform_range_and_amplitude() {
        let mut generator = NoiseGenerator::seeded(7).with_distribution(NoiseDistribution::Uniform);
        assert_eq!(generator.distribution(), NoiseDistribution::Uniform);
        let samples = noise(&mut generator, 5000, 0.25, NoiseShape::Raw).unwrap();
        assert!(samples.iter().all(|&s| (-0.25..0.25).contains(&s)));
    }

    #[test]
    fn test_moving_average_edges() {
        let samples = [3.0, 6.0, 9.0, 12.0, 15.0];
        let smoothed = moving_average(&samples, 3).unwrap();
        assert_eq!(smoothed.len(), samples.len());
        // Edges use the shorter available window
        assert!((smoothed[0] - 4.5).abs() < 1e-6);
        assert!((smoothed[1] - 6.0).abs() < 1e-6);
        assert!((smoothed[2] - 9.0).abs() < 1e-6);
        assert!((smoothed[4] - 13.5).abs() < 1e-6);
    }

    #[test]
    fn test_moving_average_window_wider_than_buffer() {
        let smoothed = moving_average(&[1.0, 2.0, 3.0], 11).unwrap();
        assert!(smoothed.iter().all(|&s| (s - 2.0).abs() < 1e-6));
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let samples = [0.5, -0.25, 1.0];
        assert_eq!(moving_average(&samples, 1).unwrap(), samples.to_vec());
    }

    #[test]
    fn test_moving_average_rejects_even_window() {
        assert!(matches!(
            moving_average(&[1.0, 2.0], 10),
            Err(SynthError::InvalidParameter(_))
        ));
        assert!(matches!(
            moving_average(&[1.0, 2.0], 0),
            Err(SynthError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_high_pass_complements_low_pass() {
        let mut generator = NoiseGenerator::seeded(99);
        let raw = noise(&mut generator, 1000, 1.0, NoiseShape::Raw).unwrap();
        let low = NoiseShape::LowPass { window: 21 }.apply(&raw).unwrap();
        let high = NoiseShape::HighPass { window: 21 }.apply(&raw).unwrap();
        for i in 0..raw.len() {
            assert!((low[i] + high[i] - raw[i]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_low_pass_reduces_energy() {
        let mut generator = NoiseGenerator::seeded(5);
        let raw = noise(&mut generator, 4000, 1.0, NoiseShape::Raw).unwrap();
        let mut generator = NoiseGenerator::seeded(5);
        let smooth = noise(&mut generator, 4000, 1.0, NoiseShape::LowPass { window: 11 }).unwrap();

        let energy = |s: &[f32]| s.iter().map(|x| x * x).sum::<f32>();
        assert!(energy(&smooth) < energy(&raw) * 0.5);
    }

    #[test]
    fn test_noise_rejects_non_finite_amplitude() {
        let mut generator = NoiseGenerator::seeded(1);
        assert!(matches!(
            noise(&mut generator, 10, f32::NAN, NoiseShape::Raw),
            Err(SynthError::InvalidParameter(_))
        ));
    }
}
