//! Sine oscillators and frequency sweeps
//!
//! Constant tones use the closed form `sin(2π f i / rate)`. Sweeps integrate
//! the instantaneous frequency sample by sample so the phase never jumps, no
//! matter how the frequency curve bends.

use std::f64::consts::TAU;

use crate::envelope::linspace;
use crate::error::{Result, SynthError};

/// Frequency of an oscillator over the clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrequencyTrajectory {
    /// Fixed frequency in Hz
    Constant(f32),
    /// Linear glide from `start` to `end` Hz, reaching `end` on the last sample
    Linear { start: f32, end: f32 },
}

impl FrequencyTrajectory {
    /// Per-sample instantaneous frequency for a clip of `len` samples
    pub fn samples(&self, len: usize) -> Vec<f32> {
        match *self {
            FrequencyTrajectory::Constant(hz) => vec![hz; len],
            FrequencyTrajectory::Linear { start, end } => linspace(start, end, len).collect(),
        }
    }

    fn validate(&self) -> Result<()> {
        let finite = match *self {
            FrequencyTrajectory::Constant(hz) => hz.is_finite(),
            FrequencyTrajectory::Linear { start, end } => start.is_finite() && end.is_finite(),
        };
        if finite {
            Ok(())
        } else {
            Err(SynthError::InvalidParameter(format!(
                "oscillator frequency must be finite, got {self:?}"
            )))
        }
    }
}

/// Generate a sine oscillator
///
/// The oscillator is phase-pure: it applies no decay or envelope of its own.
///
/// # Arguments
/// * `len` - Number of samples to generate
/// * `frequency` - Constant frequency or sweep
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// Vector of samples in -1.0 to 1.0 range, empty when `len` is zero
pub fn oscillator(
    len: usize,
    frequency: &FrequencyTrajectory,
    sample_rate: u32,
) -> Result<Vec<f32>> {
    check_sample_rate(sample_rate)?;
    frequency.validate()?;

    match *frequency {
        FrequencyTrajectory::Constant(hz) => {
            let omega = TAU * f64::from(hz) / f64::from(sample_rate);
            Ok((0..len).map(|i| (omega * i as f64).sin() as f32).collect())
        }
        FrequencyTrajectory::Linear { .. } => {
            sine_from_frequencies(&frequency.samples(len), sample_rate)
        }
    }
}

/// Generate a sine wave following an arbitrary per-sample frequency curve
///
/// # Arguments
/// * `frequencies` - Instantaneous frequency in Hz for each output sample
/// * `sample_rate` - Sample rate in Hz
pub fn sine_from_frequencies(frequencies: &[f32], sample_rate: u32) -> Result<Vec<f32>> {
    check_sample_rate(sample_rate)?;
    if let Some(bad) = frequencies.iter().find(|f| !f.is_finite()) {
        return Err(SynthError::InvalidParameter(format!(
            "oscillator frequency must be finite, got {bad}"
        )));
    }

    Ok(accumulate_phase(frequencies, sample_rate)?
        .into_iter()
        .map(|phase| phase.sin() as f32)
        .collect())
}

/// Integrate a frequency curve into oscillator phase (radians)
///
/// `phase[i] = 2π · Σ_{k<i} f[k] / sample_rate`, so the first sample always
/// starts at phase zero and each step advances by exactly that step's
/// instantaneous frequency. Accumulates in `f64` to keep long sweeps exact.
///
/// This is the exclusive prefix sum: compared with an inclusive running sum
/// (first phase `2π · f[0] / sample_rate`) every phase lags by one sample.
///
/// # Errors
/// `InvalidParameter` if the sample rate is zero.
pub fn accumulate_phase(frequencies: &[f32], sample_rate: u32) -> Result<Vec<f64>> {
    check_sample_rate(sample_rate)?;
    let scale = TAU / f64::from(sample_rate);
    let mut phase = 0.0f64;
    Ok(frequencies
        .iter()
        .map(|&hz| {
            let current = phase;
            phase += f64::from(hz) * scale;
            current
        })
        .collect())
}

fn check_sample_rate(sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        return Err(SynthError::InvalidParameter(
            "sample rate must be positive".to_string(),
        ));
    }
    Ok(())
}
