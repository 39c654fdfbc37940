//! Mixing and gain curves
//!
//! Every component of a sound shares one length, fixed by the sound's
//! duration. The mixer refuses to combine buffers of different lengths;
//! only the envelope generator pads or truncates, and only against its own
//! target.

use std::f64::consts::TAU;

use crate::error::{Result, SynthError};

/// Amplitude modulation applied to a whole layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modulation {
    /// `1 + depth * sin(2π rate t)` - wobbling growl
    Tremolo { rate_hz: f32, depth: f32 },
    /// Square on/off gate, open while `sin(2π rate t)` is positive
    PulseGate { rate_hz: f32 },
}

impl Modulation {
    /// Gain curve of `len` samples
    pub fn curve(&self, len: usize, sample_rate: u32) -> Result<Vec<f32>> {
        let (Modulation::Tremolo { rate_hz, .. } | Modulation::PulseGate { rate_hz }) = *self;
        if sample_rate == 0 || !rate_hz.is_finite() {
            return Err(SynthError::InvalidParameter(format!(
                "invalid modulation {self:?} at {sample_rate} Hz"
            )));
        }

        let omega = TAU * f64::from(rate_hz) / f64::from(sample_rate);
        Ok((0..len)
            .map(|i| {
                let s = (omega * i as f64).sin();
                match *self {
                    Modulation::Tremolo { depth, .. } => 1.0 + depth * s as f32,
                    Modulation::PulseGate { .. } => {
                        if s > 0.0 {
                            1.0
                        } else {
                            0.0
                        }
                    }
                }
            })
            .collect())
    }
}

/// Mix multiple equal-length signals together
///
/// Each signal is multiplied by its weight before summing.
/// The result is NOT normalized - use the quantizer for that.
///
/// # Arguments
/// * `signals` - Slice of (samples, weight) tuples
///
/// # Errors
/// `LengthMismatch` if any signal differs in length from the first one.
///
/// # Example
/// ```
/// use sfx_synth::mix;
///
/// let a = [1.0, 1.0, 1.0];
/// let b = [2.0, 2.0, 2.0];
/// let mixed = mix(&[(&a, 0.5), (&b, 0.5)]).unwrap();
/// assert_eq!(mixed, vec![1.5, 1.5, 1.5]);
/// ```
pub fn mix(signals: &[(&[f32], f32)]) -> Result<Vec<f32>> {
    let Some((first, _)) = signals.first() else {
        return Ok(Vec::new());
    };

    let len = first.len();
    if let Some((other, _)) = signals.iter().find(|(s, _)| s.len() != len) {
        return Err(SynthError::LengthMismatch {
            expected: len,
            found: other.len(),
        });
    }

    let mut result = vec![0.0f32; len];
    for (samples, weight) in signals {
        for (out, &sample) in result.iter_mut().zip(samples.iter()) {
            *out += sample * weight;
        }
    }

    Ok(result)
}

/// Exponential decay gain curve `exp(-t * rate)` with `t = i / sample_rate`
///
/// # Arguments
/// * `len` - Number of samples
/// * `rate` - Decay rate in 1/s (higher is shorter)
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
/// `InvalidParameter` for a zero sample rate or a non-finite decay rate.
pub fn exp_decay(len: usize, rate: f32, sample_rate: u32) -> Result<Vec<f32>> {
    if sample_rate == 0 || !rate.is_finite() {
        return Err(SynthError::InvalidParameter(format!(
            "invalid decay rate {rate} at {sample_rate} Hz"
        )));
    }
    let k = f64::from(rate) / f64::from(sample_rate);
    Ok((0..len).map(|i| (-(i as f64) * k).exp() as f32).collect())
}

/// Multiply `samples` by a gain curve of the same length (in-place)
///
/// # Errors
/// `LengthMismatch` if the curve and the samples differ in length.
pub fn apply_gain(samples: &mut [f32], gain: &[f32]) -> Result<()> {
    if samples.len() != gain.len() {
        return Err(SynthError::LengthMismatch {
            expected: samples.len(),
            found: gain.len(),
        });
    }
    for (sample, g) in samples.iter_mut().zip(gain) {
        *sample *= g;
    }
    Ok(())
}
