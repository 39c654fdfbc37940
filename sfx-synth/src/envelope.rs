//! ADSR envelope generator
//!
//! Provides Attack-Decay-Sustain-Release gain curves for shaping components.
//! Segment lengths are fractions of the whole clip, so the same envelope
//! stretches with the sound it is applied to.

use crate::error::{Result, SynthError};
use crate::sample_count;

/// ADSR envelope parameters
///
/// - Attack: fraction of the clip spent ramping 0 -> 1
/// - Decay: fraction of the clip spent ramping 1 -> sustain
/// - Sustain: level held between decay and release (may exceed 1.0)
/// - Release: fraction of the clip spent ramping sustain -> 0
///
/// Attack, decay and release are fractions of the *total* duration, not of
/// whatever remains after the previous segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    /// Attack length as a fraction of the clip
    pub attack: f32,
    /// Decay length as a fraction of the clip
    pub decay: f32,
    /// Sustain level
    pub sustain: f32,
    /// Release length as a fraction of the clip
    pub release: f32,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.5,
            release: 0.2,
        }
    }
}

impl Envelope {
    /// Create a new envelope with custom parameters
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Rising creature tone - soft attack, strong sustain, long tail
    pub fn swell() -> Self {
        Self::new(0.05, 0.1, 0.7, 0.3)
    }

    /// Breathy noise bed - slow attack, low sustain
    pub fn breath() -> Self {
        Self::new(0.1, 0.2, 0.4, 0.3)
    }

    /// Roar body - slow attack, sustained growl
    pub fn growl() -> Self {
        Self::new(0.1, 0.2, 0.6, 0.3)
    }

    /// Mechanical slide - quick attack, quiet sustain, short release
    pub fn slide() -> Self {
        Self::new(0.05, 0.1, 0.2, 0.1)
    }

    /// Check the fractions and sustain level
    ///
    /// # Errors
    /// `InvalidParameter` if a fraction is negative or non-finite, the three
    /// segment fractions add up to more than the whole clip, or the sustain
    /// level is negative or non-finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("attack", self.attack),
            ("decay", self.decay),
            ("release", self.release),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SynthError::InvalidParameter(format!(
                    "envelope {name} fraction must be a finite non-negative number, got {value}"
                )));
            }
        }

        let total = self.attack + self.decay + self.release;
        if total > 1.0 {
            return Err(SynthError::InvalidParameter(format!(
                "envelope attack + decay + release must not exceed 1.0, got {total}"
            )));
        }

        if !self.sustain.is_finite() || self.sustain < 0.0 {
            return Err(SynthError::InvalidParameter(format!(
                "envelope sustain level must be a finite non-negative number, got {}",
                self.sustain
            )));
        }

        Ok(())
    }

    /// Generate the envelope curve for a clip
    ///
    /// Returns exactly `round(duration * sample_rate)` gain values.
    ///
    /// # Arguments
    /// * `duration` - Clip duration in seconds
    /// * `sample_rate` - Sample rate in Hz
    pub fn generate(&self, duration: f32, sample_rate: u32) -> Result<Vec<f32>> {
        self.validate()?;
        let total = sample_count(duration, sample_rate)?;
        Ok(self.curve(total))
    }

    fn curve(&self, total: usize) -> Vec<f32> {
        let segment = |fraction: f32| ((f64::from(fraction) * total as f64) as usize).max(1);

        let attack_samples = segment(self.attack);
        let decay_samples = segment(self.decay);
        let release_samples = segment(self.release);
        let sustain_samples =
            total.saturating_sub(attack_samples + decay_samples + release_samples);

        let mut curve = Vec::with_capacity(total.max(
            attack_samples + decay_samples + sustain_samples + release_samples,
        ));
        curve.extend(linspace(0.0, 1.0, attack_samples));
        curve.extend(linspace(1.0, self.sustain, decay_samples));
        curve.extend(std::iter::repeat_n(self.sustain, sustain_samples));
        curve.extend(linspace(self.sustain, 0.0, release_samples));

        // Clamping short segments to one sample can overshoot very short clips
        curve.resize(total, 0.0);
        curve
    }
}

/// Create an ADSR envelope curve
///
/// Free-function form of [`Envelope::generate`].
///
/// # Arguments
/// * `duration` - Clip duration in seconds
/// * `sample_rate` - Sample rate in Hz
/// * `attack` - Attack fraction of the clip
/// * `decay` - Decay fraction of the clip
/// * `sustain` - Sustain level
/// * `release` - Release fraction of the clip
pub fn envelope(
    duration: f32,
    sample_rate: u32,
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
) -> Result<Vec<f32>> {
    Envelope::new(attack, decay, sustain, release).generate(duration, sample_rate)
}

/// `n` evenly spaced values from `start` to `end`, both endpoints included
pub(crate) fn linspace(start: f32, end: f32, n: usize) -> impl Iterator<Item = f32> {
    let step = if n > 1 {
        (end - start) / (n - 1) as f32
    } else {
        0.0
    };
    (0..n).map(move |i| {
        if n > 1 && i == n - 1 {
            end
        } else {
            start + step * i as f32
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SAMPLE_RATE: u32 = 44100;

    #[test]
    fn test_envelope_default() {
        let env = Envelope::default();
        assert!(env.validate().is_ok());
        assert_eq!(env, Envelope::new(0.01, 0.1, 0.5, 0.2));
    }

    #[test]
    fn test_envelope_presets_validate() {
        for env in [
            Envelope::swell(),
            Envelope::breath(),
            Envelope::growl(),
            Envelope::slide(),
        ] {
            assert!(env.validate().is_ok(), "{env:?}");
        }
    }

    #[test]
    fn test_envelope_scenario() {
        let curve = envelope(0.2, TEST_SAMPLE_RATE, 0.01, 0.1, 0.5, 0.2).unwrap();
        assert_eq!(curve.len(), 8820);

        // Attack starts at silence
        assert!(curve[0].abs() < 1e-6);

        // Middle of the sustain plateau
        assert!((curve[4000] - 0.5).abs() < 1e-6);

        // Release ends at silence
        assert!(curve.last().unwrap().abs() < 1e-6);

        // Peak of the attack ramp
        assert!((curve[87] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_length_is_exact() {
        for &duration in &[0.01, 0.08, 0.1, 0.12, 0.15, 0.2, 0.25, 0.3, 0.4, 0.5, 0.6, 0.8] {
            for &rate in &[8000, 22050, 44100, 48000] {
                let curve = Envelope::default().generate(duration, rate).unwrap();
                let expected = (f64::from(duration) * f64::from(rate)).round() as usize;
                assert_eq!(curve.len(), expected, "duration {duration} at {rate} Hz");
            }
        }
    }

    #[test]
    fn test_envelope_range() {
        let curve = Envelope::growl().generate(0.8, TEST_SAMPLE_RATE).unwrap();
        assert!(curve.iter().all(|&v| v.is_finite() && (0.0..=1.0).contains(&v)));

        // Sustain above unity is allowed and bounds the curve
        let loud = envelope(0.1, TEST_SAMPLE_RATE, 0.1, 0.1, 1.5, 0.1).unwrap();
        assert!(loud.iter().all(|&v| (0.0..=1.5).contains(&v)));
        assert!(loud.iter().any(|&v| (v - 1.5).abs() < 1e-6));
    }

    #[test]
    fn test_envelope_zero_fractions_still_ramp() {
        // Every ramp keeps at least one sample
        let curve = envelope(0.01, TEST_SAMPLE_RATE, 0.0, 0.0, 0.8, 0.0).unwrap();
        assert_eq!(curve.len(), 441);
        assert_eq!(curve[0], 0.0);
        assert_eq!(curve[1], 1.0);
        assert!((curve[2] - 0.8).abs() < 1e-6);
        assert_eq!(*curve.last().unwrap(), 0.8);
    }

    #[test]
    fn test_envelope_truncates_tiny_clips() {
        // Three one-sample ramps cannot fit in two samples
        let curve = envelope(2.0, 1, 0.0, 0.0, 0.5, 0.0).unwrap();
        assert_eq!(curve, vec![0.0, 1.0]);
    }

    #[test]
    fn test_envelope_rejects_invalid_parameters() {
        assert!(matches!(
            envelope(0.0, TEST_SAMPLE_RATE, 0.01, 0.1, 0.5, 0.2),
            Err(SynthError::InvalidParameter(_))
        ));
        assert!(matches!(
            envelope(0.2, 0, 0.01, 0.1, 0.5, 0.2),
            Err(SynthError::InvalidParameter(_))
        ));
        assert!(matches!(
            envelope(0.2, TEST_SAMPLE_RATE, 0.5, 0.4, 0.5, 0.2),
            Err(SynthError::InvalidParameter(_))
        ));
        assert!(matches!(
            envelope(0.2, TEST_SAMPLE_RATE, -0.1, 0.1, 0.5, 0.2),
            Err(SynthError::InvalidParameter(_))
        ));
        assert!(matches!(
            envelope(0.2, TEST_SAMPLE_RATE, 0.01, 0.1, f32::NAN, 0.2),
            Err(SynthError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_linspace() {
        let ramp: Vec<f32> = linspace(0.0, 1.0, 5).collect();
        assert_eq!(ramp, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let single: Vec<f32> = linspace(0.5, 0.0, 1).collect();
        assert_eq!(single, vec![0.5]);

        assert_eq!(linspace(0.0, 1.0, 0).count(), 0);
    }
}
