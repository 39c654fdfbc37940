//! Parametrised sound generators
//!
//! Every sound in the catalog is one of two effect categories, described
//! purely by parameters:
//!
//! - [`Patch`] - layered tones and noise bursts with per-layer gain curves
//!   (impacts, gunfire, vocalisations, most UI cues)
//! - [`Arpeggio`] - a sequence of decaying notes with overtones (fanfares)

use crate::envelope::Envelope;
use crate::error::{Result, SynthError};
use crate::mixer::{apply_gain, exp_decay, mix, Modulation};
use crate::noise::{noise, NoiseGenerator, NoiseShape};
use crate::oscillator::{oscillator, FrequencyTrajectory};
use crate::sample_count;

/// Gain curve applied to a single layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gain {
    /// No shaping
    Flat,
    /// `exp(-t * rate)`
    Decay(f32),
    /// ADSR over the whole clip
    Envelope(Envelope),
}

impl Gain {
    fn apply(&self, samples: &mut [f32], duration: f32, sample_rate: u32) -> Result<()> {
        match self {
            Gain::Flat => Ok(()),
            Gain::Decay(rate) => apply_gain(samples, &exp_decay(samples.len(), *rate, sample_rate)?),
            Gain::Envelope(env) => apply_gain(samples, &env.generate(duration, sample_rate)?),
        }
    }
}

/// A sine layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneLayer {
    pub frequency: FrequencyTrajectory,
    pub amplitude: f32,
    pub gain: Gain,
}

impl ToneLayer {
    /// Fixed-pitch tone decaying at `exp(-t * decay)`
    pub fn decaying(hz: f32, amplitude: f32, decay: f32) -> Self {
        Self {
            frequency: FrequencyTrajectory::Constant(hz),
            amplitude,
            gain: Gain::Decay(decay),
        }
    }

    /// Linear glide from `start` to `end` Hz decaying at `exp(-t * decay)`
    pub fn sweep(start: f32, end: f32, amplitude: f32, decay: f32) -> Self {
        Self {
            frequency: FrequencyTrajectory::Linear { start, end },
            amplitude,
            gain: Gain::Decay(decay),
        }
    }
}

/// A noise layer
///
/// The gain curve is applied before the shape, so a decaying burst is
/// smoothed as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseLayer {
    pub amplitude: f32,
    pub gain: Gain,
    pub shape: NoiseShape,
}

impl NoiseLayer {
    /// Unfiltered noise burst decaying at `exp(-t * decay)`
    pub fn burst(amplitude: f32, decay: f32) -> Self {
        Self {
            amplitude,
            gain: Gain::Decay(decay),
            shape: NoiseShape::Raw,
        }
    }

    pub fn shaped(self, shape: NoiseShape) -> Self {
        Self { shape, ..self }
    }
}

/// Layered sound: tones plus noise, optionally modulated
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Clip duration in seconds
    pub duration: f32,
    pub tones: Vec<ToneLayer>,
    pub noises: Vec<NoiseLayer>,
    /// Applied to the summed tones only, never to the noise
    pub tone_modulation: Option<Modulation>,
}

impl Patch {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            tones: Vec::new(),
            noises: Vec::new(),
            tone_modulation: None,
        }
    }

    pub fn tone(mut self, layer: ToneLayer) -> Self {
        self.tones.push(layer);
        self
    }

    pub fn noise(mut self, layer: NoiseLayer) -> Self {
        self.noises.push(layer);
        self
    }

    pub fn modulate(mut self, modulation: Modulation) -> Self {
        self.tone_modulation = Some(modulation);
        self
    }

    /// Render the patch to an unnormalized buffer
    pub fn render(&self, sample_rate: u32, generator: &mut NoiseGenerator) -> Result<Vec<f32>> {
        let len = sample_count(self.duration, sample_rate)?;

        let mut tones = Vec::with_capacity(self.tones.len());
        for layer in &self.tones {
            let mut samples = oscillator(len, &layer.frequency, sample_rate)?;
            layer.gain.apply(&mut samples, self.duration, sample_rate)?;
            tones.push((samples, layer.amplitude));
        }

        let tone_refs: Vec<(&[f32], f32)> = tones.iter().map(|(s, a)| (s.as_slice(), *a)).collect();
        let mut tone_sum = if tone_refs.is_empty() {
            vec![0.0; len]
        } else {
            mix(&tone_refs)?
        };
        if let Some(modulation) = &self.tone_modulation {
            apply_gain(&mut tone_sum, &modulation.curve(len, sample_rate)?)?;
        }

        let mut noises = Vec::with_capacity(self.noises.len());
        for layer in &self.noises {
            let mut samples = noise(generator, len, layer.amplitude, NoiseShape::Raw)?;
            layer.gain.apply(&mut samples, self.duration, sample_rate)?;
            noises.push(layer.shape.apply(&samples)?);
        }

        let mut components: Vec<(&[f32], f32)> = vec![(tone_sum.as_slice(), 1.0)];
        components.extend(noises.iter().map(|s| (s.as_slice(), 1.0)));
        mix(&components)
    }
}

/// Sequence of short decaying notes
#[derive(Debug, Clone, PartialEq)]
pub struct Arpeggio {
    /// Clip duration in seconds
    pub duration: f32,
    /// Note frequencies in Hz, played back to back
    pub notes: Vec<f32>,
    /// Length of each note slot in seconds
    pub note_length: f32,
    /// Per-note decay rate (1/s), restarting at each note
    pub decay: f32,
    /// Extra partials as (frequency ratio, amplitude); the fundamental is implied
    pub overtones: Vec<(f32, f32)>,
}

impl Arpeggio {
    /// Render the arpeggio to an unnormalized buffer
    ///
    /// Notes that run past the end of the clip are cut off.
    pub fn render(&self, sample_rate: u32) -> Result<Vec<f32>> {
        let len = sample_count(self.duration, sample_rate)?;
        if !self.note_length.is_finite()
            || f64::from(self.note_length) * f64::from(sample_rate) < 1.0
        {
            return Err(SynthError::InvalidParameter(format!(
                "note length must cover at least one sample, got {}s at {sample_rate} Hz",
                self.note_length
            )));
        }
        if !self.decay.is_finite() {
            return Err(SynthError::InvalidParameter(format!(
                "decay rate must be finite, got {}",
                self.decay
            )));
        }

        let mut buffer = vec![0.0f32; len];
        let slot = |i: usize| (f64::from(self.note_length) * i as f64 * f64::from(sample_rate)) as usize;

        for (i, &hz) in self.notes.iter().enumerate() {
            let start = slot(i).min(len);
            let end = slot(i + 1).min(len);
            let note_len = end - start;
            if note_len == 0 {
                break;
            }

            let partials = std::iter::once((1.0, 1.0)).chain(self.overtones.iter().copied());
            let mut layers = Vec::new();
            for (ratio, amplitude) in partials {
                let tone = oscillator(note_len, &FrequencyTrajectory::Constant(hz * ratio), sample_rate)?;
                layers.push((tone, amplitude));
            }
            let refs: Vec<(&[f32], f32)> = layers.iter().map(|(s, a)| (s.as_slice(), *a)).collect();
            let mut note = mix(&refs)?;
            apply_gain(&mut note, &exp_decay(note_len, self.decay, sample_rate)?)?;

            for (out, sample) in buffer[start..end].iter_mut().zip(note) {
                *out += sample;
            }
        }

        Ok(buffer)
    }
}

/// Parameter set for one sound
#[derive(Debug, Clone, PartialEq)]
pub enum Preset {
    Layered(Patch),
    Arpeggio(Arpeggio),
}

impl Preset {
    /// Render to an unnormalized buffer
    pub fn render(&self, sample_rate: u32, generator: &mut NoiseGenerator) -> Result<Vec<f32>> {
        match self {
            Preset::Layered(patch) => patch.render(sample_rate, generator),
            Preset::Arpeggio(arpeggio) => arpeggio.render(sample_rate),
        }
    }

    pub fn duration(&self) -> f32 {
        match self {
            Preset::Layered(patch) => patch.duration,
            Preset::Arpeggio(arpeggio) => arpeggio.duration,
        }
    }
}

impl From<Patch> for Preset {
    fn from(patch: Patch) -> Self {
        Preset::Layered(patch)
    }
}

impl From<Arpeggio> for Preset {
    fn from(arpeggio: Arpeggio) -> Self {
        Preset::Arpeggio(arpeggio)
    }
}
