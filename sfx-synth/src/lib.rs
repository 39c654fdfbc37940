//! Procedural sound-effect synthesis
//!
//! Builds short game sound effects (impacts, gunfire, vocalisations, UI cues)
//! from parametric models only: additive sines, frequency sweeps, shaped noise
//! and ADSR envelopes. No recorded samples are involved.
//!
//! The pipeline for one sound is:
//!
//! 1. oscillators and noise produce `f32` components of a common length
//! 2. gain curves (exponential decay, envelopes, tremolo) shape each component
//! 3. [`mix`] sums the weighted components
//! 4. [`normalize_and_quantize`] converts the result to 16-bit PCM
//! 5. [`write_wav`] hands the PCM to the WAV container
//!
//! # Example
//! ```no_run
//! use sfx_synth::*;
//!
//! let sample_rate = 44100;
//! let len = sample_count(0.2, sample_rate)?;
//!
//! // Thud: 50 Hz sine decaying at exp(-25t)
//! let mut thud = oscillator(len, &FrequencyTrajectory::Constant(50.0), sample_rate)?;
//! apply_gain(&mut thud, &exp_decay(len, 25.0, sample_rate)?)?;
//!
//! // Slap: smoothed noise burst
//! let mut rng = NoiseGenerator::seeded(7);
//! let mut slap = noise(&mut rng, len, 0.4, NoiseShape::LowPass { window: 11 })?;
//! apply_gain(&mut slap, &exp_decay(len, 50.0, sample_rate)?)?;
//!
//! let mixed = mix(&[(&thud, 1.0), (&slap, 1.0)])?;
//! let pcm = normalize_and_quantize(&mixed)?;
//! write_wav(std::path::Path::new("thud.wav"), sample_rate, &pcm)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod batch;
pub mod catalog;
pub mod config;
pub mod envelope;
pub mod error;
pub mod export;
pub mod mixer;
pub mod noise;
pub mod oscillator;
pub mod patch;
pub mod presets;
pub mod quantize;

/// Default output sample rate (CD quality, what the game engine imports)
pub const SAMPLE_RATE: u32 = 44100;

// Errors
pub use error::{Result, SynthError};

// Configuration
pub use config::{ConfigError, SynthConfig};

// Envelope
pub use envelope::{envelope, Envelope};

// Oscillators
pub use oscillator::{accumulate_phase, oscillator, sine_from_frequencies, FrequencyTrajectory};

// Noise
pub use noise::{moving_average, noise, NoiseDistribution, NoiseGenerator, NoiseShape};

// Mixing and gain curves
pub use mixer::{apply_gain, exp_decay, mix, Modulation};

// Quantization
pub use quantize::{from_pcm_i16, normalize, normalize_and_quantize};

// Patches, presets and catalog
pub use catalog::{Catalog, RenderedSound, SoundDescriptor};
pub use patch::{Arpeggio, Gain, NoiseLayer, Patch, Preset, ToneLayer};

// Export and batch generation
pub use batch::{generate_catalog, BatchFailure, BatchReport, GenerateError, GeneratedSound};
pub use export::{read_wav, write_wav};

/// Number of samples covering `duration` seconds at `sample_rate`
///
/// Rounds to the nearest sample so that e.g. 0.2s at 44.1kHz is exactly 8820
/// samples regardless of the binary representation of the duration.
///
/// # Errors
/// `InvalidParameter` if the sample rate is zero, the duration is not a
/// positive finite number, or the duration rounds to zero samples.
pub fn sample_count(duration: f32, sample_rate: u32) -> Result<usize> {
    if sample_rate == 0 {
        return Err(SynthError::InvalidParameter(
            "sample rate must be positive".to_string(),
        ));
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SynthError::InvalidParameter(format!(
            "duration must be a positive number of seconds, got {duration}"
        )));
    }

    let count = (f64::from(duration) * f64::from(sample_rate)).round() as usize;
    if count == 0 {
        return Err(SynthError::InvalidParameter(format!(
            "duration {duration}s is shorter than one sample at {sample_rate} Hz"
        )));
    }
    Ok(count)
}
