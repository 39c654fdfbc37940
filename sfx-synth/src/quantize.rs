//! Peak normalization and PCM quantization
//!
//! Converts finished `f32` buffers to the 16-bit signed format the game
//! imports. Normalization always happens first so every sound uses the full
//! dynamic range.

use crate::error::{Result, SynthError};

/// Largest positive 16-bit sample, used as the full-scale value
const FULL_SCALE: f64 = i16::MAX as f64;

/// Normalize a buffer to full scale and convert it to PCM i16
///
/// Peak-normalizes a copy with [`normalize`] (silence is left untouched),
/// multiplies by 32767, rounds to the nearest integer and clamps to the i16
/// range.
///
/// # Errors
/// `InvalidSample` with the index of the first NaN or infinite sample.
pub fn normalize_and_quantize(samples: &[f32]) -> Result<Vec<i16>> {
    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(SynthError::InvalidSample { index });
    }

    let mut normalized = samples.to_vec();
    normalize(&mut normalized);

    Ok(normalized
        .iter()
        .map(|&s| {
            (f64::from(s) * FULL_SCALE)
                .round()
                .clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
        })
        .collect())
}

/// Scale a buffer in place so its peak magnitude is 1.0
///
/// Silent buffers are left as they are. The division runs in `f64`, so even
/// a subnormal peak keeps the relative levels intact.
pub fn normalize(samples: &mut [f32]) {
    let max_amplitude = f64::from(peak(samples));
    if max_amplitude > 0.0 {
        for sample in samples.iter_mut() {
            *sample = (f64::from(*sample) / max_amplitude) as f32;
        }
    }
}

/// Convert PCM i16 samples back to f32 (-1.0 to 1.0)
///
/// Useful for analysing generated audio.
pub fn from_pcm_i16(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| (f64::from(s) / FULL_SCALE) as f32).collect()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_silence() {
        let pcm = normalize_and_quantize(&[0.0; 64]).unwrap();
        assert_eq!(pcm, vec![0; 64]);
    }

    #[test]
    fn test_quantize_empty() {
        assert!(normalize_and_quantize(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_quantize_reaches_full_scale() {
        let samples = vec![0.0, 0.05, -0.2, 0.1, 0.15];
        let pcm = normalize_and_quantize(&samples).unwrap();
        assert_eq!(pcm.len(), samples.len());
        assert_eq!(pcm[2], -32767);
        assert_eq!(pcm[0], 0);
        let loudest = pcm.iter().map(|&s| i32::from(s).abs()).max().unwrap();
        assert!((loudest - 32767).abs() <= 1);
        // Relative levels survive
        assert!((i32::from(pcm[1]) - 8192).abs() <= 1);
    }

    #[test]
    fn test_quantize_scales_up_quiet_buffers() {
        let pcm = normalize_and_quantize(&[0.002, -0.0005]).unwrap();
        assert_eq!(pcm, vec![32767, -8192]);
    }

    #[test]
    fn test_quantize_rejects_non_finite() {
        assert_eq!(
            normalize_and_quantize(&[0.0, 0.5, f32::NAN]),
            Err(SynthError::InvalidSample { index: 2 })
        );
        assert_eq!(
            normalize_and_quantize(&[f32::NEG_INFINITY]),
            Err(SynthError::InvalidSample { index: 0 })
        );
    }

    #[test]
    fn test_quantize_keeps_levels_of_subnormal_buffers() {
        // 2^-133 and 2^-134, both exact subnormals
        let tiny = f32::from_bits(1 << 16);
        let half = f32::from_bits(1 << 15);
        assert!(tiny.is_subnormal());

        let pcm = normalize_and_quantize(&[tiny, half, 0.0, -tiny]).unwrap();
        assert_eq!(pcm, vec![32767, 16384, 0, -32767]);
        assert_eq!(pcm, normalize_and_quantize(&[1.0, 0.5, 0.0, -1.0]).unwrap());
    }

    #[test]
    fn test_normalize() {
        let mut samples = vec![0.5, -0.25, 0.25];
        normalize(&mut samples);

        assert!((samples[0] - 1.0).abs() < 0.001);
        assert!((samples[1] - (-0.5)).abs() < 0.001);
        assert!((samples[2] - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_normalize_silent() {
        let mut samples = vec![0.0, 0.0, 0.0];
        normalize(&mut samples);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_normalize_subnormal_peak() {
        let mut samples = vec![f32::from_bits(1 << 16), f32::from_bits(1 << 15)];
        normalize(&mut samples);
        assert_eq!(samples, vec![1.0, 0.5]);
    }

    #[test]
    fn test_from_pcm_i16() {
        let samples = from_pcm_i16(&[0, i16::MAX, -i16::MAX]);
        assert!((samples[0] - 0.0).abs() < 0.001);
        assert!((samples[1] - 1.0).abs() < 0.001);
        assert!((samples[2] - (-1.0)).abs() < 0.001);
    }
}
