//! WAV container boundary
//!
//! Mono, 16-bit signed PCM, little-endian. Files are written to a temporary
//! sibling and renamed into place, so a failed write never leaves a partial
//! `.wav` behind.

use std::io;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Write PCM i16 samples to a WAV file
///
/// # Arguments
/// * `path` - Output file path
/// * `sample_rate` - Sample rate in Hz
/// * `samples` - PCM i16 samples
pub fn write_wav(path: &Path, sample_rate: u32, samples: &[i16]) -> io::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let staging = staging_path(path);
    let written = write_samples(&staging, spec, samples);
    if written.is_err() {
        let _ = std::fs::remove_file(&staging);
        return written;
    }

    std::fs::rename(&staging, path).inspect_err(|_| {
        let _ = std::fs::remove_file(&staging);
    })
}

/// Read a mono 16-bit WAV file
///
/// # Returns
/// The sample rate and the PCM samples
pub fn read_wav(path: &Path) -> io::Result<(u32, Vec<i16>)> {
    let reader = WavReader::open(path).map_err(to_io)?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{}: expected mono 16-bit PCM, found {} channel(s) at {} bits",
                path.display(),
                spec.channels,
                spec.bits_per_sample
            ),
        ));
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_io)?;

    Ok((spec.sample_rate, samples))
}

fn write_samples(path: &Path, spec: WavSpec, samples: &[i16]) -> io::Result<()> {
    let mut writer = WavWriter::create(path, spec).map_err(to_io)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(to_io)?;
    }
    writer.finalize().map_err(to_io)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

fn to_io(err: hound::Error) -> io::Error {
    match err {
        hound::Error::IoError(e) => e,
        other => io::Error::other(other),
    }
}
