//! Batch generation of a catalog into WAV files
//!
//! Sounds are independent, so they render in parallel. A failing sound is
//! recorded and skipped; it never stops the rest of the batch.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::catalog::{Catalog, SoundDescriptor};
use crate::config::SynthConfig;
use crate::error::SynthError;
use crate::export::write_wav;

/// Why a single sound could not be generated
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Synth(#[from] SynthError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A sound that made it to disk
#[derive(Debug, Clone)]
pub struct GeneratedSound {
    pub name: &'static str,
    pub path: PathBuf,
    pub samples: usize,
    pub sample_rate: u32,
}

/// A sound that did not
#[derive(Debug)]
pub struct BatchFailure {
    pub name: &'static str,
    pub error: GenerateError,
}

/// Outcome of a batch run, in catalog order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<GeneratedSound>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate every sound in `catalog` into `config.output_dir`
///
/// Each sound is written as `{name}.wav`. Per-sound failures are collected
/// in the report.
///
/// # Errors
///
/// Only fails if the output directory cannot be created.
pub fn generate_catalog(catalog: &Catalog, config: &SynthConfig) -> std::io::Result<BatchReport> {
    std::fs::create_dir_all(&config.output_dir)?;

    info!(
        "Generating {} sounds at {} Hz -> {}",
        catalog.len(),
        config.sample_rate,
        config.output_dir.display()
    );

    let results: Vec<_> = catalog
        .entries()
        .par_iter()
        .map(|descriptor| (descriptor.name, generate_one(descriptor, config)))
        .collect();

    let mut report = BatchReport::default();
    for (name, result) in results {
        match result {
            Ok(sound) => {
                info!(
                    "  -> {} ({} samples, {:.2}s)",
                    sound.path.display(),
                    sound.samples,
                    sound.samples as f32 / sound.sample_rate as f32
                );
                report.generated.push(sound);
            }
            Err(error) => {
                warn!("  !! {name}: {error}");
                report.failures.push(BatchFailure { name, error });
            }
        }
    }

    info!(
        "Generated {} of {} sounds",
        report.generated.len(),
        catalog.len()
    );
    Ok(report)
}

fn generate_one(
    descriptor: &SoundDescriptor,
    config: &SynthConfig,
) -> Result<GeneratedSound, GenerateError> {
    let rendered = descriptor.render(config)?;
    let path = output_path(&config.output_dir, descriptor.name);

    write_wav(&path, rendered.sample_rate, &rendered.samples).map_err(|source| {
        GenerateError::Io {
            path: path.clone(),
            source,
        }
    })?;

    Ok(GeneratedSound {
        name: descriptor.name,
        path,
        samples: rendered.samples.len(),
        sample_rate: rendered.sample_rate,
    })
}

fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.wav"))
}
