//! gen-sounds - procedural sound effect generator
//!
//! Renders the Zombies vs Humans sound catalog to mono 16-bit WAV files.
//!
//! ## Audio Naming Convention
//!
//! Each sound effect is saved as `{name}.wav` (e.g., `hit_body.wav`, `jump.wav`)

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sfx_synth::{generate_catalog, presets, Catalog, SynthConfig};

#[derive(Parser)]
#[command(name = "gen-sounds")]
#[command(about = "Generate procedural sound effects as WAV files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the sound catalog to WAV files
    Generate {
        /// Settings file (sample_rate, output_dir, seed)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sample rate in Hz (overrides config)
        #[arg(short, long)]
        sample_rate: Option<u32>,

        /// Noise seed (overrides config)
        #[arg(long, conflicts_with = "random_seed")]
        seed: Option<u64>,

        /// Pick a fresh random noise seed
        #[arg(long)]
        random_seed: bool,

        /// Only generate these sounds (repeatable)
        #[arg(long = "only", value_name = "NAME")]
        only: Vec<String>,

        /// Use a named variant for a sound, e.g. hit_body=arcade (repeatable)
        #[arg(long = "variant", value_name = "SOUND=VARIANT", value_parser = parse_variant)]
        variants: Vec<(String, String)>,
    },

    /// List catalog sounds and their variants
    List,
}

fn parse_variant(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((sound, variant)) if !sound.is_empty() && !variant.is_empty() => {
            Ok((sound.to_string(), variant.to_string()))
        }
        _ => Err(format!("expected SOUND=VARIANT, got '{arg}'")),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            output,
            sample_rate,
            seed,
            random_seed,
            only,
            variants,
        } => {
            let mut settings = match &config {
                Some(path) => SynthConfig::load(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => SynthConfig::default(),
            };
            if let Some(output) = output {
                settings.output_dir = output;
            }
            if let Some(rate) = sample_rate {
                settings.sample_rate = rate;
            }
            if let Some(seed) = seed {
                settings.seed = seed;
            }
            if random_seed {
                settings.seed = rand::random::<u64>();
                tracing::info!("Using random seed {}", settings.seed);
            }
            settings.validate()?;

            let mut catalog = Catalog::standard();
            for (sound, variant) in &variants {
                catalog = catalog
                    .with_variant(sound, variant)
                    .with_context(|| format!("Cannot use variant {sound}={variant}"))?;
            }
            if !only.is_empty() {
                catalog = catalog.select(only.as_slice())?;
            }

            let report = generate_catalog(&catalog, &settings).with_context(|| {
                format!(
                    "Failed to create output directory {}",
                    settings.output_dir.display()
                )
            })?;

            println!("\nGenerated {} sound effects!", report.generated.len());

            if !report.is_success() {
                for failure in &report.failures {
                    eprintln!("  {}: {}", failure.name, failure.error);
                }
                bail!("{} sound(s) failed to generate", report.failures.len());
            }
        }
        Commands::List => {
            let catalog = Catalog::standard();
            println!("{} sounds:", catalog.len());
            for sound in catalog.iter() {
                let variants: Vec<_> = presets::variants_of(sound.name).collect();
                if variants.is_empty() {
                    println!("  {:<16} {}", sound.name, sound.description);
                } else {
                    println!(
                        "  {:<16} {} [variants: {}]",
                        sound.name,
                        sound.description,
                        variants.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}
