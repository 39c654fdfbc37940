//! Sound presets for Zombies vs Humans
//!
//! Each function returns the parameter set of one sound. Where more than
//! one design of the same sound exists, every design is kept as a named
//! variant in [`VARIANTS`] and the catalog picks which one ships.

use crate::envelope::Envelope;
use crate::mixer::Modulation;
use crate::noise::NoiseShape;
use crate::oscillator::FrequencyTrajectory;
use crate::patch::{Arpeggio, Gain, NoiseLayer, Patch, Preset, ToneLayer};

/// Alternate design of a catalog sound
#[derive(Debug, Clone, Copy)]
pub struct PresetVariant {
    /// Catalog sound the variant belongs to
    pub sound: &'static str,
    /// Variant name, unique per sound
    pub variant: &'static str,
    pub build: fn() -> Preset,
}

/// Every named variant, default designs included
pub const VARIANTS: &[PresetVariant] = &[
    PresetVariant {
        sound: "hit_body",
        variant: "meaty",
        build: hit_body,
    },
    PresetVariant {
        sound: "hit_body",
        variant: "arcade",
        build: hit_body_arcade,
    },
    PresetVariant {
        sound: "hit_head",
        variant: "crack",
        build: hit_head,
    },
    PresetVariant {
        sound: "hit_head",
        variant: "arcade",
        build: hit_head_arcade,
    },
];

/// Look up a variant by sound and variant name
pub fn variant(sound: &str, variant: &str) -> Option<&'static PresetVariant> {
    VARIANTS
        .iter()
        .find(|v| v.sound == sound && v.variant == variant)
}

/// Variant names available for a sound
pub fn variants_of(sound: &str) -> impl Iterator<Item = &'static str> + '_ {
    VARIANTS
        .iter()
        .filter(move |v| v.sound == sound)
        .map(|v| v.variant)
}

// ============================================================================
// COMBAT
// ============================================================================

/// Meaty thud for a body hit
pub fn hit_body() -> Preset {
    Patch::new(0.2)
        // Deep punch
        .tone(ToneLayer::decaying(50.0, 1.0, 25.0))
        .tone(ToneLayer::decaying(80.0, 0.7, 30.0))
        // Mid impact
        .tone(ToneLayer::decaying(120.0, 0.5, 40.0))
        // Flesh slap
        .noise(NoiseLayer::burst(0.4, 50.0).shaped(NoiseShape::LowPass { window: 11 }))
        .into()
}

/// Short pitched-down thump, closer to classic arcade hit sounds
pub fn hit_body_arcade() -> Preset {
    Patch::new(0.15)
        .tone(ToneLayer::sweep(200.0, 80.0, 1.0, 35.0))
        .noise(NoiseLayer::burst(0.6, 40.0).shaped(NoiseShape::LowPass { window: 7 }))
        .noise(NoiseLayer::burst(0.3, 80.0).shaped(NoiseShape::HighPass { window: 9 }))
        .into()
}

/// Sharp crack and ping for a headshot
pub fn hit_head() -> Preset {
    Patch::new(0.25)
        // Metallic ping
        .tone(ToneLayer::decaying(1800.0, 1.0, 35.0))
        .tone(ToneLayer::decaying(2400.0, 0.5, 45.0))
        // Crack
        .tone(ToneLayer::decaying(600.0, 0.6, 50.0))
        // Sub punch
        .tone(ToneLayer::decaying(80.0, 0.4, 30.0))
        .noise(NoiseLayer::burst(0.5, 60.0))
        .into()
}

/// Bright falling blip with a hard transient
pub fn hit_head_arcade() -> Preset {
    Patch::new(0.15)
        .tone(ToneLayer::sweep(1600.0, 700.0, 1.0, 40.0))
        .tone(ToneLayer::decaying(120.0, 0.4, 35.0))
        .noise(NoiseLayer::burst(0.4, 90.0).shaped(NoiseShape::HighPass { window: 5 }))
        .into()
}

/// Headshot kill: crack, wet descending splat, sub-bass and sizzle
pub fn headshot_kill() -> Preset {
    Patch::new(0.5)
        // Initial crack
        .tone(ToneLayer::decaying(800.0, 1.0, 80.0))
        .tone(ToneLayer::decaying(2000.0, 0.6, 100.0))
        // Descending splat
        .tone(ToneLayer::sweep(400.0, 100.0, 0.5, 12.0))
        // Sub-bass impact
        .tone(ToneLayer::decaying(40.0, 0.7, 8.0))
        .tone(ToneLayer::decaying(60.0, 0.5, 10.0))
        // Wet burst
        .noise(NoiseLayer::burst(0.8, 20.0).shaped(NoiseShape::LowPass { window: 5 }))
        // Spray
        .noise(NoiseLayer::burst(0.3, 25.0).shaped(NoiseShape::HighPass { window: 21 }))
        .into()
}

pub fn pistol_fire() -> Preset {
    Patch::new(0.2)
        .tone(ToneLayer::decaying(100.0, 0.5, 20.0))
        .noise(NoiseLayer::burst(0.8, 30.0))
        .into()
}

/// Magazine click over a sliding noise bed
pub fn reload() -> Preset {
    Patch::new(0.3)
        .tone(ToneLayer::decaying(1000.0, 0.3, 100.0))
        .noise(NoiseLayer {
            amplitude: 0.4,
            gain: Gain::Envelope(Envelope::slide()),
            shape: NoiseShape::Raw,
        })
        .into()
}

pub fn empty_clip() -> Preset {
    Patch::new(0.08)
        .tone(ToneLayer::decaying(800.0, 1.0, 80.0))
        .into()
}

pub fn weapon_switch() -> Preset {
    Patch::new(0.12)
        .tone(ToneLayer::decaying(400.0, 1.0, 40.0))
        .noise(NoiseLayer::burst(0.3, 50.0))
        .into()
}

// ============================================================================
// ZOMBIES
// ============================================================================

/// Falling moan with a breathy bed
pub fn zombie_spawn() -> Preset {
    Patch::new(0.4)
        .tone(ToneLayer {
            frequency: FrequencyTrajectory::Linear {
                start: 300.0,
                end: 80.0,
            },
            amplitude: 1.0,
            gain: Gain::Envelope(Envelope::swell()),
        })
        .noise(NoiseLayer {
            amplitude: 0.2,
            gain: Gain::Envelope(Envelope::breath()),
            shape: NoiseShape::Raw,
        })
        .into()
}

/// Big zombie roar: harmonic stack with a 15 Hz growl
pub fn tank_roar() -> Preset {
    const BASE_HZ: f32 = 60.0;
    let growl = Gain::Envelope(Envelope::growl());

    let mut patch = Patch::new(0.8).tone(ToneLayer {
        frequency: FrequencyTrajectory::Constant(BASE_HZ),
        amplitude: 1.0,
        gain: growl,
    });
    for harmonic in [2.0, 3.0, 4.0] {
        patch = patch.tone(ToneLayer {
            frequency: FrequencyTrajectory::Constant(BASE_HZ * harmonic),
            amplitude: 0.5 / harmonic,
            gain: growl,
        });
    }

    patch
        .modulate(Modulation::Tremolo {
            rate_hz: 15.0,
            depth: 0.3,
        })
        .noise(NoiseLayer {
            amplitude: 0.3,
            gain: growl,
            shape: NoiseShape::Raw,
        })
        .into()
}

// ============================================================================
// PLAYER
// ============================================================================

pub fn footstep() -> Preset {
    Patch::new(0.1)
        .tone(ToneLayer::decaying(100.0, 1.0, 50.0))
        .noise(NoiseLayer::burst(0.2, 60.0))
        .into()
}

pub fn player_hurt() -> Preset {
    Patch::new(0.25)
        .tone(ToneLayer::decaying(150.0, 1.0, 15.0))
        .tone(ToneLayer::decaying(225.0, 0.3, 20.0))
        .noise(NoiseLayer::burst(0.2, 25.0))
        .into()
}

/// Slow downward slide
pub fn player_down() -> Preset {
    Patch::new(0.6)
        .tone(ToneLayer::sweep(400.0, 100.0, 1.0, 4.0))
        .into()
}

/// Pulsing beep while a teammate is being revived
pub fn player_revive() -> Preset {
    Patch::new(0.4)
        .tone(ToneLayer::decaying(500.0, 0.5, 3.0))
        .modulate(Modulation::PulseGate { rate_hz: 5.0 })
        .into()
}

pub fn player_revived() -> Preset {
    Patch::new(0.3)
        .tone(ToneLayer::sweep(300.0, 600.0, 1.0, 6.0))
        .into()
}

pub fn jump() -> Preset {
    Patch::new(0.12)
        .tone(ToneLayer::sweep(100.0, 250.0, 1.0, 30.0))
        .noise(NoiseLayer::burst(0.2, 40.0))
        .into()
}

/// Higher whoosh with a little sparkle
pub fn double_jump() -> Preset {
    Patch::new(0.15)
        .tone(ToneLayer::sweep(200.0, 500.0, 1.0, 25.0))
        .tone(ToneLayer::decaying(1200.0, 0.2, 50.0))
        .noise(NoiseLayer::burst(0.4, 30.0).shaped(NoiseShape::HighPass { window: 31 }))
        .into()
}

// ============================================================================
// UI / ROUND
// ============================================================================

/// Rising A-major fanfare
pub fn round_start() -> Preset {
    Arpeggio {
        duration: 0.5,
        notes: vec![440.0, 554.0, 659.0],
        note_length: 0.15,
        decay: 5.0,
        overtones: vec![(2.0, 0.3)],
    }
    .into()
}

pub fn purchase() -> Preset {
    Patch::new(0.2)
        .tone(ToneLayer::decaying(880.0, 1.0, 15.0))
        .tone(ToneLayer::decaying(1100.0, 0.5, 18.0))
        .into()
}

pub fn denied() -> Preset {
    Patch::new(0.2)
        .tone(ToneLayer::decaying(200.0, 1.0, 15.0))
        .tone(ToneLayer::decaying(250.0, 0.5, 18.0))
        .into()
}

pub fn points_gain() -> Preset {
    Patch::new(0.12)
        .tone(ToneLayer::decaying(600.0, 1.0, 25.0))
        .into()
}
