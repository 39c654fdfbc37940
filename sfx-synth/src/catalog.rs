//! Named sound catalog
//!
//! Maps every sound the game loads to the preset that produces it. The
//! catalog is plain data: descriptors hold a name, a description and a
//! function pointer, nothing mutable.

use tracing::debug;

use crate::config::SynthConfig;
use crate::error::{Result, SynthError};
use crate::noise::NoiseGenerator;
use crate::patch::Preset;
use crate::presets;
use crate::quantize::normalize_and_quantize;

/// One catalog entry
#[derive(Debug, Clone, Copy)]
pub struct SoundDescriptor {
    /// Unique name, also the output file stem
    pub name: &'static str,
    pub description: &'static str,
    pub preset: fn() -> Preset,
}

/// A finished sound, ready for the WAV encoder
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSound {
    pub name: &'static str,
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl RenderedSound {
    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

impl SoundDescriptor {
    /// Render the sound to PCM
    ///
    /// Noise is seeded from `config.seed` and the sound name, so the same
    /// configuration always yields the same samples.
    pub fn render(&self, config: &SynthConfig) -> Result<RenderedSound> {
        let preset = (self.preset)();
        let mut generator = NoiseGenerator::seeded(config.seed_for(self.name));
        let buffer = preset.render(config.sample_rate, &mut generator)?;
        let samples = normalize_and_quantize(&buffer)?;

        debug!(
            sound = self.name,
            samples = samples.len(),
            sample_rate = config.sample_rate,
            "rendered"
        );

        Ok(RenderedSound {
            name: self.name,
            sample_rate: config.sample_rate,
            samples,
        })
    }
}

/// Ordered set of sound descriptors with unique names
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<SoundDescriptor>,
}

/// Sounds shipped with the game
const STANDARD: &[SoundDescriptor] = &[
    // Combat
    SoundDescriptor {
        name: "hit_body",
        description: "Meaty thud for body hit",
        preset: presets::hit_body,
    },
    SoundDescriptor {
        name: "hit_head",
        description: "Sharp crack/ping for headshot hit",
        preset: presets::hit_head,
    },
    SoundDescriptor {
        name: "headshot_kill",
        description: "Dramatic headshot kill splat",
        preset: presets::headshot_kill,
    },
    SoundDescriptor {
        name: "pistol_fire",
        description: "Gunshot",
        preset: presets::pistol_fire,
    },
    SoundDescriptor {
        name: "reload",
        description: "Reload click and slide",
        preset: presets::reload,
    },
    SoundDescriptor {
        name: "empty_clip",
        description: "Empty gun click",
        preset: presets::empty_clip,
    },
    SoundDescriptor {
        name: "weapon_switch",
        description: "Weapon switch",
        preset: presets::weapon_switch,
    },
    // Zombies
    SoundDescriptor {
        name: "zombie_spawn",
        description: "Zombie spawning moan",
        preset: presets::zombie_spawn,
    },
    SoundDescriptor {
        name: "tank_roar",
        description: "Big zombie roar",
        preset: presets::tank_roar,
    },
    // Player
    SoundDescriptor {
        name: "footstep",
        description: "Footstep",
        preset: presets::footstep,
    },
    SoundDescriptor {
        name: "player_hurt",
        description: "Player taking damage",
        preset: presets::player_hurt,
    },
    SoundDescriptor {
        name: "player_down",
        description: "Player going down",
        preset: presets::player_down,
    },
    SoundDescriptor {
        name: "player_revive",
        description: "Reviving - pulsing beep",
        preset: presets::player_revive,
    },
    SoundDescriptor {
        name: "player_revived",
        description: "Successfully revived",
        preset: presets::player_revived,
    },
    SoundDescriptor {
        name: "jump",
        description: "Jump",
        preset: presets::jump,
    },
    SoundDescriptor {
        name: "double_jump",
        description: "Double jump whoosh",
        preset: presets::double_jump,
    },
    // UI / round
    SoundDescriptor {
        name: "round_start",
        description: "Round start fanfare",
        preset: presets::round_start,
    },
    SoundDescriptor {
        name: "purchase",
        description: "Purchase",
        preset: presets::purchase,
    },
    SoundDescriptor {
        name: "denied",
        description: "Action denied",
        preset: presets::denied,
    },
    SoundDescriptor {
        name: "points_gain",
        description: "Points earned",
        preset: presets::points_gain,
    },
];

impl Catalog {
    /// Every sound the game ships
    pub fn standard() -> Self {
        Self {
            entries: STANDARD.to_vec(),
        }
    }

    /// Build a catalog from custom descriptors
    ///
    /// # Errors
    /// `InvalidParameter` if two descriptors share a name.
    pub fn new(entries: Vec<SoundDescriptor>) -> Result<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.name == entry.name) {
                return Err(SynthError::InvalidParameter(format!(
                    "duplicate sound name '{}'",
                    entry.name
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&SoundDescriptor> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundDescriptor> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[SoundDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the named sounds, in catalog order
    ///
    /// # Errors
    /// `UnknownSound` for the first name not in the catalog.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        if let Some(missing) = names.iter().find(|n| self.get(n.as_ref()).is_none()) {
            return Err(SynthError::UnknownSound(missing.as_ref().to_string()));
        }
        Ok(Self {
            entries: self
                .entries
                .iter()
                .filter(|e| names.iter().any(|n| n.as_ref() == e.name))
                .copied()
                .collect(),
        })
    }

    /// Swap a sound's preset for one of its named variants
    ///
    /// # Errors
    /// `UnknownSound` if the sound is not in the catalog, `UnknownVariant`
    /// if the sound has no variant with that name.
    pub fn with_variant(mut self, sound: &str, variant: &str) -> Result<Self> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == sound)
            .ok_or_else(|| SynthError::UnknownSound(sound.to_string()))?;
        let chosen =
            presets::variant(sound, variant).ok_or_else(|| SynthError::UnknownVariant {
                sound: sound.to_string(),
                variant: variant.to_string(),
            })?;

        entry.preset = chosen.build;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patch;

    #[test]
    fn test_standard_catalog() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 20);
        assert!(!catalog.is_empty());
        assert!(Catalog::new(catalog.entries().to_vec()).is_ok());

        for name in [
            "hit_body",
            "hit_head",
            "headshot_kill",
            "footstep",
            "round_start",
            "zombie_spawn",
            "tank_roar",
            "pistol_fire",
            "reload",
            "empty_clip",
            "player_hurt",
            "purchase",
            "denied",
            "points_gain",
            "weapon_switch",
            "player_down",
            "player_revive",
            "player_revived",
            "jump",
            "double_jump",
        ] {
            assert!(catalog.get(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let jump = *Catalog::standard().get("jump").unwrap();
        assert!(matches!(
            Catalog::new(vec![jump, jump]),
            Err(SynthError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_render_lengths() {
        let config = SynthConfig::default();
        let catalog = Catalog::standard();

        let hit = catalog.get("hit_body").unwrap().render(&config).unwrap();
        assert_eq!(hit.samples.len(), 8820);
        assert_eq!(hit.sample_rate, 44100);
        assert!((hit.duration() - 0.2).abs() < 1e-4);

        let click = catalog.get("empty_clip").unwrap().render(&config).unwrap();
        assert_eq!(click.samples.len(), 3528);
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = SynthConfig::default();
        let catalog = Catalog::standard();
        let descriptor = catalog.get("headshot_kill").unwrap();
        assert_eq!(
            descriptor.render(&config).unwrap(),
            descriptor.render(&config).unwrap()
        );
    }

    #[test]
    fn test_select() {
        let catalog = Catalog::standard();
        let picked = catalog.select(&["jump", "hit_body"]).unwrap();
        let names: Vec<_> = picked.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["hit_body", "jump"]);

        assert_eq!(
            catalog.select(&["jump", "moonwalk"]).unwrap_err(),
            SynthError::UnknownSound("moonwalk".to_string())
        );
    }

    #[test]
    fn test_with_variant() {
        let catalog = Catalog::standard()
            .with_variant("hit_body", "arcade")
            .unwrap();
        let preset = (catalog.get("hit_body").unwrap().preset)();
        assert_eq!(preset, presets::hit_body_arcade());

        assert!(matches!(
            Catalog::standard().with_variant("hit_body", "soggy"),
            Err(SynthError::UnknownVariant { .. })
        ));
        assert!(matches!(
            Catalog::standard().with_variant("moonwalk", "arcade"),
            Err(SynthError::UnknownSound(_))
        ));
    }

    #[test]
    fn test_render_propagates_invalid_preset() {
        fn broken() -> Preset {
            Patch::new(-1.0).into()
        }
        let descriptor = SoundDescriptor {
            name: "broken",
            description: "Negative duration",
            preset: broken,
        };
        assert!(matches!(
            descriptor.render(&SynthConfig::default()),
            Err(SynthError::InvalidParameter(_))
        ));
    }
}
