//! GameSpecification aggregate and the partial updates applied to it.
//!
//! Every field has a total default. Extraction never produces an invalid enum
//! value: a keyword that maps to nothing simply leaves the field out of the
//! [`SpecUpdate`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{ColorRole, Difficulty, Genre, ParticleType, WeatherType, DEFAULT_PALETTE};

/// Boolean feature toggles of a game specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    Enemies,
    Collectibles,
    Powerups,
    Dialogue,
    Particles,
    ParallaxBackground,
}

impl FeatureFlag {
    pub fn all() -> &'static [FeatureFlag] {
        &[
            FeatureFlag::Enemies,
            FeatureFlag::Collectibles,
            FeatureFlag::Powerups,
            FeatureFlag::Dialogue,
            FeatureFlag::Particles,
            FeatureFlag::ParallaxBackground,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureFlag::Enemies => "Enemies",
            FeatureFlag::Collectibles => "Collectibles",
            FeatureFlag::Powerups => "Power-ups",
            FeatureFlag::Dialogue => "Dialogue/Story",
            FeatureFlag::Particles => "Particles",
            FeatureFlag::ParallaxBackground => "Parallax background",
        }
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Everything learned so far about the game to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSpecification {
    pub name: String,
    pub genre: Genre,
    /// Title-cased theme, e.g. "Sci Fi"
    pub theme: String,
    pub player_name: String,
    pub has_enemies: bool,
    pub has_collectibles: bool,
    pub has_powerups: bool,
    pub has_dialogue: bool,
    pub has_particles: bool,
    pub has_parallax_background: bool,
    pub difficulty: Difficulty,
    pub particle_type: ParticleType,
    pub weather: WeatherType,
    pub color_primary: String,
    pub color_secondary: String,
    pub color_accent: String,
    pub color_background: String,
    pub color_ground: String,
    /// Latest long-form description, verbatim
    pub description: String,
}

impl Default for GameSpecification {
    fn default() -> Self {
        Self {
            name: "My Game".to_string(),
            genre: Genre::Platformer,
            theme: "Fantasy".to_string(),
            player_name: "Hero".to_string(),
            has_enemies: true,
            has_collectibles: true,
            has_powerups: false,
            has_dialogue: false,
            has_particles: false,
            has_parallax_background: false,
            difficulty: Difficulty::Normal,
            particle_type: ParticleType::None,
            weather: WeatherType::None,
            color_primary: DEFAULT_PALETTE.primary.to_string(),
            color_secondary: DEFAULT_PALETTE.secondary.to_string(),
            color_accent: DEFAULT_PALETTE.accent.to_string(),
            color_background: DEFAULT_PALETTE.background.to_string(),
            color_ground: DEFAULT_PALETTE.ground.to_string(),
            description: String::new(),
        }
    }
}

impl GameSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::Enemies => self.has_enemies,
            FeatureFlag::Collectibles => self.has_collectibles,
            FeatureFlag::Powerups => self.has_powerups,
            FeatureFlag::Dialogue => self.has_dialogue,
            FeatureFlag::Particles => self.has_particles,
            FeatureFlag::ParallaxBackground => self.has_parallax_background,
        }
    }

    pub fn color(&self, role: ColorRole) -> &str {
        match role {
            ColorRole::Primary => &self.color_primary,
            ColorRole::Secondary => &self.color_secondary,
            ColorRole::Accent => &self.color_accent,
            ColorRole::Background => &self.color_background,
            ColorRole::Ground => &self.color_ground,
        }
    }

    /// Enabled feature flags, in declaration order.
    pub fn enabled_features(&self) -> Vec<FeatureFlag> {
        FeatureFlag::all()
            .iter()
            .copied()
            .filter(|flag| self.has(*flag))
            .collect()
    }

    fn set_flag(&mut self, flag: FeatureFlag, value: bool) {
        match flag {
            FeatureFlag::Enemies => self.has_enemies = value,
            FeatureFlag::Collectibles => self.has_collectibles = value,
            FeatureFlag::Powerups => self.has_powerups = value,
            FeatureFlag::Dialogue => self.has_dialogue = value,
            FeatureFlag::Particles => self.has_particles = value,
            FeatureFlag::ParallaxBackground => self.has_parallax_background = value,
        }
    }

    fn set_color(&mut self, role: ColorRole, hex: String) {
        match role {
            ColorRole::Primary => self.color_primary = hex,
            ColorRole::Secondary => self.color_secondary = hex,
            ColorRole::Accent => self.color_accent = hex,
            ColorRole::Background => self.color_background = hex,
            ColorRole::Ground => self.color_ground = hex,
        }
    }
}

/// A partial set of field updates. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_enemies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_collectibles: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_powerups: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_dialogue: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_particles: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_parallax_background: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_type: Option<ParticleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_ground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SpecUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn flag(&self, flag: FeatureFlag) -> Option<bool> {
        match flag {
            FeatureFlag::Enemies => self.has_enemies,
            FeatureFlag::Collectibles => self.has_collectibles,
            FeatureFlag::Powerups => self.has_powerups,
            FeatureFlag::Dialogue => self.has_dialogue,
            FeatureFlag::Particles => self.has_particles,
            FeatureFlag::ParallaxBackground => self.has_parallax_background,
        }
    }

    pub fn set_flag(&mut self, flag: FeatureFlag, value: bool) {
        let slot = match flag {
            FeatureFlag::Enemies => &mut self.has_enemies,
            FeatureFlag::Collectibles => &mut self.has_collectibles,
            FeatureFlag::Powerups => &mut self.has_powerups,
            FeatureFlag::Dialogue => &mut self.has_dialogue,
            FeatureFlag::Particles => &mut self.has_particles,
            FeatureFlag::ParallaxBackground => &mut self.has_parallax_background,
        };
        *slot = Some(value);
    }

    pub fn color(&self, role: ColorRole) -> Option<&str> {
        match role {
            ColorRole::Primary => self.color_primary.as_deref(),
            ColorRole::Secondary => self.color_secondary.as_deref(),
            ColorRole::Accent => self.color_accent.as_deref(),
            ColorRole::Background => self.color_background.as_deref(),
            ColorRole::Ground => self.color_ground.as_deref(),
        }
    }

    pub fn set_color(&mut self, role: ColorRole, hex: impl Into<String>) {
        let slot = match role {
            ColorRole::Primary => &mut self.color_primary,
            ColorRole::Secondary => &mut self.color_secondary,
            ColorRole::Accent => &mut self.color_accent,
            ColorRole::Background => &mut self.color_background,
            ColorRole::Ground => &mut self.color_ground,
        };
        *slot = Some(hex.into());
    }

    /// Names of the fields this update touches, for logging.
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.genre.is_some() {
            fields.push("genre");
        }
        if self.theme.is_some() {
            fields.push("theme");
        }
        if self.player_name.is_some() {
            fields.push("player_name");
        }
        for flag in FeatureFlag::all() {
            if self.flag(*flag).is_some() {
                fields.push(flag_field_name(*flag));
            }
        }
        if self.difficulty.is_some() {
            fields.push("difficulty");
        }
        if self.particle_type.is_some() {
            fields.push("particle_type");
        }
        if self.weather.is_some() {
            fields.push("weather");
        }
        for role in ColorRole::all() {
            if self.color(*role).is_some() {
                fields.push(color_field_name(*role));
            }
        }
        if self.description.is_some() {
            fields.push("description");
        }
        fields
    }

    /// Write every present field into `spec`.
    pub fn apply_to(&self, spec: &mut GameSpecification) {
        if let Some(name) = &self.name {
            spec.name = name.clone();
        }
        if let Some(genre) = self.genre {
            spec.genre = genre;
        }
        if let Some(theme) = &self.theme {
            spec.theme = theme.clone();
        }
        if let Some(player_name) = &self.player_name {
            spec.player_name = player_name.clone();
        }
        for flag in FeatureFlag::all() {
            if let Some(value) = self.flag(*flag) {
                spec.set_flag(*flag, value);
            }
        }
        if let Some(difficulty) = self.difficulty {
            spec.difficulty = difficulty;
        }
        if let Some(particle_type) = self.particle_type {
            spec.particle_type = particle_type;
        }
        if let Some(weather) = self.weather {
            spec.weather = weather;
        }
        for role in ColorRole::all() {
            if let Some(hex) = self.color(*role) {
                spec.set_color(*role, hex.to_string());
            }
        }
        if let Some(description) = &self.description {
            spec.description = description.clone();
        }
    }

    /// The update that turns `before` into `after`, touching only fields that differ.
    pub fn between(before: &GameSpecification, after: &GameSpecification) -> Self {
        fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
            (before != after).then(|| after.clone())
        }

        let mut update = SpecUpdate {
            name: changed(&before.name, &after.name),
            genre: changed(&before.genre, &after.genre),
            theme: changed(&before.theme, &after.theme),
            player_name: changed(&before.player_name, &after.player_name),
            difficulty: changed(&before.difficulty, &after.difficulty),
            particle_type: changed(&before.particle_type, &after.particle_type),
            weather: changed(&before.weather, &after.weather),
            description: changed(&before.description, &after.description),
            ..SpecUpdate::default()
        };
        for flag in FeatureFlag::all() {
            if before.has(*flag) != after.has(*flag) {
                update.set_flag(*flag, after.has(*flag));
            }
        }
        for role in ColorRole::all() {
            if before.color(*role) != after.color(*role) {
                update.set_color(*role, after.color(*role));
            }
        }
        update
    }
}

fn flag_field_name(flag: FeatureFlag) -> &'static str {
    match flag {
        FeatureFlag::Enemies => "has_enemies",
        FeatureFlag::Collectibles => "has_collectibles",
        FeatureFlag::Powerups => "has_powerups",
        FeatureFlag::Dialogue => "has_dialogue",
        FeatureFlag::Particles => "has_particles",
        FeatureFlag::ParallaxBackground => "has_parallax_background",
    }
}

fn color_field_name(role: ColorRole) -> &'static str {
    match role {
        ColorRole::Primary => "color_primary",
        ColorRole::Secondary => "color_secondary",
        ColorRole::Accent => "color_accent",
        ColorRole::Background => "color_background",
        ColorRole::Ground => "color_ground",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_leaves_spec_untouched() {
        let mut spec = GameSpecification::default();
        let before = spec.clone();
        let update = SpecUpdate::default();
        assert!(update.is_empty());
        update.apply_to(&mut spec);
        assert_eq!(spec, before);
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut spec = GameSpecification::default();
        let mut update = SpecUpdate {
            genre: Some(Genre::Racing),
            theme: Some("Neon".to_string()),
            ..SpecUpdate::default()
        };
        update.set_flag(FeatureFlag::Enemies, false);
        update.set_color(ColorRole::Background, "#000000");
        update.apply_to(&mut spec);

        assert_eq!(spec.genre, Genre::Racing);
        assert_eq!(spec.theme, "Neon");
        assert!(!spec.has_enemies);
        assert!(spec.has_collectibles);
        assert_eq!(spec.color_background, "#000000");
        assert_eq!(spec.name, "My Game");
    }

    #[test]
    fn between_reproduces_the_target_spec() {
        let before = GameSpecification::default();
        let mut after = before.clone();
        after.name = "Star Drift".to_string();
        after.has_powerups = true;
        after.weather = WeatherType::Storm;
        after.color_accent = "#ffffff".to_string();

        let update = SpecUpdate::between(&before, &after);
        assert_eq!(
            update.touched_fields(),
            vec!["name", "has_powerups", "weather", "color_accent"]
        );

        let mut replayed = before.clone();
        update.apply_to(&mut replayed);
        assert_eq!(replayed, after);
    }

    #[test]
    fn between_identical_specs_is_empty() {
        let spec = GameSpecification::default();
        assert!(SpecUpdate::between(&spec, &spec).is_empty());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let spec: GameSpecification =
            serde_json::from_str(r#"{"genre":"shooter","has_enemies":false}"#).unwrap();
        assert_eq!(spec.genre, Genre::Shooter);
        assert!(!spec.has_enemies);
        assert_eq!(spec.player_name, "Hero");
    }
}
