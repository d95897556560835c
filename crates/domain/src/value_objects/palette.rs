//! Color palette value objects.
//!
//! Colors are stored as `#rrggbb` strings so they can be written straight into
//! generated project files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five color slots of a game specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    /// Player sprite
    Primary,
    /// Enemies and hazards
    Secondary,
    /// UI highlights and pickups
    Accent,
    Background,
    /// Terrain and platforms
    Ground,
}

impl ColorRole {
    pub fn all() -> &'static [ColorRole] {
        &[
            ColorRole::Primary,
            ColorRole::Secondary,
            ColorRole::Accent,
            ColorRole::Background,
            ColorRole::Ground,
        ]
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Background => "background",
            ColorRole::Ground => "ground",
        };
        f.write_str(name)
    }
}

/// A complete five-slot palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalettePreset {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub ground: &'static str,
}

impl PalettePreset {
    pub fn get(&self, role: ColorRole) -> &'static str {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Background => self.background,
            ColorRole::Ground => self.ground,
        }
    }
}

/// Palette used by a fresh specification.
pub const DEFAULT_PALETTE: PalettePreset = PalettePreset {
    primary: "#4a90d9",
    secondary: "#d94a4a",
    accent: "#f5c542",
    background: "#1a1a2e",
    ground: "#3d2b1f",
};

/// Named palettes, in lookup order. The first keyword found in a message wins.
pub const PALETTE_PRESETS: &[(&str, PalettePreset)] = &[
    (
        "neon",
        PalettePreset {
            primary: "#ff2fd6",
            secondary: "#00f0ff",
            accent: "#f9f871",
            background: "#0d0221",
            ground: "#261447",
        },
    ),
    (
        "pastel",
        PalettePreset {
            primary: "#a0c4ff",
            secondary: "#ffadad",
            accent: "#fdffb6",
            background: "#fffaf0",
            ground: "#caffbf",
        },
    ),
    (
        "monochrome",
        PalettePreset {
            primary: "#f0f0f0",
            secondary: "#7a7a7a",
            accent: "#c0c0c0",
            background: "#121212",
            ground: "#3a3a3a",
        },
    ),
    (
        "grayscale",
        PalettePreset {
            primary: "#f0f0f0",
            secondary: "#7a7a7a",
            accent: "#c0c0c0",
            background: "#121212",
            ground: "#3a3a3a",
        },
    ),
    (
        "sunset",
        PalettePreset {
            primary: "#ffb347",
            secondary: "#c0392b",
            accent: "#ffd700",
            background: "#2c1a3d",
            ground: "#6b3e26",
        },
    ),
    (
        "earthy",
        PalettePreset {
            primary: "#6b8e23",
            secondary: "#8b4513",
            accent: "#daa520",
            background: "#87ceeb",
            ground: "#5c4033",
        },
    ),
    (
        "icy",
        PalettePreset {
            primary: "#e0f7ff",
            secondary: "#1e6091",
            accent: "#9be7ff",
            background: "#0b2545",
            ground: "#cfe8f3",
        },
    ),
    (
        "8-bit",
        PalettePreset {
            primary: "#3cbcfc",
            secondary: "#f83800",
            accent: "#fce0a8",
            background: "#000000",
            ground: "#ac7c00",
        },
    ),
];

/// Plain color names, in lookup order, for role-specific phrases such as
/// "red enemies" or "purple background".
pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#d94a4a"),
    ("crimson", "#b0102a"),
    ("orange", "#f28c28"),
    ("yellow", "#f5d442"),
    ("gold", "#ffd700"),
    ("green", "#3cb44b"),
    ("emerald", "#2ecc71"),
    ("teal", "#008080"),
    ("cyan", "#00e5ff"),
    ("blue", "#4a90d9"),
    ("navy", "#1b2a4e"),
    ("purple", "#8e44ad"),
    ("violet", "#9b59b6"),
    ("pink", "#ff69b4"),
    ("brown", "#8b5a2b"),
    ("black", "#101010"),
    ("white", "#f5f5f5"),
    ("gray", "#808080"),
    ("grey", "#808080"),
];

/// Nouns that bind a color name to a role, e.g. "green" + "terrain".
pub const ROLE_NOUNS: &[(ColorRole, &str)] = &[
    (ColorRole::Primary, r"(?:player|hero|character|protagonist)"),
    (ColorRole::Secondary, r"(?:enem(?:y|ies)|monsters?|villains?)"),
    (ColorRole::Accent, r"(?:accents?|highlights?|ui|hud)"),
    (ColorRole::Background, r"(?:background|backdrop|sky)"),
    (ColorRole::Ground, r"(?:ground|terrain|floor|platforms?)"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_hex_colors() {
        let is_hex = |c: &str| c.len() == 7 && c.starts_with('#');
        for (_, preset) in PALETTE_PRESETS {
            for role in ColorRole::all() {
                assert!(is_hex(preset.get(*role)));
            }
        }
        for (_, hex) in NAMED_COLORS {
            assert!(is_hex(hex));
        }
    }

    #[test]
    fn every_role_has_a_noun_pattern() {
        for role in ColorRole::all() {
            assert!(ROLE_NOUNS.iter().any(|(r, _)| r == role));
        }
    }
}
