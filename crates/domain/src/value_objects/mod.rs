//! Value objects of the game specification.

mod difficulty;
mod effects;
mod genre;
mod palette;

pub use difficulty::Difficulty;
pub use effects::{ParticleType, WeatherType};
pub use genre::Genre;
pub use palette::{
    ColorRole, PalettePreset, DEFAULT_PALETTE, NAMED_COLORS, PALETTE_PRESETS, ROLE_NOUNS,
};
