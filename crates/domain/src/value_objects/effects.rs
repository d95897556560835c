//! Ambient visual effects: particle systems and weather.
//!
//! Both enums carry an explicit `None` variant so the specification always
//! holds a valid value; "no effect" is a choice, not an absence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Particle system attached to the game scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParticleType {
    #[default]
    None,
    Sparkle,
    Fire,
    Smoke,
    Dust,
    Bubbles,
    Leaves,
    Fireflies,
    Snowflakes,
    Confetti,
}

impl ParticleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticleType::None => "none",
            ParticleType::Sparkle => "sparkle",
            ParticleType::Fire => "fire",
            ParticleType::Smoke => "smoke",
            ParticleType::Dust => "dust",
            ParticleType::Bubbles => "bubbles",
            ParticleType::Leaves => "leaves",
            ParticleType::Fireflies => "fireflies",
            ParticleType::Snowflakes => "snowflakes",
            ParticleType::Confetti => "confetti",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ParticleType::None)
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ParticleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(ParticleType::None),
            "sparkle" => Ok(ParticleType::Sparkle),
            "fire" => Ok(ParticleType::Fire),
            "smoke" => Ok(ParticleType::Smoke),
            "dust" => Ok(ParticleType::Dust),
            "bubbles" => Ok(ParticleType::Bubbles),
            "leaves" => Ok(ParticleType::Leaves),
            "fireflies" => Ok(ParticleType::Fireflies),
            "snowflakes" => Ok(ParticleType::Snowflakes),
            "confetti" => Ok(ParticleType::Confetti),
            _ => Err(DomainError::parse(format!("Unknown particle type: {}", s))),
        }
    }
}

/// Weather layered over the game scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherType {
    #[default]
    None,
    Rain,
    Snow,
    Fog,
    Storm,
    Sandstorm,
}

impl WeatherType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherType::None => "none",
            WeatherType::Rain => "rain",
            WeatherType::Snow => "snow",
            WeatherType::Fog => "fog",
            WeatherType::Storm => "storm",
            WeatherType::Sandstorm => "sandstorm",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, WeatherType::None)
    }
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WeatherType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(WeatherType::None),
            "rain" => Ok(WeatherType::Rain),
            "snow" => Ok(WeatherType::Snow),
            "fog" => Ok(WeatherType::Fog),
            "storm" => Ok(WeatherType::Storm),
            "sandstorm" => Ok(WeatherType::Sandstorm),
            _ => Err(DomainError::parse(format!("Unknown weather: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_the_default_and_round_trips_through_str() {
        assert!(ParticleType::default().is_none());
        assert!(WeatherType::default().is_none());
        assert_eq!("none".parse::<ParticleType>().unwrap(), ParticleType::None);
        assert_eq!("Fog".parse::<WeatherType>().unwrap(), WeatherType::Fog);
        assert!("lava".parse::<WeatherType>().is_err());
    }
}
