//! Game genres supported by the project generator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Genre of the game being specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    /// Side-scrolling run and jump
    #[default]
    Platformer,
    /// World seen from above, RPG style
    #[serde(alias = "top_down")]
    Topdown,
    /// Shoot-em-up action
    Shooter,
    Puzzle,
    /// Story told through characters and choices
    VisualNovel,
    Racing,
}

impl Genre {
    /// All genres in menu order
    pub fn all() -> &'static [Genre] {
        &[
            Genre::Platformer,
            Genre::Topdown,
            Genre::Shooter,
            Genre::Puzzle,
            Genre::VisualNovel,
            Genre::Racing,
        ]
    }

    /// Human-facing label used in replies
    pub fn display_name(&self) -> &'static str {
        match self {
            Genre::Platformer => "2D Platformer",
            Genre::Topdown => "Top-Down Adventure",
            Genre::Shooter => "Space Shooter",
            Genre::Puzzle => "Puzzle Game",
            Genre::VisualNovel => "Visual Novel",
            Genre::Racing => "Racing Game",
        }
    }

    /// Stable wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Platformer => "platformer",
            Genre::Topdown => "topdown",
            Genre::Shooter => "shooter",
            Genre::Puzzle => "puzzle",
            Genre::VisualNovel => "visual_novel",
            Genre::Racing => "racing",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Genre {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "platformer" => Ok(Genre::Platformer),
            "topdown" | "top_down" => Ok(Genre::Topdown),
            "shooter" => Ok(Genre::Shooter),
            "puzzle" => Ok(Genre::Puzzle),
            "visual_novel" | "visualnovel" => Ok(Genre::VisualNovel),
            "racing" => Ok(Genre::Racing),
            _ => Err(DomainError::parse(format!("Unknown genre: {}", s))),
        }
    }
}
