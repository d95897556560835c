//! Contextual suggestion chips.
//!
//! Steers the user toward richer requests: genre mechanics first, then
//! theme-specific visuals, then generic visual tweaks while details are being
//! gathered.

use serde::{Deserialize, Serialize};

use crate::aggregates::{FeatureFlag, GameSpecification};
use crate::conversation::ConversationState;
use crate::value_objects::Genre;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 6;

/// A short prompt the user could send next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    /// Open tag such as "mechanic" or "particle"; never used for ordering
    pub category: String,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

type Chips = &'static [(&'static str, &'static str)];

const PLATFORMER_FEATURES: Chips = &[
    ("Add double jump", "mechanic"),
    ("Add wall sliding", "mechanic"),
    ("Add moving platforms", "level"),
    ("Add a boss enemy", "enemy"),
    ("Add spike traps", "level"),
    ("Add treasure chests", "collectible"),
    ("Add parallax scrolling background", "visual"),
    ("Add dust particles when landing", "particle"),
    ("Add floating coin sparkle effects", "particle"),
    ("Add lava terrain with glow", "terrain"),
    ("Add animated water in background", "visual"),
    ("Add checkpoint flags", "level"),
];

const TOPDOWN_FEATURES: Chips = &[
    ("Add quest-giving NPCs", "mechanic"),
    ("Add inventory system", "mechanic"),
    ("Add grass and tree terrain", "terrain"),
    ("Add fog of war effect", "visual"),
    ("Add torch light particles", "particle"),
    ("Add footstep dust trail", "particle"),
    ("Add water tiles with ripples", "terrain"),
    ("Add day/night cycle", "visual"),
    ("Add treasure map collectible", "collectible"),
    ("Add patrol guard enemies", "enemy"),
    ("Add healing potion power-up", "powerup"),
    ("Add dungeon environment", "terrain"),
];

const SHOOTER_FEATURES: Chips = &[
    ("Add weapon upgrades", "powerup"),
    ("Add shield power-up", "powerup"),
    ("Add boss battles", "enemy"),
    ("Add explosion particles", "particle"),
    ("Add laser beam effects", "visual"),
    ("Add scrolling starfield background", "visual"),
    ("Add asteroid obstacles", "level"),
    ("Add engine trail particles", "particle"),
    ("Add screen shake on hit", "visual"),
    ("Add nebula backgrounds", "terrain"),
    ("Add combo score multiplier", "mechanic"),
    ("Add homing missiles", "mechanic"),
];

const PUZZLE_FEATURES: Chips = &[
    ("Add timer challenge mode", "mechanic"),
    ("Add hint system", "mechanic"),
    ("Add match-3 sparkle effects", "particle"),
    ("Add tile glow animations", "visual"),
    ("Add combo chain effects", "particle"),
    ("Add ambient floating particles", "particle"),
    ("Add gradient background", "visual"),
    ("Add level progression", "level"),
    ("Add star rating system", "mechanic"),
    ("Add tile pop animations", "visual"),
    ("Add streak counter", "mechanic"),
    ("Add special power tiles", "powerup"),
];

const VISUAL_NOVEL_FEATURES: Chips = &[
    ("Add multiple story endings", "mechanic"),
    ("Add character emotion sprites", "visual"),
    ("Add background scene transitions", "visual"),
    ("Add rain weather effect", "particle"),
    ("Add falling cherry blossoms", "particle"),
    ("Add text typing animation", "visual"),
    ("Add character relationship meter", "mechanic"),
    ("Add dream sequence visuals", "visual"),
    ("Add ambient firefly particles", "particle"),
    ("Add portrait frame effects", "visual"),
    ("Add save/load system", "mechanic"),
    ("Add flashback tint effect", "visual"),
];

const RACING_FEATURES: Chips = &[
    ("Add nitro boost", "powerup"),
    ("Add speed line effects", "visual"),
    ("Add tire smoke particles", "particle"),
    ("Add oil slick obstacles", "level"),
    ("Add ramp jumps", "level"),
    ("Add rain weather effect", "particle"),
    ("Add neon track edges", "terrain"),
    ("Add checkpoint gates", "level"),
    ("Add road terrain types", "terrain"),
    ("Add spark collision effects", "particle"),
    ("Add dynamic sky background", "visual"),
    ("Add lap counter", "mechanic"),
];

/// Theme visuals. The first key that contains, or is contained in, the
/// normalised theme wins.
const THEME_VISUALS: &[(&str, Chips)] = &[
    (
        "fantasy",
        &[
            ("Add enchanted forest background", "terrain"),
            ("Add magical sparkle particles", "particle"),
            ("Add castle backdrop", "visual"),
            ("Use emerald green + royal purple palette", "color"),
        ],
    ),
    (
        "sci-fi",
        &[
            ("Add hologram UI effects", "visual"),
            ("Add electric arc particles", "particle"),
            ("Add space station backdrop", "terrain"),
            ("Use cyan + electric blue palette", "color"),
        ],
    ),
    (
        "horror",
        &[
            ("Add fog and mist particles", "particle"),
            ("Add flickering light effect", "visual"),
            ("Add dark forest terrain", "terrain"),
            ("Use deep red + dark grey palette", "color"),
        ],
    ),
    (
        "cyberpunk",
        &[
            ("Add neon glow effects", "visual"),
            ("Add rain particles", "particle"),
            ("Add city skyline backdrop", "terrain"),
            ("Use hot pink + electric cyan palette", "color"),
        ],
    ),
    (
        "retro",
        &[
            ("Add CRT scanline effect", "visual"),
            ("Add pixel dust particles", "particle"),
            ("Use 8-bit color palette", "color"),
            ("Add chunky pixel terrain", "terrain"),
        ],
    ),
    (
        "nature",
        &[
            ("Add falling leaf particles", "particle"),
            ("Add rolling hills terrain", "terrain"),
            ("Add sunbeam light rays", "visual"),
            ("Use earthy green + sky blue palette", "color"),
        ],
    ),
    (
        "ocean",
        &[
            ("Add bubble particles", "particle"),
            ("Add underwater light rays", "visual"),
            ("Add coral reef terrain", "terrain"),
            ("Use deep blue + turquoise palette", "color"),
        ],
    ),
    (
        "space",
        &[
            ("Add twinkling star particles", "particle"),
            ("Add nebula background layers", "visual"),
            ("Add asteroid field terrain", "terrain"),
            ("Use dark navy + bright white palette", "color"),
        ],
    ),
];

const VISUAL_TWEAKS: Chips = &[
    ("Customize player sprite colors", "visual"),
    ("Add background particle effects", "particle"),
    ("Change terrain style", "terrain"),
    ("Customize enemy appearance", "enemy"),
    ("Add weather effects", "particle"),
    ("Set custom color palette", "color"),
];

/// A chip mentioning one of these is dropped once the flag is already on.
const FEATURE_MENTIONS: &[(&str, FeatureFlag)] = &[
    ("enemy", FeatureFlag::Enemies),
    ("collectible", FeatureFlag::Collectibles),
    ("power-up", FeatureFlag::Powerups),
    ("dialogue", FeatureFlag::Dialogue),
    ("parallax", FeatureFlag::ParallaxBackground),
    ("particle", FeatureFlag::Particles),
];

fn state_guidance(state: ConversationState) -> Chips {
    match state {
        ConversationState::Greeting => &[
            ("Help me choose a genre", "help"),
            ("I have a specific idea", "help"),
        ],
        ConversationState::GenreSelection => &[
            ("What genres are available?", "help"),
            ("Recommend a genre for beginners", "help"),
        ],
        ConversationState::ThemeSelection => &[
            ("Show me theme examples", "help"),
            ("Pick a random theme", "help"),
        ],
        _ => &[],
    }
}

fn genre_features(genre: Genre) -> Chips {
    match genre {
        Genre::Platformer => PLATFORMER_FEATURES,
        Genre::Topdown => TOPDOWN_FEATURES,
        Genre::Shooter => SHOOTER_FEATURES,
        Genre::Puzzle => PUZZLE_FEATURES,
        Genre::VisualNovel => VISUAL_NOVEL_FEATURES,
        Genre::Racing => RACING_FEATURES,
    }
}

fn normalise_theme(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Visuals for the first table key matching `theme` in either direction.
/// An empty theme is contained in every key, so it gets the first entry.
fn theme_visuals(theme: &str) -> Option<Chips> {
    let wanted = normalise_theme(theme);
    THEME_VISUALS
        .iter()
        .find(|(key, _)| {
            let key = normalise_theme(key);
            wanted.contains(&key) || key.contains(&wanted)
        })
        .map(|(_, chips)| *chips)
}

fn already_enabled(text: &str, spec: &GameSpecification) -> bool {
    let low = text.to_lowercase();
    FEATURE_MENTIONS
        .iter()
        .any(|(keyword, flag)| low.contains(keyword) && spec.has(*flag))
}

/// Ordered, de-duplicated suggestions for the current state, at most `max_count`.
pub fn suggest(
    state: ConversationState,
    spec: &GameSpecification,
    max_count: usize,
) -> Vec<Suggestion> {
    let mut pool: Vec<(&str, &str)> = state_guidance(state).to_vec();

    if matches!(
        state,
        ConversationState::ThemeSelection
            | ConversationState::DetailGathering
            | ConversationState::Confirming
    ) {
        pool.extend(
            genre_features(spec.genre)
                .iter()
                .filter(|(text, _)| !already_enabled(text, spec)),
        );
        if let Some(visuals) = theme_visuals(&spec.theme) {
            pool.extend_from_slice(visuals);
        }
    }

    if state == ConversationState::DetailGathering {
        pool.extend_from_slice(VISUAL_TWEAKS);
    }

    let mut seen = std::collections::HashSet::new();
    pool.into_iter()
        .filter(|(text, _)| seen.insert(*text))
        .take(max_count)
        .map(|(text, category)| Suggestion::new(text, category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn texts(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn greeting_offers_guidance_only() {
        let out = suggest(ConversationState::Greeting, &GameSpecification::default(), 6);
        assert_eq!(texts(&out), vec!["Help me choose a genre", "I have a specific idea"]);
    }

    #[test]
    fn generating_and_complete_offer_nothing() {
        let spec = GameSpecification::default();
        assert!(suggest(ConversationState::Generating, &spec, 6).is_empty());
        assert!(suggest(ConversationState::Complete, &spec, 6).is_empty());
    }

    #[test]
    fn drops_features_already_enabled() {
        // Default spec has enemies and collectibles on.
        let spec = GameSpecification::default();
        let out = suggest(ConversationState::Confirming, &spec, 50);
        let out = texts(&out);
        assert!(!out.contains(&"Add a boss enemy"));
        assert!(out.contains(&"Add double jump"));
        assert!(out.contains(&"Add dust particles when landing"));

        let spec = GameSpecification {
            has_particles: true,
            has_enemies: false,
            ..GameSpecification::default()
        };
        let out = suggest(ConversationState::Confirming, &spec, 50);
        let out = texts(&out);
        assert!(out.contains(&"Add a boss enemy"));
        assert!(!out.contains(&"Add dust particles when landing"));
    }

    #[test]
    fn theme_lookup_matches_both_directions() {
        assert!(theme_visuals("Dark Fantasy").is_some());
        assert!(theme_visuals("Sci Fi").is_some());
        assert!(theme_visuals("sci-fi").is_some());
        assert!(theme_visuals("Cyber").is_some());
        assert!(theme_visuals("Western").is_none());
    }

    #[test]
    fn theme_lookup_takes_the_first_table_entry() {
        let visuals = theme_visuals("Fantasy Space").map(|chips| chips[0].0);
        assert_eq!(visuals, Some("Add enchanted forest background"));
    }

    #[test]
    fn blank_theme_falls_back_to_first_entry() {
        for theme in ["", "  ", "-"] {
            let visuals = theme_visuals(theme).map(|chips| chips[0].0);
            assert_eq!(visuals, Some("Add enchanted forest background"));
        }

        let spec = GameSpecification {
            theme: String::new(),
            ..GameSpecification::default()
        };
        let offered = suggest(ConversationState::DetailGathering, &spec, 100);
        assert!(texts(&offered).contains(&"Add enchanted forest background"));
    }

    #[test]
    fn detail_gathering_appends_visual_tweaks() {
        let spec = GameSpecification {
            theme: "Western".to_string(),
            ..GameSpecification::default()
        };
        let out = suggest(ConversationState::DetailGathering, &spec, 100);
        assert_eq!(out.last().map(|s| s.text.as_str()), Some("Set custom color palette"));
        assert!(texts(&out).contains(&"Customize enemy appearance"));
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let spec = GameSpecification {
            genre: Genre::Racing,
            theme: "Cyberpunk".to_string(),
            ..GameSpecification::default()
        };
        let out = suggest(ConversationState::DetailGathering, &spec, 100);
        let unique: HashSet<_> = out.iter().map(|s| &s.text).collect();
        assert_eq!(unique.len(), out.len());
    }

    #[test]
    fn respects_max_count_for_every_combination() {
        let themes = ["", "Fantasy", "Sci Fi", "Ocean", "Unknown"];
        for state in ConversationState::all() {
            for genre in Genre::all() {
                for theme in themes {
                    let spec = GameSpecification {
                        genre: *genre,
                        theme: theme.to_string(),
                        ..GameSpecification::default()
                    };
                    for max in [0, 1, DEFAULT_MAX_SUGGESTIONS] {
                        let out = suggest(*state, &spec, max);
                        assert!(out.len() <= max);
                        let unique: HashSet<_> = out.iter().map(|s| &s.text).collect();
                        assert_eq!(unique.len(), out.len());
                    }
                }
            }
        }
    }
}
