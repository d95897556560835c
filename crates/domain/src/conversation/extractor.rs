//! Rule-based parameter extraction.
//!
//! `extract_game_params` is a pure function of the message: it never sees the
//! conversation state and never fails. Fields with no matching keyword are left
//! out of the returned [`SpecUpdate`].

use regex_lite::Regex;
use std::sync::LazyLock;

use crate::aggregates::{FeatureFlag, SpecUpdate};
use crate::conversation::text::{compile, keyword_regex, title_case, word_count, DESCRIPTION_MIN_WORDS};
use crate::value_objects::{
    ColorRole, Difficulty, Genre, ParticleType, WeatherType, NAMED_COLORS, PALETTE_PRESETS,
    ROLE_NOUNS,
};

/// Phrase to genre, in tie-break order.
const GENRE_PHRASES: &[(&str, Genre)] = &[
    ("platformer", Genre::Platformer),
    ("platform", Genre::Platformer),
    ("platforming", Genre::Platformer),
    ("side-scroller", Genre::Platformer),
    ("sidescroller", Genre::Platformer),
    ("side scroller", Genre::Platformer),
    ("endless runner", Genre::Platformer),
    ("topdown", Genre::Topdown),
    ("top-down", Genre::Topdown),
    ("top down", Genre::Topdown),
    ("rpg", Genre::Topdown),
    ("adventure", Genre::Topdown),
    ("action adventure", Genre::Topdown),
    ("zelda", Genre::Topdown),
    ("survival", Genre::Topdown),
    ("roguelike", Genre::Topdown),
    ("shooter", Genre::Shooter),
    ("shoot em up", Genre::Shooter),
    ("shoot'em up", Genre::Shooter),
    ("shmup", Genre::Shooter),
    ("space shooter", Genre::Shooter),
    ("bullet hell", Genre::Shooter),
    ("tower defense", Genre::Shooter),
    ("puzzle", Genre::Puzzle),
    ("match", Genre::Puzzle),
    ("brain teaser", Genre::Puzzle),
    ("logic", Genre::Puzzle),
    ("visual novel", Genre::VisualNovel),
    ("story game", Genre::VisualNovel),
    ("narrative", Genre::VisualNovel),
    ("dating sim", Genre::VisualNovel),
    ("text adventure", Genre::VisualNovel),
    ("racing", Genre::Racing),
    ("race", Genre::Racing),
    ("driving", Genre::Racing),
    ("car", Genre::Racing),
    ("kart", Genre::Racing),
];

/// Theme keywords. List order decides, not position in the message.
const THEME_KEYWORDS: &[&str] = &[
    "fantasy",
    "sci-fi",
    "scifi",
    "science fiction",
    "space",
    "modern",
    "medieval",
    "pixel",
    "retro",
    "neon",
    "horror",
    "cartoon",
    "cute",
    "dark",
    "nature",
    "ocean",
    "underwater",
    "jungle",
    "desert",
    "city",
    "urban",
    "cyberpunk",
    "steampunk",
    "post-apocalyptic",
    "western",
    "ninja",
    "samurai",
    "pirate",
    "zombie",
    "knight",
    "robot",
    "alien",
    "wizard",
    "magic",
    "futuristic",
    "prehistoric",
    "ice",
    "snow",
    "volcanic",
    "tropical",
    "haunted",
    "enchanted",
    "celestial",
];

const DIFFICULTY_KEYWORDS: &[(&str, Difficulty)] = &[
    ("easy", Difficulty::Easy),
    ("simple", Difficulty::Easy),
    ("beginner", Difficulty::Easy),
    ("casual", Difficulty::Easy),
    ("normal", Difficulty::Normal),
    ("medium", Difficulty::Normal),
    ("moderate", Difficulty::Normal),
    ("hard", Difficulty::Hard),
    ("difficult", Difficulty::Hard),
    ("challenging", Difficulty::Hard),
    ("extreme", Difficulty::Hard),
    ("brutal", Difficulty::Hard),
    ("impossible", Difficulty::Hard),
];

/// Fireflies comes before fire so "fireflies" is not read as flames.
const PARTICLE_PATTERNS: &[(&str, ParticleType)] = &[
    (r"\bfirefl(?:y|ies)\b", ParticleType::Fireflies),
    (r"\b(?:sparkles?|sparkly|glitter\w*|twinkl\w*)\b", ParticleType::Sparkle),
    (r"\b(?:fire|flames?|embers?)\b", ParticleType::Fire),
    (r"\b(?:smoke|smoky|steam)\b", ParticleType::Smoke),
    (r"\b(?:dust|dusty)\b", ParticleType::Dust),
    (r"\bbubbles?\b", ParticleType::Bubbles),
    (r"\b(?:leaves|leaf)\b", ParticleType::Leaves),
    (r"\bsnowflakes?\b", ParticleType::Snowflakes),
    (r"\bconfetti\b", ParticleType::Confetti),
];

/// Sandstorm precedes storm so "sand storm" keeps its specific type.
const WEATHER_PATTERNS: &[(&str, WeatherType)] = &[
    (r"\b(?:rain(?:y|ing|fall)?|drizzle)\b", WeatherType::Rain),
    (r"\b(?:snow(?:y|ing|fall)?|blizzard)\b", WeatherType::Snow),
    (r"\b(?:fog(?:gy)?|mist(?:y)?|haze|hazy)\b", WeatherType::Fog),
    (r"\bsand\s*storms?\b", WeatherType::Sandstorm),
    (r"\b(?:storms?|stormy|thunder\w*|lightning)\b", WeatherType::Storm),
];

struct FlagRule {
    flag: FeatureFlag,
    negation: Regex,
    positive: Regex,
}

impl FlagRule {
    fn new(flag: FeatureFlag, negated_nouns: &str, positive: &str) -> Self {
        Self {
            flag,
            negation: compile(&format!(r"\b(?:no|without|remove|disable)\s+(?:{})\b", negated_nouns)),
            positive: compile(&format!(r"\b(?:{})\b", positive)),
        }
    }
}

static GENRE_TABLE: LazyLock<Vec<(Regex, Genre)>> = LazyLock::new(|| {
    GENRE_PHRASES
        .iter()
        .map(|(phrase, genre)| (keyword_regex(phrase), *genre))
        .collect()
});

static THEME_TABLE: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    THEME_KEYWORDS
        .iter()
        .map(|keyword| (keyword_regex(keyword), *keyword))
        .collect()
});

static DIFFICULTY_TABLE: LazyLock<Vec<(Regex, Difficulty)>> = LazyLock::new(|| {
    DIFFICULTY_KEYWORDS
        .iter()
        .map(|(keyword, difficulty)| (keyword_regex(keyword), *difficulty))
        .collect()
});

static PARTICLE_TABLE: LazyLock<Vec<(Regex, ParticleType)>> = LazyLock::new(|| {
    PARTICLE_PATTERNS
        .iter()
        .map(|(pattern, particle)| (compile(pattern), *particle))
        .collect()
});

static WEATHER_TABLE: LazyLock<Vec<(Regex, WeatherType)>> = LazyLock::new(|| {
    WEATHER_PATTERNS
        .iter()
        .map(|(pattern, weather)| (compile(pattern), *weather))
        .collect()
});

static FLAG_RULES: LazyLock<Vec<FlagRule>> = LazyLock::new(|| {
    vec![
        FlagRule::new(FeatureFlag::Enemies, r"enem(?:y|ies)", r"enem(?:y|ies)"),
        FlagRule::new(
            FeatureFlag::Collectibles,
            r"coins?|collect\w*|pickups?",
            r"coins?|collect\w*|gems?|stars?|pickups?|loot",
        ),
        FlagRule::new(
            FeatureFlag::Powerups,
            r"power[- ]?ups?",
            r"power[- ]?ups?|boosts?|upgrades?|abilit(?:y|ies)|shields?",
        ),
        FlagRule::new(
            FeatureFlag::Dialogue,
            r"dialog(?:ue)?|story|npcs?",
            r"dialog|dialogue|story|narrative|npcs?|talk|talking|quests?",
        ),
        FlagRule::new(FeatureFlag::Particles, r"particles?|effects", r"particles?"),
        FlagRule::new(
            FeatureFlag::ParallaxBackground,
            r"parallax",
            r"parallax|layered\s+backgrounds?",
        ),
    ]
});

/// Palette keyword, followed later by a named color directly before a role noun.
static PRESET_TABLE: LazyLock<Vec<(Regex, usize)>> = LazyLock::new(|| {
    PALETTE_PRESETS
        .iter()
        .enumerate()
        .map(|(index, (keyword, _))| (keyword_regex(keyword), index))
        .collect()
});

static ROLE_COLOR_TABLE: LazyLock<Vec<(ColorRole, Vec<(Regex, &'static str)>)>> =
    LazyLock::new(|| {
        ROLE_NOUNS
            .iter()
            .map(|(role, noun)| {
                let colors = NAMED_COLORS
                    .iter()
                    .map(|(color, hex)| {
                        let pattern = format!(r"\b{}\s+{}\b", regex_lite::escape(color), noun);
                        (compile(&pattern), *hex)
                    })
                    .collect();
                (*role, colors)
            })
            .collect()
    });

static QUOTED_NAME_AFTER_VERB: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?i:call\s+it|called|named?|titled?)\s+"([^"]{1,40})""#)
});

static ANY_QUOTED_NAME: LazyLock<Regex> =
    LazyLock::new(|| compile(r#""([A-Za-z][\w\s']{0,29})""#));

static CAPITALIZED_NAME_AFTER_VERB: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i:call\s+it|called|named?|titled?)\s+([A-Z][\w']{0,15}(?:\s+[A-Z][\w']{0,15}){0,3})")
});

static PLAYER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r#"(?i:player|character|hero|protagonist)\s+(?i:is\s+named|is\s+called|is|named|called)\s+["']?([A-Z]\w{1,20})"#,
    )
});

/// Extract every recognisable specification field from a message.
pub fn extract_game_params(message: &str) -> SpecUpdate {
    let text = message.trim();
    let low = text.to_lowercase();
    let mut update = SpecUpdate::default();

    update.genre = extract_genre(&low);
    update.theme = extract_theme(&low);
    update.name = extract_name(text);
    update.player_name = extract_player_name(text);

    for rule in FLAG_RULES.iter() {
        if rule.negation.is_match(&low) {
            update.set_flag(rule.flag, false);
        } else if rule.positive.is_match(&low) {
            update.set_flag(rule.flag, true);
        }
    }

    // "no particles" wins over any particle keyword in the same message.
    if update.has_particles != Some(false) {
        if let Some(particle) = first_in_table(&PARTICLE_TABLE, &low) {
            update.particle_type = Some(particle);
            update.has_particles = Some(true);
        }
    }

    update.weather = first_in_table(&WEATHER_TABLE, &low);
    update.difficulty = first_in_table(&DIFFICULTY_TABLE, &low);
    extract_colors(&low, &mut update);

    if word_count(text) >= DESCRIPTION_MIN_WORDS {
        update.description = Some(text.to_string());
    }

    update
}

/// Earliest mention wins; equal offsets keep table order.
fn extract_genre(low: &str) -> Option<Genre> {
    let mut best: Option<(usize, Genre)> = None;
    for (regex, genre) in GENRE_TABLE.iter() {
        if let Some(found) = regex.find(low) {
            if best.map_or(true, |(offset, _)| found.start() < offset) {
                best = Some((found.start(), *genre));
            }
        }
    }
    best.map(|(_, genre)| genre)
}

fn extract_theme(low: &str) -> Option<String> {
    THEME_TABLE
        .iter()
        .find(|(regex, _)| regex.is_match(low))
        .map(|(_, keyword)| title_case(keyword))
}

fn extract_name(text: &str) -> Option<String> {
    [&*QUOTED_NAME_AFTER_VERB, &*ANY_QUOTED_NAME, &*CAPITALIZED_NAME_AFTER_VERB]
        .iter()
        .find_map(|regex| regex.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

fn extract_player_name(text: &str) -> Option<String> {
    PLAYER_NAME
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_colors(low: &str, update: &mut SpecUpdate) {
    if let Some((_, index)) = PRESET_TABLE.iter().find(|(regex, _)| regex.is_match(low)) {
        let (_, preset) = &PALETTE_PRESETS[*index];
        for role in ColorRole::all() {
            update.set_color(*role, preset.get(*role));
        }
    }

    for (role, colors) in ROLE_COLOR_TABLE.iter() {
        if let Some((_, hex)) = colors.iter().find(|(regex, _)| regex.is_match(low)) {
            update.set_color(*role, *hex);
        }
    }
}

fn first_in_table<T: Copy>(table: &[(Regex, T)], low: &str) -> Option<T> {
    table
        .iter()
        .find(|(regex, _)| regex.is_match(low))
        .map(|(_, value)| *value)
}
