//! Markdown reply templates.

use std::fmt::Write as _;

use gamecraft_domain::{
    ConversationState, FeatureFlag, GameSpecification, Genre, Intent, ParticleType, WeatherType,
};

use crate::infrastructure::ports::{GeneratedProject, ResponseRenderer};

const GENRE_LINE: &str = "**Available genres:** Platformer · Top-Down Adventure · \
Space Shooter · Puzzle · Visual Novel · Racing";

/// Renders replies from (state, intent, spec) alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn theme_label(spec: &GameSpecification) -> &str {
    if spec.theme.trim().is_empty() {
        "Custom"
    } else {
        &spec.theme
    }
}

fn greeting() -> String {
    format!(
        "Welcome to **Gamecraft**, your conversational game studio!\n\n\
         Tell me about the game you want to build. You can:\n\
         - Pick a genre (e.g. *\"I want a platformer\"*)\n\
         - Describe your idea (e.g. *\"A space shooter where you fight aliens\"*)\n\
         - Or just chat and I'll guide you step by step\n\n\
         {GENRE_LINE}"
    )
}

fn genre_menu() -> String {
    let mut out = String::from("What type of game excites you? Pick one or describe your vision:\n");
    for genre in Genre::all() {
        let blurb = match genre {
            Genre::Platformer => "run, jump and explore side-scrolling levels",
            Genre::Topdown => "explore a world from above, RPG style",
            Genre::Shooter => "blast waves of enemies in shoot-em-up action",
            Genre::Puzzle => "solve brain-teasing challenges",
            Genre::VisualNovel => "tell a story with choices and characters",
            Genre::Racing => "speed through tracks and dodge obstacles",
        };
        let _ = write!(out, "\n- **{}**: {}", genre.display_name(), blurb);
    }
    out
}

fn theme_prompt(spec: &GameSpecification) -> String {
    format!(
        "A **{}**, great pick! Now let's set the vibe.\n\n\
         What theme or setting do you imagine? Some ideas:\n\
         - **Fantasy**: knights, dragons, enchanted forests\n\
         - **Sci-Fi**: spaceships, lasers, futuristic cities\n\
         - **Retro/Pixel**: classic arcade feel\n\
         - **Horror**: dark, spooky, atmospheric\n\
         - **Cyberpunk**: neon-lit dystopian worlds\n\n\
         Or describe your own setting!",
        spec.genre.display_name()
    )
}

fn progress_summary(spec: &GameSpecification) -> String {
    let mut out = String::from("Here's what I have so far:\n");
    let _ = write!(out, "\n- **Genre:** {}", spec.genre.display_name());
    let _ = write!(out, "\n- **Theme:** {}", theme_label(spec));
    let _ = write!(out, "\n- **Player:** {}", spec.player_name);
    for flag in spec.enabled_features() {
        let _ = write!(out, "\n- **{}:** Yes", flag.display_name());
    }
    if spec.particle_type != ParticleType::None {
        let _ = write!(out, "\n- **Particle effect:** {}", spec.particle_type);
    }
    if spec.weather != WeatherType::None {
        let _ = write!(out, "\n- **Weather:** {}", spec.weather);
    }
    let _ = write!(out, "\n- **Difficulty:** {}", spec.difficulty.display_name());
    out.push_str(
        "\n\nWant to add anything else? You can mention:\n\
         - A game name (e.g. *call it \"Dragon Quest\"*)\n\
         - Character details, enemies, power-ups, dialogue\n\
         - Colors, particles, weather\n\
         - Difficulty level\n\n\
         Or say **\"generate it\"** when you're ready!",
    );
    out
}

fn blueprint(spec: &GameSpecification) -> String {
    let mut out = format!("Here's your game blueprint:\n\n**{}**", spec.name);
    let _ = write!(out, "\n- Genre: {}", spec.genre.display_name());
    let _ = write!(out, "\n- Theme: {}", theme_label(spec));
    let _ = write!(out, "\n- Player: {}", spec.player_name);
    for flag in [
        FeatureFlag::Enemies,
        FeatureFlag::Collectibles,
        FeatureFlag::Powerups,
        FeatureFlag::Dialogue,
    ] {
        let _ = write!(out, "\n- {}: {}", flag.display_name(), yes_no(spec.has(flag)));
    }
    let _ = write!(out, "\n- Difficulty: {}", spec.difficulty.display_name());
    out.push_str(
        "\n\nShall I generate this game? Say **yes** to build it, or tell me what to change.",
    );
    out
}

impl ResponseRenderer for TemplateRenderer {
    fn render(&self, state: ConversationState, intent: Intent, spec: &GameSpecification) -> String {
        if intent == Intent::StartOver {
            return format!(
                "No problem, let's start fresh!\n\n\
                 What kind of game would you like to create? You can pick a genre \
                 or just describe your dream game in your own words.\n\n{GENRE_LINE}"
            );
        }

        match state {
            ConversationState::Greeting => greeting(),
            ConversationState::GenreSelection => genre_menu(),
            ConversationState::ThemeSelection => theme_prompt(spec),
            ConversationState::DetailGathering => progress_summary(spec),
            ConversationState::Confirming => blueprint(spec),
            ConversationState::Generating => format!(
                "**Building your game now...**\n\n\
                 Generating scenes, scripts and resources for *{}*. \
                 This will just take a moment.",
                spec.name
            ),
            ConversationState::Complete => format!(
                "Your game **{}** is ready!\n\n\
                 Open the project in Godot 4 and hit Play.\n\n\
                 Want to create another game? Just say **\"start over\"**!",
                spec.name
            ),
        }
    }

    fn render_generated(&self, spec: &GameSpecification, project: &GeneratedProject) -> String {
        format!(
            "Your game **{}** is ready!\n\n\
             The Godot 4 project was written to `{}` ({} files). \
             Open it in Godot and hit Play.\n\n\
             Want to create another game? Just say **\"start over\"**!",
            spec.name,
            project.path.display(),
            project.files.len()
        )
    }

    fn render_generation_failed(&self, spec: &GameSpecification, reason: &str) -> String {
        format!(
            "Sorry, I couldn't build **{}**: {}\n\n\
             Your blueprint is unchanged. Say **yes** to try again, or tell me what to change.",
            spec.name, reason
        )
    }

    fn render_undo(&self, undone: bool, state: ConversationState, spec: &GameSpecification) -> String {
        if !undone {
            return "Nothing to undo.".to_string();
        }
        let restored = match state {
            ConversationState::DetailGathering => progress_summary(spec),
            ConversationState::Confirming => blueprint(spec),
            other => self.render(other, Intent::GeneralChat, spec),
        };
        format!("Undone! I've restored your previous choices.\n\n{restored}")
    }

    fn help_text(&self, state: ConversationState, spec: &GameSpecification) -> String {
        match state {
            ConversationState::Greeting => "**Getting Started**\n\n\
                Describe your dream game in as much detail as you like! \
                Mention the genre, theme, visual style, characters, enemies \
                and any special effects you'd love to see.\n\n\
                **Tip:** The more visual details you give, the richer your game will be. \
                Try mentioning particle effects, background styles and color palettes."
                .to_string(),
            ConversationState::DetailGathering => format!(
                "**Customizing Your {}**\n\n\
                 You can refine any aspect of your game:\n\n\
                 **Visual Elements:**\n\
                 - Player and enemy colors\n\
                 - Parallax backgrounds\n\
                 - Particle effects (fire, sparkles, leaves, snowflakes)\n\
                 - Weather (rain, snow, fog, storms)\n\n\
                 **Game Features:**\n\
                 - Power-ups and collectibles\n\
                 - Enemies\n\
                 - Difficulty\n\
                 - Story and dialogue\n\n\
                 **Tip:** Say things like *\"add fire particles\"*, \
                 *\"make it rain\"* or *\"use a neon palette\"*.",
                spec.genre.display_name()
            ),
            ConversationState::Confirming => "**Review & Generate**\n\n\
                Check your game blueprint.\n\
                Say **yes** to generate, or describe changes.\n\n\
                **Tip:** You can still add visual effects, change colors \
                or tweak any feature before generating."
                .to_string(),
            _ => String::new(),
        }
    }
}
