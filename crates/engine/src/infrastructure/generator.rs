//! Godot 4 project writer.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gamecraft_domain::{ColorRole, FeatureFlag, GameSpecification};
use uuid::Uuid;

use crate::infrastructure::ports::{GeneratedProject, GenerationError, ProjectGenerator};

pub const PROJECT_FILE: &str = "project.godot";
pub const SPEC_FILE: &str = "game_spec.json";
pub const MAIN_SCENE: &str = "scenes/main.tscn";
pub const GAME_MANAGER: &str = "scripts/autoload/game_manager.gd";

const PROJECT_DIRS: [&str; 5] = ["scenes", "scripts", "scripts/autoload", "assets", "ui"];

/// Writes one directory per game under `root`.
///
/// Each project is assembled in a hidden staging directory and moved into
/// place when complete, so a failed run never leaves a half-written project
/// behind under the real name.
pub struct FsProjectGenerator {
    root: PathBuf,
}

impl FsProjectGenerator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Directory name for a game: spaces become underscores, anything outside
/// `[A-Za-z0-9_-]` is dropped.
pub fn safe_project_name(name: &str) -> Result<String, GenerationError> {
    let safe: String = name
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => Some(c),
            _ => None,
        })
        .collect();

    if safe.is_empty() || safe.chars().all(|c| c == '_') {
        return Err(GenerationError::InvalidName(name.to_string()));
    }
    Ok(safe)
}

async fn write_file(dir: &Path, relative: &str, contents: &str) -> Result<(), GenerationError> {
    let path = dir.join(relative);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| GenerationError::io(path, e))
}

async fn write_project(dir: &Path, spec: &GameSpecification) -> Result<Vec<String>, GenerationError> {
    for sub in PROJECT_DIRS {
        let path = dir.join(sub);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| GenerationError::io(path, e))?;
    }

    let spec_json = serde_json::to_string_pretty(spec)
        .map_err(|e| GenerationError::Serialization(e.to_string()))?;

    let files = [
        (PROJECT_FILE, project_file(spec)),
        (SPEC_FILE, spec_json),
        (MAIN_SCENE, main_scene()),
        (GAME_MANAGER, game_manager(spec)?),
    ];
    for (relative, contents) in &files {
        write_file(dir, relative, contents).await?;
    }

    Ok(files.iter().map(|(name, _)| name.to_string()).collect())
}

#[async_trait]
impl ProjectGenerator for FsProjectGenerator {
    async fn generate(&self, spec: &GameSpecification) -> Result<GeneratedProject, GenerationError> {
        let name = safe_project_name(&spec.name)?;
        let target = self.root.join(&name);
        let staging = self.root.join(format!(".tmp-{}", Uuid::new_v4()));

        tokio::fs::create_dir_all(&staging)
            .await
            .map_err(|e| GenerationError::io(staging.clone(), e))?;

        let files = match write_project(&staging, spec).await {
            Ok(files) => files,
            Err(e) => {
                let _ = tokio::fs::remove_dir_all(&staging).await;
                return Err(e);
            }
        };

        match tokio::fs::remove_dir_all(&target).await {
            Ok(()) => tracing::debug!(path = %target.display(), "Replacing existing project"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                let _ = tokio::fs::remove_dir_all(&staging).await;
                return Err(GenerationError::io(target, e));
            }
        }
        if let Err(e) = tokio::fs::rename(&staging, &target).await {
            let _ = tokio::fs::remove_dir_all(&staging).await;
            return Err(GenerationError::io(target, e));
        }

        tracing::info!(project = %name, path = %target.display(), files = files.len(), "Project generated");
        Ok(GeneratedProject {
            name,
            path: target,
            files,
        })
    }

    async fn list_projects(&self) -> Result<Vec<String>, GenerationError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(GenerationError::io(self.root.clone(), e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| GenerationError::io(self.root.clone(), e))?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if tokio::fs::try_exists(entry.path().join(PROJECT_FILE))
                .await
                .unwrap_or(false)
            {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// File contents
// =============================================================================

/// `#rrggbb` as a Godot `Color(...)`; black when the hex is unusable.
fn godot_color(hex: &str) -> String {
    let digits = hex.trim().trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .map(|v| f32::from(v) / 255.0)
    };
    match (digits.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => format!("Color({r:.3}, {g:.3}, {b:.3}, 1)"),
        _ => "Color(0, 0, 0, 1)".to_string(),
    }
}

fn godot_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

fn role_key(role: ColorRole) -> &'static str {
    match role {
        ColorRole::Primary => "primary",
        ColorRole::Secondary => "secondary",
        ColorRole::Accent => "accent",
        ColorRole::Background => "background",
        ColorRole::Ground => "ground",
    }
}

fn flag_constant(flag: FeatureFlag) -> &'static str {
    match flag {
        FeatureFlag::Enemies => "HAS_ENEMIES",
        FeatureFlag::Collectibles => "HAS_COLLECTIBLES",
        FeatureFlag::Powerups => "HAS_POWERUPS",
        FeatureFlag::Dialogue => "HAS_DIALOGUE",
        FeatureFlag::Particles => "HAS_PARTICLES",
        FeatureFlag::ParallaxBackground => "HAS_PARALLAX_BACKGROUND",
    }
}

fn project_file(spec: &GameSpecification) -> String {
    format!(
        "; Engine configuration file.\n\
         config_version=5\n\n\
         [application]\n\n\
         config/name={name}\n\
         run/main_scene=\"res://{MAIN_SCENE}\"\n\
         config/features=PackedStringArray(\"4.2\")\n\n\
         [autoload]\n\n\
         GameManager=\"*res://{GAME_MANAGER}\"\n\n\
         [display]\n\n\
         window/size/viewport_width=1152\n\
         window/size/viewport_height=648\n\n\
         [rendering]\n\n\
         environment/defaults/default_clear_color={clear}\n",
        name = godot_string(&spec.name),
        clear = godot_color(spec.color(ColorRole::Background)),
    )
}

fn main_scene() -> String {
    "[gd_scene format=3]\n\n[node name=\"Main\" type=\"Node2D\"]\n".to_string()
}

fn game_manager(spec: &GameSpecification) -> Result<String, GenerationError> {
    let mut out = String::from("extends Node\n\n");
    let mut line = |text: String| {
        out.push_str(&text);
        out.push('\n');
    };

    line(format!("const GAME_NAME := {}", godot_string(&spec.name)));
    line(format!("const GENRE := {}", godot_string(spec.genre.as_str())));
    line(format!("const THEME := {}", godot_string(&spec.theme)));
    line(format!("const PLAYER_NAME := {}", godot_string(&spec.player_name)));
    line(format!(
        "const DIFFICULTY := {}",
        godot_string(&spec.difficulty.display_name().to_lowercase())
    ));
    for flag in FeatureFlag::all() {
        line(format!("const {} := {}", flag_constant(*flag), spec.has(*flag)));
    }
    line(format!("const PARTICLE_TYPE := {}", godot_string(spec.particle_type.as_str())));
    line(format!("const WEATHER := {}", godot_string(spec.weather.as_str())));

    let mut palette = String::from("const PALETTE := {");
    for (i, role) in ColorRole::all().iter().enumerate() {
        let sep = if i == 0 { "" } else { ", " };
        write!(
            palette,
            "{sep}\"{}\": {}",
            role_key(*role),
            godot_color(spec.color(*role))
        )
        .map_err(|e| GenerationError::Serialization(e.to_string()))?;
    }
    palette.push('}');
    line(palette);

    line(String::new());
    line("var score := 0".to_string());
    line(String::new());
    line("func add_score(amount: int) -> void:".to_string());
    line("\tscore += amount".to_string());

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamecraft_domain::Genre;
    use tempfile::TempDir;

    fn spec(name: &str) -> GameSpecification {
        GameSpecification {
            name: name.to_string(),
            genre: Genre::Racing,
            has_powerups: true,
            ..GameSpecification::default()
        }
    }

    #[test]
    fn safe_names() {
        assert_eq!(safe_project_name("Dragon Quest").unwrap(), "Dragon_Quest");
        assert_eq!(safe_project_name("../etc/passwd").unwrap(), "etcpasswd");
        assert_eq!(safe_project_name("Neon-Drift 2").unwrap(), "Neon-Drift_2");
        assert!(matches!(
            safe_project_name("  ?! "),
            Err(GenerationError::InvalidName(_))
        ));
    }

    #[test]
    fn colors_convert_to_godot() {
        assert_eq!(godot_color("#ff0000"), "Color(1.000, 0.000, 0.000, 1)");
        assert_eq!(godot_color("oops"), "Color(0, 0, 0, 1)");
    }

    #[tokio::test]
    async fn writes_project_layout() {
        let dir = TempDir::new().unwrap();
        let generator = FsProjectGenerator::new(dir.path());

        let project = generator.generate(&spec("Dragon Quest")).await.unwrap();

        assert_eq!(project.name, "Dragon_Quest");
        assert_eq!(project.path, dir.path().join("Dragon_Quest"));
        for sub in ["scenes", "scripts", "assets", "ui"] {
            assert!(project.path.join(sub).is_dir(), "missing {sub}/");
        }
        for file in [PROJECT_FILE, SPEC_FILE, MAIN_SCENE, GAME_MANAGER] {
            assert!(project.files.contains(&file.to_string()));
            assert!(project.path.join(file).is_file(), "missing {file}");
        }

        let godot = std::fs::read_to_string(project.path.join(PROJECT_FILE)).unwrap();
        assert!(godot.contains("config/name=\"Dragon Quest\""));

        let saved: GameSpecification =
            serde_json::from_str(&std::fs::read_to_string(project.path.join(SPEC_FILE)).unwrap())
                .unwrap();
        assert_eq!(saved, spec("Dragon Quest"));

        let manager = std::fs::read_to_string(project.path.join(GAME_MANAGER)).unwrap();
        assert!(manager.contains("const GENRE := \"racing\""));
        assert!(manager.contains("const HAS_POWERUPS := true"));
    }

    #[tokio::test]
    async fn regenerating_replaces_previous_project() {
        let dir = TempDir::new().unwrap();
        let generator = FsProjectGenerator::new(dir.path());

        let first = generator.generate(&spec("Same Name")).await.unwrap();
        std::fs::write(first.path.join("stale.txt"), "old").unwrap();

        let second = generator.generate(&spec("Same Name")).await.unwrap();
        assert_eq!(first.path, second.path);
        assert!(!second.path.join("stale.txt").exists());

        // No staging directories are left behind.
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn lists_only_generated_projects() {
        let dir = TempDir::new().unwrap();
        let generator = FsProjectGenerator::new(dir.path());

        generator.generate(&spec("Zeta")).await.unwrap();
        generator.generate(&spec("Alpha Run")).await.unwrap();
        std::fs::create_dir(dir.path().join("not_a_game")).unwrap();

        assert_eq!(
            generator.list_projects().await.unwrap(),
            vec!["Alpha_Run".to_string(), "Zeta".to_string()]
        );
    }

    #[tokio::test]
    async fn missing_root_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let generator = FsProjectGenerator::new(dir.path().join("absent"));
        assert!(generator.list_projects().await.unwrap().is_empty());
    }
}
