//! Named render profiles: curve style, stroke widths and player colours.
//! Loaded from TOML at runtime for the render CLI.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// How a connection is drawn between its two ports.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurveStyle {
    /// Cubic Bézier with control points a third of the way into the tile.
    #[default]
    Cubic,
    /// Quadratic Bézier pulled through the tile centre.
    Quadratic,
}

/// Fully resolved render settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub curve: CurveStyle,
    pub track_color: String,
    pub track_width: f64,
    pub trail_width: f64,
    pub token_radius: f64,
    pub border_stub: i32,
    pub background: String,
    pub player_colors: Vec<String>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            curve: CurveStyle::Cubic,
            track_color: "#000".into(),
            track_width: 2.0,
            trail_width: 5.0,
            token_radius: 6.0,
            border_stub: 10,
            background: "#f4ecd8".into(),
            player_colors: ["red", "blue", "green", "purple", "magenta"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl RenderStyle {
    /// Colour for a board index, cycling when there are more players than colours.
    pub fn player_color(&self, board_index: usize) -> &str {
        if self.player_colors.is_empty() {
            return "black";
        }
        &self.player_colors[board_index % self.player_colors.len()]
    }
}

/// A named profile. Every field is optional and falls back to `RenderStyle::default()`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RenderProfile {
    pub description: Option<String>,
    pub curve: Option<CurveStyle>,
    pub track_color: Option<String>,
    pub track_width: Option<f64>,
    pub trail_width: Option<f64>,
    pub token_radius: Option<f64>,
    pub border_stub: Option<i32>,
    pub background: Option<String>,
    pub player_colors: Option<Vec<String>>,
}

impl RenderProfile {
    pub fn to_style(&self) -> RenderStyle {
        let d = RenderStyle::default();
        RenderStyle {
            curve: self.curve.unwrap_or(d.curve),
            track_color: self.track_color.clone().unwrap_or(d.track_color),
            track_width: self.track_width.unwrap_or(d.track_width),
            trail_width: self.trail_width.unwrap_or(d.trail_width),
            token_radius: self.token_radius.unwrap_or(d.token_radius),
            border_stub: self.border_stub.unwrap_or(d.border_stub),
            background: self.background.clone().unwrap_or(d.background),
            player_colors: self.player_colors.clone().unwrap_or(d.player_colors),
        }
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RenderProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, RenderProfile>,
    /// Profile used when none is requested.
    pub default: Option<String>,
}

impl RenderProfilesFile {
    /// Resolve a profile by name, then the file's default, then built-ins.
    pub fn resolve(&self, name: Option<&str>) -> RenderStyle {
        let wanted = name.or(self.default.as_deref());
        match wanted {
            Some(n) => match self.profiles.get(n) {
                Some(profile) => profile.to_style(),
                None => {
                    tracing::warn!(profile = n, "unknown render profile, using defaults");
                    RenderStyle::default()
                }
            },
            None => RenderStyle::default(),
        }
    }

    /// Rejects settings that cannot draw: an undefined `default` or an
    /// unusable stroke size or colour list.
    fn check(&self) -> Result<(), String> {
        if let Some(name) = &self.default {
            if !self.profiles.contains_key(name) {
                return Err(format!("default profile '{}' is not defined", name));
            }
        }
        for (name, profile) in &self.profiles {
            let sizes = [
                ("track_width", profile.track_width),
                ("trail_width", profile.trail_width),
                ("token_radius", profile.token_radius),
            ];
            if let Some((field, _)) = sizes.iter().find(|(_, v)| v.is_some_and(|v| v <= 0.0)) {
                return Err(format!("profile '{}': {} must be positive", name, field));
            }
            if profile.player_colors.as_ref().is_some_and(|c| c.is_empty()) {
                return Err(format!("profile '{}': player_colors is empty", name));
            }
        }
        Ok(())
    }
}

/// Read and check a render profile file. Errors name the file.
pub fn load_profiles(path: &Path) -> Result<RenderProfilesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let file: RenderProfilesFile = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    file.check()
        .map_err(|e| format!("Invalid profiles in {}: {}", path.display(), e))?;
    Ok(file)
}

/// Places the render CLI looks for profiles when none is given: the working
/// directory, the user's config directory, then the system one.
fn profile_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("render_profiles.toml")];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(Path::new(&home).join(".config/strecke/render_profiles.toml"));
    }
    paths.push(PathBuf::from("/etc/strecke/render_profiles.toml"));
    paths
}

/// First usable profile file on the search path, or the built-in style.
/// A broken file is reported and skipped rather than stopping the render.
pub fn load_default_profiles() -> RenderProfilesFile {
    let found = profile_search_paths()
        .into_iter()
        .filter(|p| p.exists())
        .find_map(|p| match load_profiles(&p) {
            Ok(file) => {
                tracing::info!(path = %p.display(), count = file.profiles.len(), "loaded render profiles");
                Some(file)
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping render profiles");
                None
            }
        });
    found.unwrap_or_else(|| {
        tracing::info!("no render profiles found, drawing with the built-in style");
        RenderProfilesFile::default()
    })
}
