//! Glyph configuration and runtime settings.
//!
//! Glyphs come from an optional JSON file:
//!
//! ```json
//! { "player": "😃", "ghost": "👻", "wall": "██", "use_emoji": true }
//! ```
//!
//! Every key is optional. `use_emoji` picks the base glyph set and the other
//! keys override single glyphs on top of it. The older `block` and
//! `do_use_emoji` keys are accepted as aliases; unknown keys are ignored.
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::LoadError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_MAZE_PATH: &str = "maze.txt";
pub const DEFAULT_TICK_MS: u64 = 200;
pub const TICK_ENV: &str = "MAZE_CHASE_TICK_MS";

/// What gets drawn for each kind of cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub player: String,
    pub ghost: String,
    pub wall: String,
    pub dot: String,
    pub death: String,
    pub space: String,
}

impl Glyphs {
    pub fn ascii() -> Self {
        Self {
            player: "P".into(),
            ghost: "G".into(),
            wall: "#".into(),
            dot: ".".into(),
            death: "X".into(),
            space: " ".into(),
        }
    }

    pub fn emoji() -> Self {
        Self {
            player: "😃".into(),
            ghost: "👻".into(),
            wall: "██".into(),
            dot: "·".into(),
            death: "💀".into(),
            space: " ".into(),
        }
    }

    pub fn all(&self) -> [&str; 6] {
        [
            self.player.as_str(),
            self.ghost.as_str(),
            self.wall.as_str(),
            self.dot.as_str(),
            self.death.as_str(),
            self.space.as_str(),
        ]
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::ascii()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GlyphFile {
    player: Option<String>,
    ghost: Option<String>,
    #[serde(alias = "block")]
    wall: Option<String>,
    dot: Option<String>,
    death: Option<String>,
    space: Option<String>,
    #[serde(alias = "do_use_emoji")]
    use_emoji: bool,
}

impl GlyphFile {
    fn into_glyphs(self) -> Glyphs {
        let base = if self.use_emoji {
            Glyphs::emoji()
        } else {
            Glyphs::ascii()
        };
        // Empty strings would collapse the grid, so they keep the base glyph.
        let pick = |value: Option<String>, fallback: String| {
            value.filter(|v| !v.is_empty()).unwrap_or(fallback)
        };
        Glyphs {
            player: pick(self.player, base.player),
            ghost: pick(self.ghost, base.ghost),
            wall: pick(self.wall, base.wall),
            dot: pick(self.dot, base.dot),
            death: pick(self.death, base.death),
            space: pick(self.space, base.space),
        }
    }
}

pub fn parse_glyphs(json: &str, path: &Path) -> Result<Glyphs, LoadError> {
    let file: GlyphFile = serde_json::from_str(json).map_err(|source| LoadError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.into_glyphs())
}

/// Loads glyphs from `path`, or from [`DEFAULT_CONFIG_PATH`] when no path is
/// given. A missing default file falls back to [`Glyphs::ascii`]; a missing
/// explicit file is an error.
pub fn load_glyphs(path: Option<&Path>) -> Result<Glyphs, LoadError> {
    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };

    if !explicit && !path.exists() {
        tracing::info!("no config at {}, using built-in glyphs", path.display());
        return Ok(Glyphs::default());
    }

    let json = fs::read_to_string(path).map_err(|source| LoadError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    let glyphs = parse_glyphs(&json, path)?;
    tracing::info!("loaded glyphs from {}", path.display());
    Ok(glyphs)
}

/// Tick interval, overridable through [`TICK_ENV`].
pub fn tick_interval() -> Duration {
    let ms = env::var(TICK_ENV)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(json: &str) -> Result<Glyphs, LoadError> {
        parse_glyphs(json, Path::new("test.json"))
    }

    #[test]
    fn empty_object_is_ascii() {
        assert_eq!(parse("{}").unwrap(), Glyphs::ascii());
    }

    #[test]
    fn emoji_toggle_switches_base_set() {
        let glyphs = parse(r#"{ "use_emoji": true, "ghost": "@" }"#).unwrap();
        assert_eq!(glyphs.player, Glyphs::emoji().player);
        assert_eq!(glyphs.ghost, "@");
    }

    #[test]
    fn accepts_legacy_keys_and_ignores_unknown_ones() {
        let json = r#"{
            "player": "C",
            "block": "=",
            "pill": "o",
            "do_use_emoji": false
        }"#;
        let glyphs = parse(json).unwrap();
        assert_eq!(glyphs.player, "C");
        assert_eq!(glyphs.wall, "=");
        assert_eq!(glyphs.dot, ".");
    }

    #[test]
    fn empty_glyphs_keep_the_default() {
        let glyphs = parse(r#"{ "space": "" }"#).unwrap();
        assert_eq!(glyphs.space, " ");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(parse("{ player: "), Err(LoadError::Config { .. })));
        assert!(matches!(parse(r#"{ "use_emoji": "yes" }"#), Err(LoadError::Config { .. })));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "dot": "*" }}"#).unwrap();
        let glyphs = load_glyphs(Some(file.path())).unwrap();
        assert_eq!(glyphs.dot, "*");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            load_glyphs(Some(path.as_path())),
            Err(LoadError::ConfigIo { .. })
        ));
    }
}
