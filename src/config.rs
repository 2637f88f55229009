use crate::core::{GameError, Result};
use crate::grid_view::{Glyphs, GridConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration structure parsed from a TOML file.
///
/// Every section and key is optional; missing values fall back to the
/// built-in defaults.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub grid: GridSection,
    pub glyphs: GlyphSection,
}

/// Grid size configuration.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GridSection {
    pub width: Option<u16>,
    pub height: Option<u16>,
}

/// Glyph configuration. Each value must be a single character.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GlyphSection {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub border: Option<String>,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GridOverrides {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub background: Option<char>,
    pub foreground: Option<char>,
    pub border: Option<char>,
}

impl Config {
    /// Resolves the final grid settings: override, then file, then default.
    pub fn grid_config(&self, overrides: &GridOverrides) -> Result<GridConfig> {
        let defaults = Glyphs::default();
        let glyphs = Glyphs {
            background: pick_glyph(
                "background",
                overrides.background,
                self.glyphs.background.as_deref(),
                defaults.background,
            )?,
            foreground: pick_glyph(
                "foreground",
                overrides.foreground,
                self.glyphs.foreground.as_deref(),
                defaults.foreground,
            )?,
            border: pick_glyph(
                "border",
                overrides.border,
                self.glyphs.border.as_deref(),
                defaults.border,
            )?,
        };
        let width = overrides.width.or(self.grid.width).unwrap_or(DEFAULT_WIDTH);
        let height = overrides
            .height
            .or(self.grid.height)
            .unwrap_or(DEFAULT_HEIGHT);

        GridConfig::new(width, height, glyphs)
    }
}

fn pick_glyph(name: &str, cli: Option<char>, file: Option<&str>, default: char) -> Result<char> {
    if let Some(c) = cli {
        return Ok(c);
    }
    match file {
        Some(s) => parse_glyph(name, s),
        None => Ok(default),
    }
}

/// Turns a config string into a glyph; it must hold exactly one character.
pub fn parse_glyph(name: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(GameError::Config(format!(
            "{} glyph must be exactly one character, got {:?}",
            name, value
        ))),
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
///
/// # Example
///
/// ```no_run
/// let config = gridcatch::config::load_config("config.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// `<config dir>/gridcatch/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gridcatch").join("config.toml"))
}

/// Loads `path` if given, else the default location if that file exists,
/// else the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => load_config(path),
        _ => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CONFIG: &str = r##"
[grid]
width = 40
height = 12

[glyphs]
background = " "
foreground = "@"
border = "#"
"##;

    #[test]
    fn test_load_config_from_str() {
        let config: Config = toml::from_str(SAMPLE_CONFIG).expect("Failed to parse sample config");
        assert_eq!(config.grid.width, Some(40));
        assert_eq!(config.grid.height, Some(12));
        assert_eq!(config.glyphs.foreground.as_deref(), Some("@"));
        assert_eq!(config.glyphs.border.as_deref(), Some("#"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[grid]\nwidth = 12\n").unwrap();
        let grid = config.grid_config(&GridOverrides::default()).unwrap();
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.height(), DEFAULT_HEIGHT);
        assert_eq!(grid.glyphs(), Glyphs::default());

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());
        assert_eq!(
            empty.grid_config(&GridOverrides::default()).unwrap(),
            GridConfig::default()
        );
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config: Config = toml::from_str("[grid]\nwidth = 12\n[glyphs]\nborder = \"#\"\n").unwrap();
        let overrides = GridOverrides {
            width: Some(20),
            border: Some('+'),
            ..GridOverrides::default()
        };
        let grid = config.grid_config(&overrides).unwrap();
        assert_eq!(grid.width(), 20);
        assert_eq!(grid.border(), '+');
    }

    #[test]
    fn test_blank_glyph_from_file_is_rejected() {
        // Parses fine, but a space background is not a visible glyph
        let config: Config = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert!(matches!(
            config.grid_config(&GridOverrides::default()),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_parse_glyph() {
        assert_eq!(parse_glyph("border", "#").unwrap(), '#');
        assert!(parse_glyph("border", "").is_err());
        assert!(parse_glyph("border", "##").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nheight = 6").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.grid.height, Some(6));
        assert_eq!(config.grid.width, None);

        let loaded = load_or_default(Some(file.path())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_config_errors() {
        let missing = load_config("/definitely/not/here/gridcatch.toml");
        assert!(matches!(missing, Err(GameError::Io(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nwidth = \"wide\"").unwrap();
        assert!(matches!(load_config(file.path()), Err(GameError::Toml(_))));
    }
}
