//! UI configuration
//!
//! All layout constants, colors, menu sections and palette entries can be
//! overridden from a JSON file. Every field has a default, so a partial file
//! such as `{ "grid": { "spacing": [32, 32] } }` is valid.
//!
//! # Example Usage
//!
//! ```ignore
//! let config = UiConfig::load_or_default(UiConfig::default_path())?;
//! let grid = Grid::from_config(&config.grid)?;
//! ```

use crate::building_panel::{ItemTemplate, PanelStyle};
use crate::error::UiError;
use crate::grid::GridConfig;
use crate::gui::context_menu::{default_sections, MenuSection, MenuStyle};
use log::{info, warn};
use sdl2::pixels::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Serde mirror of `sdl2::pixels::Color`; alpha defaults to opaque
#[derive(Serialize, Deserialize)]
#[serde(remote = "Color")]
pub struct ColorDef {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Logical screen size in pixels
    pub screen: (u32, u32),
    pub grid: GridConfig,
    pub panel: PanelStyle,
    pub menu: MenuStyle,
    pub sections: Vec<MenuSection>,
    pub palette: Vec<ItemTemplate>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            screen: (800, 600),
            grid: GridConfig::default(),
            panel: PanelStyle::default(),
            menu: MenuStyle::default(),
            sections: default_sections(),
            palette: vec![
                ItemTemplate::new("Wall", (40, 40), Color::RGB(255, 0, 0)),
                ItemTemplate::new("Floor", (40, 40), Color::RGB(0, 200, 0)),
                ItemTemplate::new("Water", (40, 40), Color::RGB(30, 144, 255)),
                ItemTemplate::new("Road", (40, 40), Color::RGB(255, 215, 0)),
                ItemTemplate::new("Shop", (40, 40), Color::RGB(255, 165, 0)),
            ],
        }
    }
}

impl UiConfig {
    /// `<config dir>/grid-builder/ui.json`, or `./ui.json` when the
    /// platform has no config directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("grid-builder").join("ui.json"))
            .unwrap_or_else(|| PathBuf::from("ui.json"))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, UiError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, UiError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads `path`, falling back to the defaults when the file doesn't exist.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, UiError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("No UI config at {}, using defaults", path.display());
            return Ok(UiConfig::default());
        }

        let config = Self::load_from_file(path)?;
        info!("Loaded UI config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UiConfig::default();
        assert_eq!(config.screen, (800, 600));
        assert_eq!(config.grid.spacing, (40, 40));
        assert_eq!(config.panel.items_per_row, 2);
        assert_eq!(config.palette.len(), 5);
        assert_eq!(config.sections.len(), 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = UiConfig::from_json(r#"{ "grid": { "spacing": [32, 24] } }"#).unwrap();
        assert_eq!(config.grid.spacing, (32, 24));
        assert_eq!(config.grid.offset, (0, 0));
        assert_eq!(config.menu, MenuStyle::default());
        assert_eq!(config.palette, UiConfig::default().palette);
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let config = UiConfig::from_json(
            r#"{ "palette": [ { "label": "Tower", "size": [20, 20], "color": { "r": 1, "g": 2, "b": 3 } } ] }"#,
        )
        .unwrap();
        assert_eq!(config.palette[0].color, Color::RGBA(1, 2, 3, 255));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = UiConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(UiConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(UiConfig::from_json("{ not json"), Err(UiError::Config(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("grid-builder-missing-config-test.json");
        let config = UiConfig::load_or_default(&path).unwrap();
        assert_eq!(config, UiConfig::default());
    }
}
