//! Configuration module for linkpick
//!
//! Two files live under `<config_dir>/linkpick/`:
//! - `config.json`: picker behavior (style, window policy, scale,
//!   layout overrides), every field defaulted so partial files work
//! - `browsers.ron`: the browser/profile catalog the picker presents
//!
//! Missing files fall back to built-in defaults covering common Linux
//! browsers; parse failures are reported, not papered over.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;

/// Which of the near-identical picker looks to render. All of them run
/// through the same layout engine and selection controller; the style
/// only selects a layout preset and flat vs. two-level mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PickerStyle {
    /// Glass-morphism flat grid
    #[default]
    Glass,
    /// Compact card grid
    Cards,
    /// Browser bar with an expandable profile sub-grid
    TwoLevel,
}

impl PickerStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "glass" => Some(Self::Glass),
            "cards" => Some(Self::Cards),
            "two-level" => Some(Self::TwoLevel),
            _ => None,
        }
    }

    pub fn layout(self) -> LayoutConfig {
        match self {
            Self::Glass => LayoutConfig::glass(),
            Self::Cards => LayoutConfig::cards(),
            Self::TwoLevel => LayoutConfig::two_level(),
        }
    }

    pub fn is_two_level(self) -> bool {
        matches!(self, Self::TwoLevel)
    }
}

/// Picker behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub style: PickerStyle,
    /// Keep the picker above other windows
    #[serde(default = "default_true")]
    pub always_on_top: bool,
    /// Cancel the session when the window loses focus
    #[serde(default)]
    pub close_on_focus_loss: bool,
    /// Global scale factor applied to cards and spacing
    #[serde(default = "default_scale")]
    pub ui_scale: f32,
    /// Override the preset card edge length
    #[serde(default)]
    pub card_size: Option<f32>,
    /// Override the preset card spacing
    #[serde(default)]
    pub spacing: Option<f32>,
    /// Override the preset column cap
    #[serde(default)]
    pub max_columns: Option<usize>,
}

fn default_true() -> bool {
    true
}

fn default_scale() -> f32 {
    1.0
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            style: PickerStyle::default(),
            always_on_top: true,
            close_on_focus_loss: false,
            ui_scale: 1.0,
            card_size: None,
            spacing: None,
            max_columns: None,
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linkpick")
}

impl PickerConfig {
    /// Get the path to the settings file
    pub fn config_path() -> PathBuf {
        config_dir().join("config.json")
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_path();
        if path.exists() {
            fs::read_to_string(&path)
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    /// Layout preset for the configured style with overrides applied.
    pub fn layout(&self) -> LayoutConfig {
        let mut cfg = self.style.layout();
        if let Some(card) = self.card_size {
            cfg.card_size = card;
        }
        if let Some(spacing) = self.spacing {
            cfg.spacing = spacing;
        }
        if let Some(cols) = self.max_columns {
            cfg.max_columns = cols.max(1);
            cfg.min_columns = cfg.min_columns.min(cfg.max_columns);
        }
        cfg
    }
}

/// One browser in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserEntry {
    pub name: String,
    /// Executable, optionally with fixed leading arguments
    pub command: String,
    /// Freedesktop icon name or absolute path
    #[serde(default)]
    pub icon: Option<String>,
    /// Argument template selecting a profile, `{profile}` is replaced
    /// with the profile id, e.g. `"--profile-directory={profile}"`
    #[serde(default)]
    pub profile_arg: Option<String>,
    /// Extra argument(s) for private/incognito profiles
    #[serde(default)]
    pub private_arg: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub profiles: Vec<ProfileEntry>,
}

/// One profile under a browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub name: String,
    /// Value substituted into the browser's `profile_arg`
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub incognito: bool,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse browser catalog: {0}")]
    Catalog(#[from] ron::error::SpannedError),
}

/// Get the path to the browser catalog file
pub fn browsers_path() -> PathBuf {
    config_dir().join("browsers.ron")
}

/// Read the browser catalog, falling back to built-in defaults when the
/// file does not exist.
pub fn read_browsers(path: Option<PathBuf>) -> Result<Vec<BrowserEntry>, ConfigError> {
    let path = path.unwrap_or_else(browsers_path);
    if !path.exists() {
        return Ok(default_browsers());
    }
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(ron::from_str(&content)?)
}

/// Catalog used when no `browsers.ron` exists.
pub fn default_browsers() -> Vec<BrowserEntry> {
    vec![
        BrowserEntry {
            name: "Firefox".into(),
            command: "firefox".into(),
            icon: Some("firefox".into()),
            profile_arg: Some("-P {profile}".into()),
            private_arg: Some("--private-window".into()),
            hidden: false,
            profiles: vec![
                ProfileEntry {
                    name: "Default".into(),
                    id: Some("default-release".into()),
                    icon: None,
                    incognito: false,
                    hidden: false,
                },
                ProfileEntry {
                    name: "Private".into(),
                    id: Some("default-release".into()),
                    icon: None,
                    incognito: true,
                    hidden: false,
                },
            ],
        },
        BrowserEntry {
            name: "Chromium".into(),
            command: "chromium".into(),
            icon: Some("chromium".into()),
            profile_arg: Some("--profile-directory={profile}".into()),
            private_arg: Some("--incognito".into()),
            hidden: false,
            profiles: vec![
                ProfileEntry {
                    name: "Default".into(),
                    id: Some("Default".into()),
                    icon: None,
                    incognito: false,
                    hidden: false,
                },
                ProfileEntry {
                    name: "Incognito".into(),
                    id: Some("Default".into()),
                    icon: None,
                    incognito: true,
                    hidden: false,
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_file_uses_defaults() {
        let cfg: PickerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.style, PickerStyle::Glass);
        assert!(cfg.always_on_top);
        assert!(!cfg.close_on_focus_loss);
        assert_eq!(cfg.ui_scale, 1.0);
    }

    #[test]
    fn style_names_round_trip() {
        for (name, style) in [
            ("glass", PickerStyle::Glass),
            ("cards", PickerStyle::Cards),
            ("two-level", PickerStyle::TwoLevel),
        ] {
            assert_eq!(PickerStyle::parse(name), Some(style));
        }
        assert_eq!(PickerStyle::parse("radial"), None);
    }

    #[test]
    fn catalog_ron_parses() {
        let ron = r#"#![enable(implicit_some)]
        [
            (
                name: "Firefox",
                command: "firefox",
                profile_arg: "-P {profile}",
                profiles: [
                    (name: "Work", id: "work"),
                    (name: "Private", id: "work", incognito: true),
                ],
            ),
        ]"#;
        let entries: Vec<BrowserEntry> = ron::from_str(ron).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].profiles.len(), 2);
        assert!(entries[0].profiles[1].incognito);
        assert!(!entries[0].hidden);
    }

    #[test]
    fn layout_overrides_apply() {
        let cfg = PickerConfig {
            card_size: Some(100.0),
            max_columns: Some(3),
            ..PickerConfig::default()
        };
        let layout = cfg.layout();
        assert_eq!(layout.card_size, 100.0);
        assert_eq!(layout.max_columns, 3);
    }

    #[test]
    fn default_catalog_is_usable() {
        let entries = default_browsers();
        assert!(!entries.is_empty());
        for e in &entries {
            assert!(!e.command.is_empty());
            assert!(!e.profiles.is_empty());
        }
    }
}
