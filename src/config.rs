use crate::keybindings::{Keybindings, KeybindingsConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Whether the sidebar starts hidden. Persisted on every toggle.
    #[serde(default)]
    pub sidebar_collapsed: bool,

    /// Sidebar width as a percentage of the terminal width
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_collapsed: false,
            sidebar_width: default_sidebar_width(),
        }
    }
}

fn default_sidebar_width() -> u16 {
    30
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/folio/config.toml
    /// - Linux: ~/.config/folio/config.toml
    /// - Windows: %APPDATA%/folio/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folio").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                fs::read_to_string(&path)
                    .ok()
                    .and_then(|contents| toml::from_str(&contents).ok())
            })
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("Could not determine config directory")?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        Ok(())
    }

    /// Update the sidebar-collapsed preference and save config
    pub fn set_sidebar_collapsed(
        &mut self,
        collapsed: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.ui.sidebar_collapsed = collapsed;
        self.save()
    }

    /// Get keybindings with user customizations applied
    pub fn keybindings(&self) -> Keybindings {
        self.keybindings.to_keybindings()
    }
}
