use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::api::{ClientConfig, Viewer};
use crate::grid::GridOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_start_hour")]
    pub start_hour: i32,
    #[serde(default = "default_end_hour")]
    pub end_hour: i32,
    #[serde(default = "default_px_per_minute")]
    pub px_per_minute: f32,
    #[serde(default = "default_mobile_px_per_minute")]
    pub mobile_px_per_minute: f32,
    #[serde(default)]
    pub mobile: bool,
    #[serde(default = "default_true")]
    pub show_room: bool,
    #[serde(default = "default_true")]
    pub show_label: bool,
    #[serde(default = "default_true")]
    pub show_header: bool,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api/v1".to_string()
}

fn default_start_hour() -> i32 {
    7 // 07.00
}

fn default_end_hour() -> i32 {
    21 // 21.00
}

fn default_px_per_minute() -> f32 {
    0.9
}

fn default_mobile_px_per_minute() -> f32 {
    0.7
}

fn default_true() -> bool {
    true
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token: None,
            user_id: None,
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            px_per_minute: default_px_per_minute(),
            mobile_px_per_minute: default_mobile_px_per_minute(),
            mobile: false,
            show_room: true,
            show_label: true,
            show_header: true,
            font_scale: default_font_scale(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!(path = %path.display(), "Loading config");
            let contents = fs::read_to_string(path)
                .context("Failed to read config file")?;
            Self::from_json(&contents)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse config file")
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("id", "jadwal", "jadwal")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_base_url.clone());
        match &self.token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }

    /// Who is signed in, if anyone
    pub fn viewer(&self) -> Option<Viewer> {
        self.user_id
            .as_ref()
            .filter(|id| !id.is_empty())
            .map(|id| Viewer {
                user_id: id.clone(),
            })
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            px_per_minute: if self.mobile {
                self.mobile_px_per_minute
            } else {
                self.px_per_minute
            },
            show_label: self.show_label,
            show_header: self.show_header,
            show_room: self.show_room,
            mobile: self.mobile,
        }
    }
}

/// Values given on the command line; they last for one run only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub mobile: Option<bool>,
}

impl Overrides {
    fn applied_to(&self, stored: &Config) -> Config {
        let mut config = stored.clone();
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(mobile) = self.mobile {
            config.mobile = mobile;
        }
        config
    }
}

/// The config a run works with
///
/// Reads go through [`Settings::config`], which has the overrides applied.
/// Changes land in the stored copy only, and only the stored copy is ever
/// written. Without a file path nothing is written at all.
#[derive(Debug, Clone)]
pub struct Settings {
    stored: Config,
    overrides: Overrides,
    effective: Config,
    path: Option<PathBuf>,
}

impl Settings {
    pub fn new(stored: Config, overrides: Overrides, path: Option<PathBuf>) -> Self {
        let effective = overrides.applied_to(&stored);
        Self {
            stored,
            overrides,
            effective,
            path,
        }
    }

    /// Load from the platform config dir
    pub fn load(overrides: Overrides) -> Self {
        match Config::config_path() {
            Ok(path) => Self::load_from(path, overrides),
            Err(e) => {
                warn!("Settings will not be saved: {:#}", e);
                Self::new(Config::default(), overrides, None)
            }
        }
    }

    /// Load from `path`; an unreadable file is left alone and never overwritten
    pub fn load_from(path: PathBuf, overrides: Overrides) -> Self {
        match Config::load_from(&path) {
            Ok(stored) => Self::new(stored, overrides, Some(path)),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    "Using default config, changes will not be saved: {:#}", e
                );
                Self::new(Config::default(), overrides, None)
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.effective
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Change stored values without writing them yet
    pub fn change(&mut self, edit: impl FnOnce(&mut Config)) {
        edit(&mut self.stored);
        self.effective = self.overrides.applied_to(&self.stored);
    }

    pub fn save(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.stored.save_to(path),
            None => Ok(()),
        }
    }

    /// Switch between the desktop and compact layouts and remember the choice
    pub fn toggle_mobile(&mut self) -> Result<()> {
        let mobile = !self.effective.mobile;
        self.overrides.mobile = None;
        self.change(|config| config.mobile = mobile);
        self.save()
    }
}
