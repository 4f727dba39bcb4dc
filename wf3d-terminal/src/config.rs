//! Renderer configuration
//!
//! Settings are read from `wf3d.toml` (or a path given on the command line)
//! and may be overridden by environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use wf3d_core::{Color, SceneSettings};

/// Default config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "wf3d.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Wf3dConfig {
    /// Framebuffer dimensions
    pub frame: FrameConfig,
    /// Drawing settings
    pub draw: DrawConfig,
    /// Solid tessellation settings
    pub solids: SolidsConfig,
    /// Transform stack settings
    pub stack: StackConfig,
    /// Terminal display settings
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DrawConfig {
    /// Line color as `[r, g, b]`
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolidsConfig {
    /// Degrees between sphere samples
    pub sphere_step: u32,
    /// Degrees between torus samples
    pub torus_step: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackConfig {
    /// Maximum number of nested coordinate frames, base frame included
    pub max_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// When false, `display` commands are logged and skipped
    pub enabled: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        let settings = SceneSettings::default();
        Self {
            width: settings.width,
            height: settings.height,
        }
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        let c = SceneSettings::default().color;
        Self {
            color: [c.r, c.g, c.b],
        }
    }
}

impl Default for SolidsConfig {
    fn default() -> Self {
        let settings = SceneSettings::default();
        Self {
            sphere_step: settings.sphere_step,
            torus_step: settings.torus_step,
        }
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            max_depth: SceneSettings::default().max_stack_depth,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Wf3dConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load `wf3d.toml` from the current directory, or the defaults if it is
    /// missing. A file that exists but does not parse is still an error.
    pub fn load_or_default() -> Result<Self, String> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::load_from_file(DEFAULT_CONFIG_FILE)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    /// Apply `WF3D_*` overrides fetched through `lookup`.
    ///
    /// Values that do not parse leave the current setting in place.
    pub fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(width) = lookup("WF3D_WIDTH").and_then(|v| v.parse::<usize>().ok()) {
            self.frame.width = width;
        }
        if let Some(height) = lookup("WF3D_HEIGHT").and_then(|v| v.parse::<usize>().ok()) {
            self.frame.height = height;
        }
        if let Some(color) = lookup("WF3D_COLOR").and_then(|v| parse_color(&v)) {
            self.draw.color = color;
        }
        if let Some(val) = lookup("WF3D_DISPLAY") {
            self.display.enabled = val == "1" || val.eq_ignore_ascii_case("true");
        }
    }

    pub fn to_settings(&self) -> SceneSettings {
        let [r, g, b] = self.draw.color;
        SceneSettings {
            width: self.frame.width,
            height: self.frame.height,
            color: Color::new(r, g, b),
            sphere_step: self.solids.sphere_step,
            torus_step: self.solids.torus_step,
            max_stack_depth: self.stack.max_depth,
        }
    }
}

/// Parse `r,g,b` into a color triple.
pub fn parse_color(value: &str) -> Option<[u8; 3]> {
    let mut parts = value.split(',').map(|p| p.trim().parse::<u8>());
    let color = [parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?];
    if parts.next().is_some() {
        return None;
    }
    Some(color)
}
