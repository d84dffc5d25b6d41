//! bitruvius.toml configuration

use anyhow::{Context, Result};
use bitruvius_animation::GaitParameters;
use bitruvius_core::{PivotOffsets, Proportions};
use bitruvius_pose::MIRRORED_SEEDS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "bitruvius.toml";

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct BitruviusConfig {
    #[serde(default)]
    pub gait: GaitParameters,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub figure: FigureConfig,

    /// Per-joint whole-degree corrections applied at evaluation time
    #[serde(default)]
    pub pivots: PivotOffsets,

    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,

    #[serde(default = "default_frames")]
    pub frames: u32,

    /// Spring-driven head bobble
    #[serde(default)]
    pub bobblehead: bool,

    #[serde(default)]
    pub start_ms: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            frames: default_frames(),
            bobblehead: false,
            start_ms: 0.0,
        }
    }
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct FigureConfig {
    /// Base unit H in pixels
    #[serde(default = "default_unit")]
    pub unit: f64,

    #[serde(default = "default_floor_y")]
    pub floor_y: f64,

    #[serde(default)]
    pub proportions: Proportions,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            floor_y: default_floor_y(),
            proportions: Proportions::default(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// JSON catalog to use instead of the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Ids that get a derived right-hand variant
    #[serde(default = "default_mirror")]
    pub mirror: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: None,
            mirror: default_mirror(),
        }
    }
}

fn default_fps() -> u32 {
    60
}

fn default_frames() -> u32 {
    120
}

fn default_unit() -> f64 {
    50.0
}

fn default_floor_y() -> f64 {
    400.0
}

fn default_mirror() -> Vec<String> {
    MIRRORED_SEEDS.iter().map(|id| id.to_string()).collect()
}

impl BitruviusConfig {
    /// Load an explicit config file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

        let mut config: BitruviusConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        // Relative library paths resolve against the config file
        if let (Some(library), Some(dir)) = (config.library.path.as_mut(), path.parent()) {
            if library.is_relative() {
                *library = dir.join(&*library);
            }
        }

        Ok(config)
    }

    /// Load bitruvius.toml from a directory, falling back to defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, dir.display());
            Ok(Self::default())
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
