//! Instance settings.
//!
//! Read from JSON (camelCase keys). Every field has a default, so `{}` is a
//! valid settings document.

use crate::constants::DEFAULT_ZOOM;
use crate::error::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Options applied to every drag session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragOptions {
    /// `cursor` style set on the primary element while it is dragged
    pub cursor: Option<String>,
    /// `z-index` style set on the primary element while it is dragged
    pub z_index: Option<i32>,
    /// Snap positions to a `[x, y]` grid
    pub grid: Option<[f64; 2]>,
    /// Keep the primary element inside the container's box
    pub containment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Current zoom of the container; pointer deltas are divided by it
    pub zoom: f64,
    pub drag: DragOptions,
    /// Class toggled on connectors, endpoints and overlays under the pointer
    pub hover_class: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            drag: DragOptions::default(),
            hover_class: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&content)
            .with_context(|| format!("failed to parse settings in {}", path.display()))?;
        debug!(path = %path.display(), zoom = settings.zoom, "settings loaded");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(Error::InvalidSettings(format!("zoom must be positive, got {}", self.zoom)));
        }
        if let Some([gx, gy]) = self.drag.grid {
            if !(gx.is_finite() && gx > 0.0 && gy.is_finite() && gy > 0.0) {
                return Err(Error::InvalidSettings(format!("grid must be positive, got [{gx}, {gy}]")));
            }
        }
        Ok(())
    }
}
