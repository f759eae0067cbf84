//! Data-driven configuration
//!
//! Engines, vehicles and key binds are described in JSON files. Decoding
//! raw keyboard input is an external collaborator's job; the vocabulary of
//! action names and the shape of each file is defined here.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::curve::{ConfigError, PowerCurve, SegmentFn};
use crate::sim::engine::EngineModel;
use crate::sim::world::WorldObject;

/// Power curve and engine coefficients for one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Curve segments, in domain order
    pub segments: Vec<SegmentFn>,
    /// Inclusive upper domain bound of each segment, strictly increasing
    pub limits: Vec<f32>,
    /// Revs the engine settles at with a closed throttle
    pub idle_revs: f32,
    /// Fraction of the revs delta realized per tick, in [0, 1]
    #[serde(default = "default_engine_resistance")]
    pub engine_resistance: f32,
}

fn default_engine_resistance() -> f32 {
    0.9
}

impl EngineConfig {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading engine config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing engine config {}", path.display()))?;
        log::info!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Validate the curve and build a fresh engine at idle.
    pub fn build(&self) -> Result<EngineModel, ConfigError> {
        let curve = PowerCurve::new(self.segments.clone(), self.limits.clone())?;
        Ok(EngineModel::new(curve, self.idle_revs, self.engine_resistance))
    }
}

/// One vehicle: its world size, engine reference and texture set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// World-unit width of the vehicle
    pub width: f32,
    /// World-unit length of the vehicle
    pub length: f32,
    /// Name of the engine config this vehicle uses
    pub engine: String,
    /// Name of the transmission config. Accepted and stored; no
    /// transmission model consumes it yet.
    #[serde(default)]
    pub transmission: Option<String>,
    /// Display-state name to texture location, passed through to the
    /// renderer untouched. Must contain "default".
    pub textures: BTreeMap<String, PathBuf>,
}

impl VehicleConfig {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading vehicle config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing vehicle config {}", path.display()))?;
        log::info!(
            "loaded vehicle config from {} ({} textures)",
            path.display(),
            config.textures.len()
        );
        Ok(config)
    }

    /// World object for this vehicle at a starting pose.
    pub fn object(&self, pos: Vec2, rotation: f32) -> WorldObject {
        WorldObject::new(pos, Vec2::new(self.width, self.length), rotation)
    }
}

/// Key binds: logical action name to key name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Action name (e.g. `throttle_100`) to the key bound to it
    pub binds: BTreeMap<String, String>,
    /// Log raw key codes as they arrive (for setting up binds)
    #[serde(default)]
    pub debug_binds: bool,
}

impl ControlsConfig {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading controls config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing controls config {}", path.display()))?;
        Ok(config)
    }

    /// Action names the capture layer should track.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.binds.keys().map(String::as_str)
    }
}
