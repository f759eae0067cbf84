//! World objects and the named object registry
//!
//! Objects live in an unbounded 2D world measured in abstract units; how big
//! a unit is on screen is the camera's business. An object carries no
//! behavior beyond mutation accessors - movement policy belongs to the tick.

use glam::Vec2;
use std::collections::BTreeMap;
use std::fmt;

use crate::{move_direction, normalize_degrees};

/// How the camera projects an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderKind {
    /// Positioned, sized, culled like any sprite
    #[default]
    Standard,
    /// Full-screen backdrop with its own center as world origin (the map);
    /// clipped to the visible rectangle instead of culled
    Backdrop,
}

/// A positioned, sized, rotated entity in world units.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    /// World position, unbounded
    pub pos: Vec2,
    /// Width and height in world units
    pub size: Vec2,
    /// Rotation in degrees, always in [0, 360)
    rotation: f32,
    /// Display-state tag: selects which texture a renderer uses. Opaque
    /// here; "default" must exist in any texture set.
    state: String,
    pub kind: RenderKind,
}

impl WorldObject {
    pub fn new(pos: Vec2, size: Vec2, rotation: f32) -> Self {
        Self {
            pos,
            size,
            rotation: normalize_degrees(rotation),
            state: "default".to_string(),
            kind: RenderKind::Standard,
        }
    }

    /// A backdrop object (the map), centered on the world origin.
    pub fn backdrop(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            rotation: 0.0,
            state: "default".to_string(),
            kind: RenderKind::Backdrop,
        }
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Rotate by `degrees`, wrapping back into [0, 360).
    pub fn rotate_by(&mut self, degrees: f32) -> f32 {
        self.rotation = normalize_degrees(self.rotation + degrees);
        self.rotation
    }

    /// Set an absolute rotation, wrapped into [0, 360).
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }

    /// Shift the position by a world-space delta.
    pub fn translate(&mut self, delta: Vec2) -> Vec2 {
        self.pos += delta;
        self.pos
    }

    /// Step `distance` units along the current heading.
    pub fn advance(&mut self, distance: f32) -> Vec2 {
        self.pos = move_direction(self.pos, self.rotation, distance);
        self.pos
    }

    #[inline]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Switch the display-state tag (which texture a renderer picks).
    pub fn set_state(&mut self, state: impl Into<String>) {
        self.state = state.into();
    }
}

/// Registry lookup/insert failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An object with this name already exists
    Duplicate(String),
    /// No object with this name
    Unknown(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(name) => write!(f, "object named {name:?} already exists"),
            Self::Unknown(name) => write!(f, "no object named {name:?}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// All world objects, keyed by unique name.
///
/// Only the simulation thread mutates the registry. A render path reading
/// concurrently gets relaxed consistency: a torn mid-tick read is acceptable
/// staleness, not a correctness hazard. Iteration order is stable (sorted by
/// name) so a frame walks objects deterministically.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: BTreeMap<String, WorldObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object under a unique name.
    pub fn insert(&mut self, name: impl Into<String>, object: WorldObject) -> Result<(), RegistryError> {
        let name = name.into();
        if self.objects.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        log::debug!("registry: insert {name:?}");
        self.objects.insert(name, object);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&WorldObject, RegistryError> {
        self.objects
            .get(name)
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut WorldObject, RegistryError> {
        self.objects
            .get_mut(name)
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }

    /// Shift a named object by a world-space delta; returns the new position.
    pub fn translate(&mut self, name: &str, delta: Vec2) -> Result<Vec2, RegistryError> {
        Ok(self.get_mut(name)?.translate(delta))
    }

    /// Step a named object along its heading; returns the new position.
    pub fn advance(&mut self, name: &str, distance: f32) -> Result<Vec2, RegistryError> {
        Ok(self.get_mut(name)?.advance(distance))
    }

    /// Rotate a named object, wrapping; returns the new rotation.
    pub fn rotate(&mut self, name: &str, degrees: f32) -> Result<f32, RegistryError> {
        Ok(self.get_mut(name)?.rotate_by(degrees))
    }

    /// Iterate (name, object) pairs in stable name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WorldObject)> {
        self.objects.iter().map(|(name, obj)| (name.as_str(), obj))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
