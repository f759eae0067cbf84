//! Deterministic simulation module
//!
//! All vehicle and world logic lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Stable iteration order (registry sorted by name)
//! - Input arrives as an immutable per-tick snapshot
//! - No rendering or platform dependencies

pub mod curve;
pub mod engine;
pub mod input;
pub mod tick;
pub mod world;

pub use curve::{ConfigError, EvaluationError, PowerCurve, SegmentFn};
pub use engine::{EngineModel, UpdateError, ValidationError};
pub use input::{ActionSnapshot, TickInput};
pub use tick::{FixedTimestep, SimState, TickError, tick};
pub use world::{ObjectRegistry, RegistryError, RenderKind, WorldObject};
