//! Fixed timestep simulation tick
//!
//! The owning loop accumulates wall-clock time, asks [`FixedTimestep`] how
//! many whole ticks fit, and calls [`tick`] that many times with the
//! snapshot-resolved input. Simulation rate stays fixed regardless of how
//! fast frames render.

use std::fmt;

use crate::camera::Camera;
use crate::consts::{DRIVE_STEP, MAX_SUBSTEPS, SIM_DT, STEER_RATE};
use crate::sim::engine::{EngineModel, UpdateError};
use crate::sim::input::TickInput;
use crate::sim::world::{ObjectRegistry, RegistryError};

/// A tick failed; the state is as it was before the tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickError {
    Engine(UpdateError),
    Registry(RegistryError),
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(err) => err.fmt(f),
            Self::Registry(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for TickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            Self::Registry(err) => Some(err),
        }
    }
}

impl From<UpdateError> for TickError {
    fn from(err: UpdateError) -> Self {
        Self::Engine(err)
    }
}

impl From<RegistryError> for TickError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

/// Everything the simulation owns. Mutated only by [`tick`], on one thread.
#[derive(Debug, Clone)]
pub struct SimState {
    pub engine: EngineModel,
    pub objects: ObjectRegistry,
    pub camera: Camera,
    /// Registry name of the player vehicle
    player: String,
    /// Ticks simulated so far
    pub time_ticks: u64,
}

impl SimState {
    /// Assemble a simulation; the player vehicle must already be in the
    /// registry.
    pub fn new(
        engine: EngineModel,
        objects: ObjectRegistry,
        camera: Camera,
        player: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let player = player.into();
        objects.get(&player)?;
        Ok(Self {
            engine,
            objects,
            camera,
            player,
            time_ticks: 0,
        })
    }

    pub fn player(&self) -> &str {
        &self.player
    }
}

/// Advance the simulation by one fixed tick.
///
/// Order: engine first (its validation guards the whole tick), then player
/// steering and travel, then camera follow. An engine failure aborts before
/// anything moved.
pub fn tick(state: &mut SimState, input: &TickInput) -> Result<(), TickError> {
    state.engine.update(input.throttle, input.resistance)?;

    if input.steer != 0.0 {
        state.objects.rotate(&state.player, input.steer * STEER_RATE)?;
    }

    // Travel scales with how far the engine is revving above idle.
    // TODO: replace with real drive force once the transmission model
    // referenced by vehicle configs is implemented.
    let idle = state.engine.idle_revs();
    let span = state.engine.max_revs() - idle;
    let speed = ((state.engine.revs() - idle) / span).max(0.0) * DRIVE_STEP;
    let pos = state.objects.advance(&state.player, speed)?;

    state.camera.set_pos(pos);
    state.time_ticks += 1;
    Ok(())
}

/// Wall-clock to fixed-tick accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `elapsed` seconds and return how many whole ticks to run now,
    /// capped at [`MAX_SUBSTEPS`] so a long stall cannot spiral.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.min(0.1);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of a tick currently banked, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
