//! Per-tick input snapshot
//!
//! External key capture produces an [`ActionSnapshot`] once per tick
//! boundary: an immutable map from logical action name to pressed state.
//! The simulation never sees raw key events and nothing mutates the
//! snapshot mid-tick, so there is no shared event state to race on.
//!
//! Action names carry their magnitude as a percent suffix: `throttle_100`,
//! `brake_50`, `left_100`. A bare name means full magnitude.

use std::collections::BTreeMap;

/// Plain-scalar input for a single tick (deterministic).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Driver throttle in [0, 1]
    pub throttle: f32,
    /// Environmental load scalar handed to the engine (braking for now)
    pub resistance: f32,
    /// Steering in [-1, 1]; negative is left
    pub steer: f32,
}

/// Pressed-state of every bound action, captured at the tick boundary.
#[derive(Debug, Clone, Default)]
pub struct ActionSnapshot {
    actions: BTreeMap<String, bool>,
}

impl ActionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action's pressed state (called by the capture layer
    /// before the snapshot is handed to the tick).
    pub fn set(&mut self, action: impl Into<String>, pressed: bool) {
        self.actions.insert(action.into(), pressed);
    }

    pub fn is_pressed(&self, action: &str) -> bool {
        self.actions.get(action).copied().unwrap_or(false)
    }

    /// Fold the snapshot into plain scalars.
    ///
    /// Per channel the strongest pressed magnitude wins; left and right
    /// steering oppose each other. Actions the simulation does not own
    /// (quit, debug toggles) are ignored here.
    pub fn resolve(&self) -> TickInput {
        let mut throttle = 0.0f32;
        let mut brake = 0.0f32;
        let mut left = 0.0f32;
        let mut right = 0.0f32;

        for (action, &pressed) in &self.actions {
            if !pressed {
                continue;
            }
            let (channel, magnitude) = split_action(action);
            match channel {
                "throttle" => throttle = throttle.max(magnitude),
                "brake" => brake = brake.max(magnitude),
                "left" => left = left.max(magnitude),
                "right" => right = right.max(magnitude),
                _ => {}
            }
        }

        TickInput {
            throttle,
            resistance: brake,
            steer: right - left,
        }
    }
}

/// Split `throttle_100` into (`throttle`, 1.0). A missing or non-numeric
/// suffix means full magnitude.
fn split_action(action: &str) -> (&str, f32) {
    if let Some((channel, suffix)) = action.rsplit_once('_') {
        if let Ok(percent) = suffix.parse::<f32>() {
            return (channel, percent / 100.0);
        }
    }
    (action, 1.0)
}
