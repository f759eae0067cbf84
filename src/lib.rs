//! Revsim - a headless vehicle simulation sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (power curve, engine model, world objects)
//! - `camera`: World-to-screen projection and visibility culling
//! - `config`: Data-driven engine/vehicle/controls configuration
//!
//! The crate is fully headless: everything here is constructible and testable
//! with no window, asset, or input subsystem present. Rendering collaborators
//! consume [`camera::Projection`] values; input collaborators feed
//! [`sim::ActionSnapshot`]s captured once per tick.

pub mod camera;
pub mod config;
pub mod sim;

pub use camera::{Camera, Projection};
pub use sim::{EngineModel, ObjectRegistry, PowerCurve, SimState, WorldObject};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (100 Hz)
    pub const SIM_DT: f32 = 1.0 / 100.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default camera zoom: world units of vertical extent on screen
    pub const DEFAULT_CAM_ZOOM: f32 = 10.0;

    /// Steering rate at full lock, degrees per tick
    pub const STEER_RATE: f32 = 1.2;
    /// Forward travel at max revs, world units per tick.
    /// Placeholder drivetrain coupling; see `sim::tick`.
    pub const DRIVE_STEP: f32 = 0.3;
}

/// Normalize a rotation in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(mut deg: f32) -> f32 {
    while deg >= 360.0 {
        deg -= 360.0;
    }
    while deg < 0.0 {
        deg += 360.0;
    }
    deg
}

/// Displace `pos` by `distance` along a heading in degrees.
///
/// Heading 0° points up on screen and increases clockwise, so the heading is
/// shifted by -90° before the usual cos/sin displacement.
#[inline]
pub fn move_direction(pos: Vec2, heading_deg: f32, distance: f32) -> Vec2 {
    let rad = (heading_deg - 90.0).to_radians();
    Vec2::new(pos.x + distance * rad.cos(), pos.y + distance * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wraps_up() {
        assert_eq!(normalize_degrees(350.0 + 20.0), 10.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
    }

    #[test]
    fn test_normalize_wraps_down() {
        assert_eq!(normalize_degrees(10.0 - 20.0), 350.0);
        assert_eq!(normalize_degrees(-360.0), 0.0);
    }

    #[test]
    fn test_move_direction_up_is_negative_y() {
        let p = move_direction(Vec2::ZERO, 0.0, 1.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_direction_clockwise_right() {
        // 90° heading moves along +x (right on screen)
        let p = move_direction(Vec2::ZERO, 90.0, 2.0);
        assert!((p.x - 2.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }
}
