//! Engine model: throttle in, revs and torque out
//!
//! Revs track a throttle-implied target between idle and the curve's max,
//! damped by the engine's internal resistance. Torque is read off the power
//! curve at the current revs and scaled by throttle, so a closed throttle
//! always means zero drive torque.

use std::fmt;

use super::curve::{EvaluationError, PowerCurve};

/// Caller passed an input outside its contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Throttle must be in [0, 1]
    ThrottleOutOfRange(f32),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThrottleOutOfRange(value) => {
                write!(f, "throttle {value} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// An engine tick failed; no state was mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateError {
    Validation(ValidationError),
    Evaluation(EvaluationError),
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => err.fmt(f),
            Self::Evaluation(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for UpdateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Evaluation(err) => Some(err),
        }
    }
}

impl From<ValidationError> for UpdateError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<EvaluationError> for UpdateError {
    fn from(err: EvaluationError) -> Self {
        Self::Evaluation(err)
    }
}

/// Per-vehicle engine state, updated once per simulation tick.
#[derive(Debug, Clone)]
pub struct EngineModel {
    curve: PowerCurve,
    idle_revs: f32,
    /// How much of the raw revs delta is realized per tick, in [0, 1].
    /// 1.0 snaps to the target immediately, 0.0 freezes revs.
    engine_resistance: f32,

    /// Current rotational speed, in [0, max_revs]
    revs: f32,
    /// Current drive torque, derived from revs and throttle
    torque: f32,
    /// Last commanded throttle, in [0, 1]
    throttle: f32,
}

impl EngineModel {
    /// Build an engine at idle with no throttle and no torque.
    pub fn new(curve: PowerCurve, idle_revs: f32, engine_resistance: f32) -> Self {
        Self {
            curve,
            idle_revs,
            engine_resistance,
            revs: idle_revs,
            torque: 0.0,
            throttle: 0.0,
        }
    }

    #[inline]
    pub fn revs(&self) -> f32 {
        self.revs
    }

    #[inline]
    pub fn torque(&self) -> f32 {
        self.torque
    }

    #[inline]
    pub fn throttle(&self) -> f32 {
        self.throttle
    }

    #[inline]
    pub fn idle_revs(&self) -> f32 {
        self.idle_revs
    }

    #[inline]
    pub fn max_revs(&self) -> f32 {
        self.curve.max_revs()
    }

    /// The power curve this engine reads torque from.
    pub fn curve(&self) -> &PowerCurve {
        &self.curve
    }

    /// Advance the engine by one fixed tick.
    ///
    /// `throttle` is the driver input in [0, 1]; anything outside fails
    /// fast rather than being clamped, so caller bugs surface early.
    ///
    /// `resistance` is the environmental load (braking, aero drag, grip)
    /// already combined into one scalar by the caller. It is accepted but
    /// not yet folded into the revs delta; it becomes meaningful once a
    /// drivetrain model exists. It is deliberately not validated here —
    /// the combination policy belongs to the caller.
    ///
    /// On error, revs and torque are left exactly as they were.
    pub fn update(&mut self, throttle: f32, resistance: f32) -> Result<(), UpdateError> {
        if !(0.0..=1.0).contains(&throttle) {
            return Err(ValidationError::ThrottleOutOfRange(throttle).into());
        }
        let _ = resistance;

        let max_revs = self.curve.max_revs();
        // Raw delta from current revs to the throttle-implied target,
        // scaled down by how much the engine resists change.
        let base = self.idle_revs + (max_revs - self.idle_revs) * throttle - self.revs;
        let delta = base - base * (1.0 - self.engine_resistance);
        let revs = (self.revs + delta).clamp(0.0, max_revs);

        // Evaluate before committing anything; a curve failure must not
        // leave a half-applied tick behind.
        let torque = self.curve.evaluate(revs)? * throttle;

        self.revs = revs;
        self.torque = torque;
        self.throttle = throttle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::curve::SegmentFn;

    fn test_curve() -> PowerCurve {
        PowerCurve::new(
            vec![
                SegmentFn::Linear {
                    slope: 2.0,
                    offset: 0.0,
                },
                SegmentFn::Linear {
                    slope: 1.0,
                    offset: 5.0,
                },
            ],
            vec![5.0, 10.0],
        )
        .unwrap()
    }

    #[test]
    fn test_starts_at_idle() {
        let engine = EngineModel::new(test_curve(), 2.0, 1.0);
        assert_eq!(engine.revs(), 2.0);
        assert_eq!(engine.torque(), 0.0);
        assert_eq!(engine.throttle(), 0.0);
    }

    #[test]
    fn test_full_resistance_snaps_to_target() {
        // resistance 1.0 realizes the whole delta in one tick
        let mut engine = EngineModel::new(test_curve(), 2.0, 1.0);
        engine.update(1.0, 0.0).unwrap();
        assert_eq!(engine.revs(), 10.0);
        assert_eq!(engine.torque(), 15.0);
    }

    #[test]
    fn test_zero_resistance_freezes_revs() {
        let mut engine = EngineModel::new(test_curve(), 2.0, 0.0);
        engine.update(1.0, 0.0).unwrap();
        assert_eq!(engine.revs(), 2.0);
    }

    #[test]
    fn test_full_throttle_converges_monotonically() {
        let mut engine = EngineModel::new(test_curve(), 2.0, 0.25);
        let mut prev = engine.revs();
        for _ in 0..200 {
            engine.update(1.0, 0.0).unwrap();
            assert!(engine.revs() >= prev);
            assert!(engine.revs() <= engine.max_revs());
            prev = engine.revs();
        }
        assert!((engine.revs() - engine.max_revs()).abs() < 0.01);
    }

    #[test]
    fn test_closed_throttle_converges_to_idle() {
        let mut engine = EngineModel::new(test_curve(), 2.0, 0.25);
        for _ in 0..100 {
            engine.update(1.0, 0.0).unwrap();
        }
        let mut prev = engine.revs();
        for _ in 0..300 {
            engine.update(0.0, 0.0).unwrap();
            assert!(engine.revs() <= prev);
            assert!(engine.revs() >= 0.0);
            prev = engine.revs();
        }
        assert!((engine.revs() - engine.idle_revs()).abs() < 0.01);
    }

    #[test]
    fn test_idle_is_fixed_point_at_closed_throttle() {
        let mut engine = EngineModel::new(test_curve(), 2.0, 0.5);
        engine.update(0.0, 0.0).unwrap();
        assert_eq!(engine.revs(), 2.0);
    }

    #[test]
    fn test_torque_zero_whenever_throttle_closed() {
        let mut engine = EngineModel::new(test_curve(), 2.0, 0.5);
        for _ in 0..10 {
            engine.update(1.0, 0.0).unwrap();
        }
        engine.update(0.0, 0.0).unwrap();
        assert_eq!(engine.torque(), 0.0);
    }

    #[test]
    fn test_out_of_range_throttle_fails_fast() {
        let mut engine = EngineModel::new(test_curve(), 2.0, 0.5);
        let err = engine.update(1.5, 0.0).unwrap_err();
        assert_eq!(
            err,
            UpdateError::Validation(ValidationError::ThrottleOutOfRange(1.5))
        );
        assert!(engine.update(-0.1, 0.0).is_err());
        // Nothing moved
        assert_eq!(engine.revs(), 2.0);
        assert_eq!(engine.torque(), 0.0);
    }

    #[test]
    fn test_failed_evaluation_aborts_tick_atomically() {
        // Middle segment is only reachable at non-integer revs, so it
        // survives construction but fails when revs land inside it.
        let curve = PowerCurve::new(
            vec![
                SegmentFn::Linear {
                    slope: 1.0,
                    offset: 0.0,
                },
                SegmentFn::Constant { value: f32::NAN },
                SegmentFn::Linear {
                    slope: 1.0,
                    offset: 0.0,
                },
            ],
            vec![9.2, 9.8, 20.0],
        )
        .unwrap();
        // Idle inside the poisoned segment: closed throttle keeps revs there
        let mut engine = EngineModel::new(curve, 9.5, 1.0);

        let err = engine.update(0.0, 0.0).unwrap_err();
        assert!(matches!(err, UpdateError::Evaluation(_)));
        assert_eq!(engine.revs(), 9.5);
        assert_eq!(engine.torque(), 0.0);
        assert_eq!(engine.throttle(), 0.0);

        // Full throttle jumps revs past the poisoned segment and recovers
        engine.update(1.0, 0.0).unwrap();
        assert_eq!(engine.revs(), 20.0);
    }
}
