//! Piecewise power curve: revs in, torque out
//!
//! A curve is an ordered list of function segments plus an ordered list of
//! segment limits. `limits[i]` is the inclusive upper domain bound of
//! `segments[i]`; the first segment starts at 0. Adjacent segments are
//! expected to agree at their shared boundary, but that is the config
//! author's job, not checked here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One segment of a power curve.
///
/// A closed set of function shapes with explicit coefficients; enough to
/// express the usual idle rise, plateau and falloff sections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentFn {
    /// `scale * sqrt(x) + offset`
    Sqrt { scale: f32, offset: f32 },
    /// `scale * (x - shift)^2 + offset`
    Quadratic { scale: f32, shift: f32, offset: f32 },
    /// `slope * x + offset`
    Linear { slope: f32, offset: f32 },
    /// `value`
    Constant { value: f32 },
}

impl SegmentFn {
    /// Evaluate the segment at `x`.
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        match *self {
            SegmentFn::Sqrt { scale, offset } => scale * x.sqrt() + offset,
            SegmentFn::Quadratic {
                scale,
                shift,
                offset,
            } => scale * (x - shift) * (x - shift) + offset,
            SegmentFn::Linear { slope, offset } => slope * x + offset,
            SegmentFn::Constant { value } => value,
        }
    }
}

/// Curve configuration rejected at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No segments/limits at all
    Empty,
    /// Segment and limit counts differ
    LengthMismatch { segments: usize, limits: usize },
    /// `limits[index]` is not greater than `limits[index - 1]`
    NonIncreasingLimits { index: usize },
    /// A segment produced a non-finite value while sampling the peak
    Unevaluable { x: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "power curve needs at least one segment"),
            Self::LengthMismatch { segments, limits } => write!(
                f,
                "segment/limit count mismatch: {segments} segments, {limits} limits"
            ),
            Self::NonIncreasingLimits { index } => {
                write!(f, "segment limits must be strictly increasing (index {index})")
            }
            Self::Unevaluable { x } => {
                write!(f, "curve is not evaluable at x = {x}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A segment produced a non-finite value at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationError {
    /// Index of the segment that failed
    pub segment: usize,
    /// Input (already clamped to the curve domain)
    pub x: f32,
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segment {} produced a non-finite value at x = {}",
            self.segment, self.x
        )
    }
}

impl std::error::Error for EvaluationError {}

/// A validated piecewise power curve with a cached peak value.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerCurve {
    segments: Vec<SegmentFn>,
    limits: Vec<f32>,
    /// Peak torque over the whole domain, sampled at unit steps
    vmax: f32,
}

impl PowerCurve {
    /// Build a curve from matched segment/limit lists.
    ///
    /// Limits must be strictly increasing; the peak is sampled here so a
    /// curve that cannot be evaluated never escapes construction.
    pub fn new(segments: Vec<SegmentFn>, limits: Vec<f32>) -> Result<Self, ConfigError> {
        if segments.is_empty() || limits.is_empty() {
            return Err(ConfigError::Empty);
        }
        if segments.len() != limits.len() {
            return Err(ConfigError::LengthMismatch {
                segments: segments.len(),
                limits: limits.len(),
            });
        }
        for i in 1..limits.len() {
            if limits[i] <= limits[i - 1] {
                return Err(ConfigError::NonIncreasingLimits { index: i });
            }
        }

        let mut curve = Self {
            segments,
            limits,
            vmax: 0.0,
        };

        // Sample the whole domain at unit steps for the peak.
        let steps = curve.max_revs().floor() as u32;
        let mut vmax = f32::MIN;
        for i in 0..=steps {
            let x = i as f32;
            let y = curve
                .evaluate(x)
                .map_err(|_| ConfigError::Unevaluable { x })?;
            if y > vmax {
                vmax = y;
            }
        }
        curve.vmax = vmax;

        log::info!(
            "power curve: {} segments over [0, {}], peak {}",
            curve.segments.len(),
            curve.max_revs(),
            curve.vmax
        );
        Ok(curve)
    }

    /// Upper bound of the curve domain (the last segment limit).
    #[inline]
    pub fn max_revs(&self) -> f32 {
        *self.limits.last().unwrap_or(&0.0)
    }

    /// Cached peak value over the whole domain.
    #[inline]
    pub fn peak(&self) -> f32 {
        self.vmax
    }

    /// Evaluate the curve at `x`.
    ///
    /// The input is clamped to `[0, max_revs]` first; the curve has no
    /// defined behavior outside its domain, so clamping is policy, not an
    /// error. A value exactly on a segment limit belongs to that segment,
    /// not the next one.
    pub fn evaluate(&self, x: f32) -> Result<f32, EvaluationError> {
        let x = x.clamp(0.0, self.max_revs());
        // First segment whose (inclusive) upper limit covers x. The clamp
        // guarantees a match, but fall back to the last segment anyway.
        let segment = self
            .limits
            .iter()
            .position(|&limit| x <= limit)
            .unwrap_or(self.segments.len() - 1);

        let y = self.segments[segment].eval(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(EvaluationError { segment, x })
        }
    }

    /// Sample `(x, torque)` pairs across the domain at `step` intervals.
    ///
    /// Diagnostic support for external curve plotting.
    pub fn samples(&self, step: f32) -> Result<Vec<(f32, f32)>, EvaluationError> {
        debug_assert!(step > 0.0, "sample step must be positive");
        let count = if step > 0.0 {
            (self.max_revs() / step) as u32
        } else {
            0
        };
        let mut out = Vec::with_capacity(count as usize + 1);
        for i in 0..=count {
            let x = i as f32 * step;
            out.push((x, self.evaluate(x)?));
        }
        Ok(out)
    }

    /// Pixel-per-unit scale that fits the whole curve into `extent` pixels.
    ///
    /// Returns `(x_scale, y_scale)` derived from the domain width and the
    /// cached peak, for plotting collaborators.
    pub fn plot_scale(&self, extent: (f32, f32)) -> (f32, f32) {
        (extent.0 / self.max_revs(), extent.1 / self.vmax)
    }
}
