//! Revsim entry point
//!
//! Headless sandbox run: builds a sample vehicle, drives a scripted
//! throttle profile through the fixed-timestep loop for a few wall-clock
//! seconds and logs what the engine and camera are doing. Pass a path to
//! an engine config JSON to run your own curve instead of the built-in one.

use std::time::Instant;

use anyhow::Result;
use glam::Vec2;

use revsim::config::EngineConfig;
use revsim::consts::SIM_DT;
use revsim::sim::{
    ActionSnapshot, EngineModel, FixedTimestep, ObjectRegistry, PowerCurve, SegmentFn, SimState,
    WorldObject, tick,
};
use revsim::Camera;

/// Wall-clock seconds the demo runs for
const DEMO_SECS: f32 = 5.0;
/// Seconds of full throttle before lifting off
const LIFT_OFF_AT: f32 = 3.0;

fn main() -> Result<()> {
    env_logger::init();

    let engine = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?.build()?,
        None => sample_engine()?,
    };

    let mut objects = ObjectRegistry::new();
    objects.insert("map", WorldObject::backdrop(Vec2::new(200.0, 200.0)))?;
    objects.insert(
        "main",
        WorldObject::new(Vec2::ZERO, Vec2::new(2.0, 4.6), 0.0),
    )?;

    let camera = Camera::new(Vec2::new(1000.0, 500.0));
    let mut state = SimState::new(engine, objects, camera, "main")?;

    log::info!(
        "sandbox up: idle {} revs, max {} revs, curve peak {}",
        state.engine.idle_revs(),
        state.engine.max_revs(),
        state.engine.curve().peak()
    );

    run(&mut state)
}

/// Drive the scripted profile through the accumulator loop.
fn run(state: &mut SimState) -> Result<()> {
    let mut stepper = FixedTimestep::new();
    let started = Instant::now();
    let mut last_frame = started;
    let mut last_report = started;
    let mut ticks_this_second = 0u32;

    while started.elapsed().as_secs_f32() < DEMO_SECS {
        let now = Instant::now();
        let elapsed = (now - last_frame).as_secs_f32();
        last_frame = now;

        // Captured once per frame boundary, immutable from here on
        let snapshot = scripted_input(started.elapsed().as_secs_f32());
        let input = snapshot.resolve();

        for _ in 0..stepper.advance(elapsed) {
            tick(state, &input)?;
            ticks_this_second += 1;
        }

        if (now - last_report).as_secs_f32() >= 1.0 {
            let car = state.objects.get("main")?;
            let projection = state.camera.project(car);
            log::info!(
                "{} ticks/s | {:.0} revs, {:.1} torque | world ({:.1}, {:.1}) -> screen ({:.0}, {:.0}){}",
                ticks_this_second,
                state.engine.revs(),
                state.engine.torque(),
                car.pos.x,
                car.pos.y,
                projection.screen_pos.x,
                projection.screen_pos.y,
                if projection.culled { " [culled]" } else { "" }
            );
            ticks_this_second = 0;
            last_report = now;
        }
    }

    log::info!(
        "done: {} ticks in {:.1}s (target {:.0}/s)",
        state.time_ticks,
        started.elapsed().as_secs_f32(),
        1.0 / SIM_DT
    );
    Ok(())
}

/// Full throttle, then lift off and brake lightly.
fn scripted_input(at: f32) -> ActionSnapshot {
    let mut snapshot = ActionSnapshot::new();
    if at < LIFT_OFF_AT {
        snapshot.set("throttle_100", true);
    } else {
        snapshot.set("brake_50", true);
    }
    snapshot
}

/// The built-in sample: sqrt rise, plateau, quadratic falloff.
fn sample_engine() -> Result<EngineModel> {
    let plateau = 5.25 * 5300.0_f32.sqrt() - 100.0;
    let curve = PowerCurve::new(
        vec![
            SegmentFn::Sqrt {
                scale: 5.25,
                offset: -100.0,
            },
            SegmentFn::Constant { value: plateau },
            SegmentFn::Quadratic {
                scale: -0.0002,
                shift: 5800.0,
                offset: plateau,
            },
        ],
        vec![5300.0, 5800.0, 6500.0],
    )?;
    Ok(EngineModel::new(curve, 1200.0, 0.05))
}
