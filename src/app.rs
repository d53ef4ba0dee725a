/*
 * Application Module
 *
 * This module defines the nannou application model for the boid simulation.
 * It owns the flock and its parameters, runs the UI each frame, and advances
 * the flock on a fixed timestep so the simulation speed does not depend on
 * the rendering frame rate.
 */

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::params::SimulationParams;
use crate::renderer;
use crate::ui;

// Physics steps allowed per frame before the backlog is dropped
const MAX_STEPS_PER_FRAME: usize = 5;

// Parameters handed over from main before the event loop starts
static LAUNCH_PARAMS: OnceLock<SimulationParams> = OnceLock::new();

/// Start the nannou event loop with `params`. Does not return.
pub fn run(params: SimulationParams) {
    if LAUNCH_PARAMS.set(params).is_err() {
        warn!("Simulation already launched, ignoring new parameters");
    }
    nannou::app(model).update(update).run();
}

/// Accumulates frame time and hands it out in whole physics steps.
#[derive(Clone, Copy, Debug)]
pub struct FixedTimestep {
    pub step: Duration,
    pub max_steps: usize,
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn new(fps: f32, max_steps: usize) -> Self {
        // A zero step would never drain the accumulator
        let step = Duration::try_from_secs_f32(1.0 / fps)
            .unwrap_or(Duration::ZERO)
            .max(Duration::from_nanos(1));

        Self {
            step,
            max_steps,
            accumulator: Duration::ZERO,
        }
    }

    /// Add `elapsed` and return (steps to run, steps dropped). Time beyond
    /// `max_steps` is discarded so a slow frame cannot snowball.
    pub fn advance(&mut self, elapsed: Duration) -> (usize, usize) {
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        let mut dropped = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            dropped += 1;
        }

        (steps, dropped)
    }
}

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub rng: SmallRng,
    pub timestep: FixedTimestep,
    pub last_update_time: Instant,
    last_stats_tick: u64,
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = LAUNCH_PARAMS.get().cloned().unwrap_or_default();

    let window_id = app
        .new_window()
        .title("Boid Flocking Simulation")
        .size(params.arena.width as u32, params.arena.height as u32)
        .view(renderer::view)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to create simulation window");

    let window = app.window(window_id).expect("simulation window closed during setup");
    let egui = Egui::from_window(&window);

    let mut rng = seeded_rng(params.seed);
    let flock = Flock::new(&params, &mut rng);
    info!(
        boids = flock.len(),
        seed = ?params.seed,
        tick_order = ?params.tick_order,
        "Flock created",
    );

    Model {
        flock,
        timestep: FixedTimestep::new(params.target_fps, MAX_STEPS_PER_FRAME),
        params,
        egui,
        debug_info: DebugInfo::default(),
        rng,
        last_update_time: Instant::now(),
        last_stats_tick: 0,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let response = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &model.debug_info,
        model.flock.len(),
        model.flock.tick_count(),
    );

    if response.needs_reset() {
        model.flock.reset(&model.params, &mut model.rng);
        model.last_stats_tick = 0;
    }

    let now = Instant::now();
    let elapsed = now.duration_since(model.last_update_time);
    model.last_update_time = now;

    if model.params.pause_simulation {
        model.debug_info.physics_updates_per_frame = 0;
        return;
    }

    let (steps, dropped) = model.timestep.advance(elapsed);
    for _ in 0..steps {
        model.flock.step(&model.params);
    }
    model.debug_info.physics_updates_per_frame = steps;

    if dropped > 0 {
        model.debug_info.dropped_ticks += dropped as u64;
        warn!(dropped, "Simulation fell behind, dropping physics steps");
    }

    let ticks = model.flock.tick_count();
    if ticks >= model.last_stats_tick + model.params.target_fps as u64 {
        model.last_stats_tick = ticks;
        debug!(
            tick = ticks,
            fps = model.debug_info.fps,
            frame_ms = model.debug_info.frame_time_ms(),
            "Simulation stats",
        );
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestep_hands_out_whole_steps() {
        let mut timestep = FixedTimestep::new(50.0, 5);

        assert_eq!(timestep.advance(Duration::from_millis(10)), (0, 0));
        assert_eq!(timestep.advance(Duration::from_millis(15)), (1, 0));
        assert_eq!(timestep.advance(Duration::from_millis(40)), (2, 0));
    }

    #[test]
    fn timestep_drops_backlog_past_limit() {
        let mut timestep = FixedTimestep::new(50.0, 3);

        let (steps, dropped) = timestep.advance(Duration::from_millis(205));
        assert_eq!(steps, 3);
        assert_eq!(dropped, 7);
        assert_eq!(timestep.advance(Duration::from_millis(15)), (1, 0));
    }

    #[test]
    fn timestep_step_is_never_zero() {
        let mut timestep = FixedTimestep::new(2e9, 5);
        assert!(timestep.step > Duration::ZERO);

        let (steps, dropped) = timestep.advance(Duration::from_micros(1));
        assert_eq!(steps, 5);
        assert_eq!(dropped, 995);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let params = SimulationParams::default();
        let a = Flock::new(&params, &mut seeded_rng(Some(9)));
        let b = Flock::new(&params, &mut seeded_rng(Some(9)));

        let positions =
            |flock: &Flock| flock.boids().iter().map(|b| b.position).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
    }
}
