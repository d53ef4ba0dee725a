/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the boid simulation. The whole struct is passed
 * by reference into each tick, and the UI edits it in place between ticks.
 * Parameters can also be loaded from a JSON file and are validated on load.
 */

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be finite and non-negative, got {value}")]
    NegativeOrNonFinite { field: &'static str, value: f32 },
    #[error("perception_radius must be positive, got {0}")]
    InvalidPerceptionRadius(f32),
    #[error("separation_ratio must be in (0, 1], got {0}")]
    InvalidSeparationRatio(f32),
    #[error("arena must have positive size, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("{0} weight must be finite")]
    NonFiniteWeight(&'static str),
    #[error("target_fps must be in (0, {max}], got {0}", max = MAX_TARGET_FPS)]
    InvalidTargetFps(f32),
}

// Highest tick rate the fixed-timestep loop accepts
pub const MAX_TARGET_FPS: f32 = 1000.0;

/// Weights applied to each flocking rule after its force is clamped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            separation: 1.8,
            alignment: 1.2,
            cohesion: 1.0,
        }
    }
}

/// Screen-space arena (origin top-left, y down) and its soft edge settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub turn_factor: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            margin: 50.0,
            turn_factor: 0.2,
        }
    }
}

/// How agent state is read while a tick is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickOrder {
    /// Every boid steers from the state captured at the start of the tick.
    #[default]
    Snapshot,
    /// Boids are updated in place, so later boids see earlier boids' new state.
    Sequential,
}

// Parameters for the simulation that can be adjusted via UI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub max_speed: f32,
    pub max_force: f32,
    pub perception_radius: f32,
    /// Fraction of the perception radius inside which separation applies.
    pub separation_ratio: f32,
    pub weights: RuleWeights,
    pub arena: Arena,
    pub tick_order: TickOrder,
    pub seed: Option<u64>,
    pub target_fps: f32,
    pub trace_enabled: bool,
    pub pause_simulation: bool,
    pub show_debug: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 150,
            max_speed: 6.5,
            max_force: 0.5,
            perception_radius: 80.0,
            separation_ratio: 0.3,
            weights: RuleWeights::default(),
            arena: Arena::default(),
            tick_order: TickOrder::default(),
            seed: None,
            target_fps: 60.0,
            trace_enabled: false,
            pause_simulation: false,
            show_debug: false,
        }
    }
}

impl SimulationParams {
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Distance below which a neighbor contributes to separation.
    pub fn separation_radius(&self) -> f32 {
        self.perception_radius * self.separation_ratio
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        check_non_negative("max_speed", self.max_speed)?;
        check_non_negative("max_force", self.max_force)?;
        check_non_negative("arena.margin", self.arena.margin)?;
        check_non_negative("arena.turn_factor", self.arena.turn_factor)?;

        if !(self.perception_radius.is_finite() && self.perception_radius > 0.0) {
            return Err(ParamsError::InvalidPerceptionRadius(self.perception_radius));
        }
        if !(self.separation_ratio > 0.0 && self.separation_ratio <= 1.0) {
            return Err(ParamsError::InvalidSeparationRatio(self.separation_ratio));
        }
        let Arena { width, height, .. } = self.arena;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ParamsError::InvalidArena { width, height });
        }
        for (name, weight) in [
            ("separation", self.weights.separation),
            ("alignment", self.weights.alignment),
            ("cohesion", self.weights.cohesion),
        ] {
            if !weight.is_finite() {
                return Err(ParamsError::NonFiniteWeight(name));
            }
        }
        if !(self.target_fps > 0.0 && self.target_fps <= MAX_TARGET_FPS) {
            return Err(ParamsError::InvalidTargetFps(self.target_fps));
        }
        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=1000
    }

    pub fn max_speed_range() -> std::ops::RangeInclusive<f32> {
        1.0..=20.0
    }

    pub fn weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn perception_radius_range() -> std::ops::RangeInclusive<f32> {
        10.0..=200.0
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ParamsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NegativeOrNonFinite { field, value })
    }
}
