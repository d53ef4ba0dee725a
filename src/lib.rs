/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the boid simulation.
 * The simulation core (boid, trail, steering, physics, flock, params) has no
 * window dependencies beyond nannou's vector types; the app, ui and renderer
 * modules host it inside a nannou window.
 */

// Re-export key components for easier access
pub use app::Model;
pub use boid::{Boid, Kinematics};
pub use debug::DebugInfo;
pub use flock::{neighbors_of, Flock, Neighbor};
pub use params::{Arena, ParamsError, RuleWeights, SimulationParams, TickOrder};
pub use steering::{limit, RuleForces, SteeringEngine};
pub use trail::{Trail, TRAIL_CAPACITY};

// Define modules
pub mod app;
pub mod boid;
pub mod debug;
pub mod flock;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod steering;
pub mod trail;
pub mod ui;

// Constants
pub const BOID_SIZE: f32 = 12.0;
