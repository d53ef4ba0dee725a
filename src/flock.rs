/*
 * Flock Module
 *
 * Owns every boid in the simulation and drives one tick at a time.
 * A tick runs, for each boid in turn:
 *   steering -> integration -> edge nudge -> trail recording
 *
 * Neighbor lookup is an exhaustive all-pairs scan, which is fine for the
 * flock sizes this simulation runs at.
 *
 * Two read orders are supported (see TickOrder). Snapshot copies every
 * boid's position and velocity before the tick so results do not depend on
 * iteration order. Sequential reads live state, so boids later in the list
 * see the already-updated velocities of earlier ones.
 */

use nannou::prelude::*;
use rand::Rng;
use tracing::{debug, info};

use crate::boid::{Boid, Kinematics};
use crate::params::{SimulationParams, TickOrder};
use crate::physics;
use crate::steering::SteeringEngine;

/// Another boid inside the perception radius, tagged with its distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub state: Kinematics,
    pub distance: f32,
}

/// All boids other than `index` strictly within `radius` of it.
pub fn neighbors_of(index: usize, states: &[Kinematics], radius: f32) -> Vec<Neighbor> {
    let Some(me) = states.get(index) else {
        return Vec::new();
    };

    states
        .iter()
        .enumerate()
        .filter(|&(other, _)| other != index)
        .filter_map(|(other, state)| {
            let distance = me.position.distance(state.position);
            (distance < radius).then_some(Neighbor {
                index: other,
                state: *state,
                distance,
            })
        })
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct Flock {
    boids: Vec<Boid>,
    ticks: u64,
}

impl Flock {
    pub fn new<R: Rng + ?Sized>(params: &SimulationParams, rng: &mut R) -> Self {
        let boids = (0..params.num_boids)
            .map(|_| Boid::random(rng, &params.arena, params.max_speed))
            .collect();
        Self { boids, ticks: 0 }
    }

    pub fn from_boids(boids: Vec<Boid>) -> Self {
        Self { boids, ticks: 0 }
    }

    /// Replace the whole flock with a fresh batch of `params.num_boids`.
    pub fn reset<R: Rng + ?Sized>(&mut self, params: &SimulationParams, rng: &mut R) {
        *self = Self::new(params, rng);
        info!(boids = self.boids.len(), "Flock reset");
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn kinematics(&self) -> Vec<Kinematics> {
        self.boids.iter().map(Boid::kinematics).collect()
    }

    /// Neighbors of boid `index` based on the flock's current state.
    pub fn neighbors(&self, index: usize, radius: f32) -> Vec<Neighbor> {
        neighbors_of(index, &self.kinematics(), radius)
    }

    // Advance every boid by one tick
    pub fn step(&mut self, params: &SimulationParams) {
        let engine = SteeringEngine::from_params(params);

        match params.tick_order {
            TickOrder::Snapshot => {
                let snapshot = self.kinematics();
                for (i, boid) in self.boids.iter_mut().enumerate() {
                    let neighbors = neighbors_of(i, &snapshot, engine.perception_radius);
                    let force = engine.steer(&snapshot[i], &neighbors, &params.weights);
                    advance(boid, force, params);
                }
            }
            TickOrder::Sequential => {
                for i in 0..self.boids.len() {
                    let neighbors = self.neighbors(i, engine.perception_radius);
                    let force =
                        engine.steer(&self.boids[i].kinematics(), &neighbors, &params.weights);
                    advance(&mut self.boids[i], force, params);
                }
            }
        }

        self.ticks += 1;
        debug!(tick = self.ticks, boids = self.boids.len(), "Flock stepped");
    }
}

fn advance(boid: &mut Boid, force: Vec2, params: &SimulationParams) {
    boid.apply_force(force);
    physics::integrate(boid, params.max_speed);
    physics::nudge_from_edges(boid, &params.arena);
    boid.record_trail();
}
