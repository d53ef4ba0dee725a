/*
 * Physics Module
 *
 * Advances a single boid once its steering force has been applied:
 * - integrate: acceleration into velocity (speed limited), velocity into
 *   position, then clear the acceleration for the next tick
 * - nudge_from_edges: soft turn-back near the arena edges. This adds to the
 *   velocity rather than clamping the position, so a fast boid can briefly
 *   leave the arena before it is turned around.
 */

use nannou::prelude::*;

use crate::boid::Boid;
use crate::params::Arena;
use crate::steering::limit;

pub fn integrate(boid: &mut Boid, max_speed: f32) {
    boid.velocity += boid.acceleration;
    boid.velocity = limit(boid.velocity, max_speed);
    boid.position += boid.velocity;
    boid.acceleration = Vec2::ZERO;
}

pub fn nudge_from_edges(boid: &mut Boid, arena: &Arena) {
    if boid.position.x < arena.margin {
        boid.velocity.x += arena.turn_factor;
    }
    if boid.position.x > arena.width - arena.margin {
        boid.velocity.x -= arena.turn_factor;
    }
    if boid.position.y < arena.margin {
        boid.velocity.y += arena.turn_factor;
    }
    if boid.position.y > arena.height - arena.margin {
        boid.velocity.y -= arena.turn_factor;
    }
}
