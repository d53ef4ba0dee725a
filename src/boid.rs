/*
 * Boid Module
 *
 * This module defines the Boid struct: one flocking agent with a position,
 * a velocity, the acceleration accumulated during the current tick and a
 * bounded trail of where it has been.
 *
 * Positions live in screen space (origin top-left, y down).
 */

use std::f32::consts::TAU;

use nannou::prelude::*;
use rand::Rng;

use crate::params::Arena;
use crate::trail::Trail;

/// The part of a boid that neighbors can observe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub position: Point2,
    pub velocity: Vec2,
}

#[derive(Clone, Debug)]
pub struct Boid {
    pub position: Point2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub trail: Trail,
}

impl Boid {
    pub fn new(position: Point2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            trail: Trail::default(),
        }
    }

    /// A boid placed uniformly inside the arena, heading in a random
    /// direction at `speed`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, arena: &Arena, speed: f32) -> Self {
        let x = rng.gen_range(0.0..=arena.width);
        let y = rng.gen_range(0.0..=arena.height);
        let angle = rng.gen_range(0.0..TAU);
        let velocity = vec2(angle.cos(), angle.sin()) * speed;

        Self::new(pt2(x, y), velocity)
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            velocity: self.velocity,
        }
    }

    // Apply a force to the boid
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    pub fn record_trail(&mut self) {
        self.trail.push(self.position);
    }

    /// Heading angle in radians for drawing. Screen space is y-down, so the
    /// y component is flipped to get a conventional counter-clockwise angle.
    pub fn heading(&self) -> f32 {
        (-self.velocity.y).atan2(self.velocity.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use std::f32::consts::FRAC_PI_2;
    use rand::SeedableRng;

    #[test]
    fn random_boid_starts_inside_arena_at_speed() {
        let mut rng = SmallRng::seed_from_u64(7);
        let arena = Arena::default();

        for _ in 0..200 {
            let boid = Boid::random(&mut rng, &arena, 6.5);
            assert!((0.0..=arena.width).contains(&boid.position.x));
            assert!((0.0..=arena.height).contains(&boid.position.y));
            assert!((boid.velocity.length() - 6.5).abs() < 1e-4);
            assert_eq!(boid.acceleration, Vec2::ZERO);
            assert!(boid.trail.is_empty());
        }
    }

    #[test]
    fn forces_accumulate() {
        let mut boid = Boid::new(pt2(0.0, 0.0), Vec2::ZERO);
        boid.apply_force(vec2(1.0, 0.0));
        boid.apply_force(vec2(0.0, -2.0));
        assert_eq!(boid.acceleration, vec2(1.0, -2.0));
    }

    #[test]
    fn heading_flips_screen_y() {
        let up_screen = Boid::new(pt2(0.0, 0.0), vec2(0.0, -1.0));
        assert!((up_screen.heading() - FRAC_PI_2).abs() < 1e-6);

        let right = Boid::new(pt2(0.0, 0.0), vec2(3.0, 0.0));
        assert_eq!(right.heading(), 0.0);
    }
}
