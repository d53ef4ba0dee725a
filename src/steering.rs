/*
 * Steering Module
 *
 * Computes the acceleration a boid should receive from its neighbors.
 * Each of the three classic rules produces a Reynolds steering force
 * (desired velocity minus current velocity) that is clamped to max_force
 * on its own, then weighted and summed:
 * 1. Separation: steer away from neighbors that are too close
 * 2. Alignment: match the average heading of neighbors
 * 3. Cohesion: steer towards the average position of neighbors
 *
 * A rule with no qualifying neighbors contributes nothing, and any vector
 * too short to normalize is treated as no contribution.
 */

use nannou::prelude::*;

use crate::boid::Kinematics;
use crate::flock::Neighbor;
use crate::params::{RuleWeights, SimulationParams};

// Squared length below which a vector has no usable direction
const MIN_LENGTH_SQUARED: f32 = 1e-12;

/// Rescale `v` to `max` if it is longer, otherwise return it unchanged.
pub fn limit(v: Vec2, max: f32) -> Vec2 {
    let length_squared = v.length_squared();
    if length_squared > max * max {
        v * (max / length_squared.sqrt())
    } else {
        v
    }
}

/// Per-rule steering forces before weighting. `None` means the rule had
/// nothing to steer by.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RuleForces {
    pub separation: Option<Vec2>,
    pub alignment: Option<Vec2>,
    pub cohesion: Option<Vec2>,
}

impl RuleForces {
    pub fn weighted_sum(&self, weights: &RuleWeights) -> Vec2 {
        let mut total = Vec2::ZERO;
        if let Some(force) = self.separation {
            total += force * weights.separation;
        }
        if let Some(force) = self.alignment {
            total += force * weights.alignment;
        }
        if let Some(force) = self.cohesion {
            total += force * weights.cohesion;
        }
        total
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringEngine {
    pub perception_radius: f32,
    pub separation_radius: f32,
    pub max_speed: f32,
    pub max_force: f32,
}

impl SteeringEngine {
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            perception_radius: params.perception_radius,
            separation_radius: params.separation_radius(),
            max_speed: params.max_speed,
            max_force: params.max_force,
        }
    }

    /// Weighted steering acceleration for `agent`.
    pub fn steer(&self, agent: &Kinematics, neighbors: &[Neighbor], weights: &RuleWeights) -> Vec2 {
        self.rule_forces(agent, neighbors).weighted_sum(weights)
    }

    /// Accumulates all three rules in a single pass over the neighbor set.
    pub fn rule_forces(&self, agent: &Kinematics, neighbors: &[Neighbor]) -> RuleForces {
        let mut separation = Vec2::ZERO;
        let mut alignment = Vec2::ZERO;
        let mut cohesion = Vec2::ZERO;
        let mut separation_count = 0;
        let mut flock_count = 0;

        for neighbor in neighbors {
            if neighbor.distance >= self.perception_radius {
                continue;
            }

            if neighbor.distance < self.separation_radius {
                let away = agent.position - neighbor.state.position;
                // Coincident boids have no direction to push apart along
                if away.length_squared() > MIN_LENGTH_SQUARED && neighbor.distance > 0.0 {
                    separation += away / neighbor.distance;
                    separation_count += 1;
                }
            }

            alignment += neighbor.state.velocity;
            cohesion += neighbor.state.position;
            flock_count += 1;
        }

        let mut forces = RuleForces::default();

        if separation_count > 0 {
            let average = separation / separation_count as f32;
            forces.separation = self.seek_direction(agent, average);
        }

        if flock_count > 0 {
            let average_velocity = alignment / flock_count as f32;
            forces.alignment = self.seek_direction(agent, average_velocity);

            let centroid = cohesion / flock_count as f32;
            forces.cohesion = self.seek_direction(agent, centroid - agent.position);
        }

        forces
    }

    // Reynolds: steering = desired - velocity, with desired at full speed
    fn seek_direction(&self, agent: &Kinematics, direction: Vec2) -> Option<Vec2> {
        let length_squared = direction.length_squared();
        if length_squared <= MIN_LENGTH_SQUARED {
            return None;
        }
        let desired = direction * (self.max_speed / length_squared.sqrt());
        Some(limit(desired - agent.velocity, self.max_force))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SteeringEngine {
        SteeringEngine::from_params(&SimulationParams::default())
    }

    fn neighbor(agent: &Kinematics, position: Point2, velocity: Vec2) -> Neighbor {
        Neighbor {
            index: 0,
            state: Kinematics { position, velocity },
            distance: agent.position.distance(position),
        }
    }

    #[test]
    fn limit_rescales_only_long_vectors() {
        assert_eq!(limit(vec2(0.3, 0.4), 1.0), vec2(0.3, 0.4));

        let clamped = limit(vec2(30.0, 40.0), 0.5);
        assert!((clamped.length() - 0.5).abs() < 1e-6);
        assert!((clamped.x / clamped.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn no_neighbors_means_no_forces() {
        let agent = Kinematics {
            position: pt2(100.0, 100.0),
            velocity: vec2(6.5, 0.0),
        };
        let forces = engine().rule_forces(&agent, &[]);
        assert_eq!(forces, RuleForces::default());
        assert_eq!(engine().steer(&agent, &[], &RuleWeights::default()), Vec2::ZERO);
    }

    #[test]
    fn separation_only_inside_threshold() {
        let engine = engine();
        let agent = Kinematics {
            position: pt2(200.0, 200.0),
            velocity: Vec2::ZERO,
        };
        // 40 units away: inside perception (80) but outside separation (24)
        let far = neighbor(&agent, pt2(240.0, 200.0), Vec2::ZERO);
        let forces = engine.rule_forces(&agent, &[far]);
        assert!(forces.separation.is_none());
        assert!(forces.cohesion.is_some());

        let close = neighbor(&agent, pt2(210.0, 200.0), Vec2::ZERO);
        let forces = engine.rule_forces(&agent, &[close]);
        let separation = forces.separation.unwrap();
        assert!(separation.x < 0.0);
        assert!(separation.y.abs() < 1e-6);
    }

    #[test]
    fn coincident_neighbor_does_not_separate() {
        let agent = Kinematics {
            position: pt2(50.0, 50.0),
            velocity: vec2(1.0, 0.0),
        };
        let twin = neighbor(&agent, pt2(50.0, 50.0), vec2(1.0, 0.0));
        let forces = engine().rule_forces(&agent, &[twin]);

        assert!(forces.separation.is_none());
        // Centroid equals own position, so cohesion has no direction either
        assert!(forces.cohesion.is_none());
        let total = engine().steer(&agent, &[twin], &RuleWeights::default());
        assert!(total.is_finite());
    }

    #[test]
    fn coincident_neighbor_is_left_out_of_separation_average() {
        let agent = Kinematics {
            position: pt2(50.0, 50.0),
            velocity: vec2(0.0, 1.0),
        };
        let twin = neighbor(&agent, pt2(50.0, 50.0), vec2(1.0, 0.0));
        let close = neighbor(&agent, pt2(60.0, 50.0), Vec2::ZERO);
        // Loose force limit so the steering reflects the unclamped desire
        let engine = SteeringEngine {
            max_force: 100.0,
            ..engine()
        };

        let with_twin = engine.rule_forces(&agent, &[twin, close]);
        let alone = engine.rule_forces(&agent, &[close]);

        // Only the close neighbor counts: (-1, 0) averaged over one boid
        assert_eq!(with_twin.separation, alone.separation);
        let expected = vec2(-engine.max_speed, 0.0) - agent.velocity;
        assert!(with_twin.separation.unwrap().distance(expected) < 1e-5);
        // The twin still counts toward alignment
        assert!(alone.alignment.is_none());
        assert!(with_twin.alignment.is_some());
    }

    #[test]
    fn each_rule_is_clamped_to_max_force() {
        let engine = engine();
        let agent = Kinematics {
            position: pt2(300.0, 300.0),
            velocity: vec2(-6.5, 0.0),
        };
        let neighbors = [
            neighbor(&agent, pt2(310.0, 300.0), vec2(6.5, 0.0)),
            neighbor(&agent, pt2(330.0, 320.0), vec2(0.0, 6.5)),
            neighbor(&agent, pt2(270.0, 340.0), vec2(6.0, 2.0)),
        ];
        let forces = engine.rule_forces(&agent, &neighbors);

        for force in [forces.separation, forces.alignment, forces.cohesion] {
            let force = force.unwrap();
            assert!(force.length() <= engine.max_force + 1e-5);
        }
    }

    #[test]
    fn zero_weight_disables_rule() {
        let engine = engine();
        let agent = Kinematics {
            position: pt2(300.0, 300.0),
            velocity: vec2(0.0, 6.5),
        };
        let neighbors = [
            neighbor(&agent, pt2(315.0, 300.0), vec2(6.5, 0.0)),
            neighbor(&agent, pt2(340.0, 310.0), vec2(6.5, 0.0)),
        ];
        let forces = engine.rule_forces(&agent, &neighbors);
        let only_cohesion = RuleWeights {
            separation: 0.0,
            alignment: 0.0,
            cohesion: 1.0,
        };

        assert_eq!(
            engine.steer(&agent, &neighbors, &only_cohesion),
            forces.cohesion.unwrap()
        );
    }

    #[test]
    fn neighbors_outside_perception_are_ignored() {
        let engine = engine();
        let agent = Kinematics {
            position: pt2(0.0, 0.0),
            velocity: vec2(1.0, 0.0),
        };
        let distant = neighbor(&agent, pt2(80.0, 0.0), vec2(0.0, 1.0));
        assert_eq!(engine.rule_forces(&agent, &[distant]), RuleForces::default());
    }
}
