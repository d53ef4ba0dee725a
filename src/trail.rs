/*
 * Trail Module
 *
 * A fixed-capacity history of recent boid positions, kept oldest-first.
 * When the trail is full the oldest point is evicted before the new one
 * is stored, so the buffer never grows past its capacity.
 */

use std::collections::VecDeque;

use nannou::prelude::*;

// Number of positions remembered per boid
pub const TRAIL_CAPACITY: usize = 100;

#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<Point2>,
    capacity: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a copy of `point`, evicting the oldest entry when full.
    pub fn push(&mut self, point: Point2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Oldest-first iterator over the recorded positions. The iterator is
    /// cheap to clone, so a renderer can walk the trail more than once.
    pub fn iter(&self) -> impl Iterator<Item = Point2> + Clone + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn last(&self) -> Option<Point2> {
        self.points.back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..5 {
            trail.push(pt2(i as f32, 0.0));
        }

        let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn default_capacity_is_bounded() {
        let mut trail = Trail::default();
        for i in 0..(TRAIL_CAPACITY * 2 + 7) {
            trail.push(pt2(i as f32, i as f32));
        }

        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert_eq!(trail.last(), Some(pt2(206.0, 206.0)));
    }

    #[test]
    fn iterator_can_be_restarted() {
        let mut trail = Trail::default();
        trail.push(pt2(1.0, 2.0));
        trail.push(pt2(3.0, 4.0));

        let walk = trail.iter();
        let first: Vec<_> = walk.clone().collect();
        let second: Vec<_> = walk.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn stored_points_are_copies() {
        let mut trail = Trail::default();
        let mut position = pt2(1.0, 1.0);
        trail.push(position);
        position.x = 50.0;

        assert_eq!(trail.last(), Some(pt2(1.0, 1.0)));
        assert_ne!(trail.last(), Some(position));
    }

    #[test]
    fn clear_empties_trail() {
        let mut trail = Trail::default();
        trail.push(pt2(0.0, 0.0));
        trail.clear();
        assert!(trail.is_empty());
    }
}
