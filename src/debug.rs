/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * shown in the UI and, when enabled, in the on-screen overlay:
 * - FPS (frames per second)
 * - Frame time
 * - Physics ticks run this frame and ticks dropped to catch up
 */

use std::time::Duration;

// Debug information to display
#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub physics_updates_per_frame: usize,
    pub dropped_ticks: u64,
}

impl DebugInfo {
    pub fn frame_time_ms(&self) -> f64 {
        self.frame_time.as_secs_f64() * 1000.0
    }

    /// Lines shown in the debug overlay, top to bottom.
    pub fn lines(&self, boids: usize, ticks: u64) -> [String; 6] {
        [
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time_ms()),
            format!("Boids: {}", boids),
            format!("Tick: {}", ticks),
            format!("Physics steps this frame: {}", self.physics_updates_per_frame),
            format!("Dropped ticks: {}", self.dropped_ticks),
        ]
    }
}
