/*
 * Renderer Module
 *
 * This module draws the flock. Boids live in screen-space arena coordinates
 * (origin top-left, y down) while nannou draws with the origin at the window
 * centre and y up, so every point goes through arena_to_screen first.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::boid::Boid;
use crate::params::Arena;
use crate::ui;
use crate::BOID_SIZE;

const BACKGROUND_COLOR: (u8, u8, u8) = (30, 30, 45);
const BOID_COLOR: (u8, u8, u8) = (200, 220, 255);
const TRACE_COLOR: (u8, u8, u8) = (0, 100, 150);

// Arrow-head outline in boid-local units, pointing along +x
const BOID_SHAPE: [(f32, f32); 4] = [(1.0, 0.0), (-0.7, 0.3), (-0.5, 0.0), (-0.7, -0.3)];

pub fn arena_to_screen(point: Point2, arena: &Arena) -> Point2 {
    pt2(point.x - arena.width / 2.0, arena.height / 2.0 - point.y)
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let (r, g, b) = BACKGROUND_COLOR;
    draw.background().color(rgb(r, g, b));

    let arena = &model.params.arena;

    if model.params.trace_enabled {
        for boid in model.flock.boids() {
            draw_trail(&draw, boid, arena);
        }
    }

    for boid in model.flock.boids() {
        draw_boid(&draw, boid, arena);
    }

    if model.params.show_debug {
        if !model.flock.is_empty() {
            draw_perception(&draw, 0, model);
        }
        ui::draw_debug_info(
            &draw,
            &model.debug_info,
            app.window_rect(),
            model.flock.len(),
            model.flock.tick_count(),
        );
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::warn!(?err, "Failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::warn!(?err, "Failed to draw UI");
    }
}

fn draw_boid(draw: &Draw, boid: &Boid, arena: &Arena) {
    let points = BOID_SHAPE
        .iter()
        .map(|&(x, y)| pt2(x * BOID_SIZE, y * BOID_SIZE));
    let (r, g, b) = BOID_COLOR;

    draw.polygon()
        .color(rgb(r, g, b))
        .points(points)
        .xy(arena_to_screen(boid.position, arena))
        .rotate(boid.heading());
}

fn draw_trail(draw: &Draw, boid: &Boid, arena: &Arena) {
    if boid.trail.len() < 2 {
        return;
    }
    let (r, g, b) = TRACE_COLOR;

    draw.polyline()
        .weight(1.0)
        .color(rgb(r, g, b))
        .points(boid.trail.iter().map(|p| arena_to_screen(p, arena)));
}

fn draw_perception(draw: &Draw, index: usize, model: &Model) {
    let boids = model.flock.boids();
    let boid = &boids[index];
    let arena = &model.params.arena;
    let centre = arena_to_screen(boid.position, arena);

    for neighbor in model.flock.neighbors(index, model.params.perception_radius) {
        let other = arena_to_screen(boids[neighbor.index].position, arena);
        let color = if neighbor.distance < model.params.separation_radius() {
            RED
        } else {
            GREEN
        };
        draw.line()
            .start(centre)
            .end(other)
            .color(color)
            .stroke_weight(1.0);
    }

    draw.ellipse()
        .xy(centre)
        .radius(model.params.perception_radius)
        .no_fill()
        .stroke(GREEN)
        .stroke_weight(1.0);

    draw.ellipse()
        .xy(centre)
        .radius(model.params.separation_radius())
        .no_fill()
        .stroke(RED)
        .stroke_weight(1.0);

    // Velocity is y-down, flip it for the arrow
    let velocity = vec2(boid.velocity.x, -boid.velocity.y);
    draw.arrow()
        .start(centre)
        .end(centre + velocity * 5.0)
        .color(YELLOW)
        .stroke_weight(2.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_corners_map_to_window_corners() {
        let arena = Arena::default();

        assert_eq!(arena_to_screen(pt2(0.0, 0.0), &arena), pt2(-640.0, 360.0));
        assert_eq!(arena_to_screen(pt2(1280.0, 720.0), &arena), pt2(640.0, -360.0));
        assert_eq!(arena_to_screen(pt2(640.0, 360.0), &arena), pt2(0.0, 0.0));
    }
}
