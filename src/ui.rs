/*
 * UI Module
 *
 * This module builds the control panel with nannou_egui. The panel edits
 * SimulationParams in place; the only things it reports back are the
 * actions the app must carry out itself (resetting the flock).
 */

use nannou::prelude::*;
use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{SimulationParams, TickOrder};

/// Actions requested through the panel during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiResponse {
    pub reset_requested: bool,
    pub flock_size_changed: bool,
}

impl UiResponse {
    pub fn needs_reset(&self) -> bool {
        self.reset_requested || self.flock_size_changed
    }
}

// Update the UI and report which actions were requested
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    boids: usize,
    ticks: u64,
) -> UiResponse {
    let mut response = UiResponse::default();
    let previous_num_boids = params.num_boids;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flocking Behavior", |ui| {
                let range = SimulationParams::weight_range;
                let weights = &mut params.weights;
                ui.add(egui::Slider::new(&mut weights.separation, range()).text("Separation"));
                ui.add(egui::Slider::new(&mut weights.alignment, range()).text("Alignment"));
                ui.add(egui::Slider::new(&mut weights.cohesion, range()).text("Cohesion"));
                ui.add(
                    egui::Slider::new(
                        &mut params.perception_radius,
                        SimulationParams::perception_radius_range(),
                    )
                    .text("Perception Radius"),
                );
            });

            ui.collapsing("Boid Parameters", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_boids, SimulationParams::num_boids_range())
                        .text("Number of Boids"),
                );
                ui.add(
                    egui::Slider::new(&mut params.max_speed, SimulationParams::max_speed_range())
                        .text("Max Speed"),
                );

                let mut sequential = params.tick_order == TickOrder::Sequential;
                if ui.checkbox(&mut sequential, "In-place Updates").changed() {
                    params.tick_order = if sequential {
                        TickOrder::Sequential
                    } else {
                        TickOrder::Snapshot
                    };
                }
            });

            ui.horizontal(|ui| {
                ui.checkbox(&mut params.trace_enabled, "Trace Paths");
                if ui.button("Reset").clicked() {
                    response.reset_requested = true;
                }
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Boids: {}", boids));
            ui.label(format!("Tick: {}", ticks));
            ui.label(format!("Physics steps: {}", debug_info.physics_updates_per_frame));
        });

    response.flock_size_changed = params.num_boids != previous_num_boids;
    response
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &Draw,
    debug_info: &DebugInfo,
    window_rect: Rect,
    boids: usize,
    ticks: u64,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let lines = debug_info.lines(boids, ticks);

    let panel_width = 240.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    draw.rect()
        .x_y(window_rect.right() - panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;
    for (i, text) in lines.iter().enumerate() {
        draw.text(text)
            .x_y(text_x + 70.0, text_y - i as f32 * line_height)
            .color(WHITE)
            .font_size(14);
    }
}
