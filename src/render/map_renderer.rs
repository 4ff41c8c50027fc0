// src/render/map_renderer.rs
// Draws the network lines, their stations and the animated trains

use nannou::prelude::*;

use super::{RenderParams, Transform2D};
use crate::config::StyleConfig;
use crate::models::{Direction, Entity, TransitNetwork, ViewBox};

const FORWARD_COLOR: (f32, f32, f32) = (0.95, 0.95, 0.95);
const BACKWARD_COLOR: (f32, f32, f32) = (1.0, 0.62, 0.18);
const LABEL_COLOR: (f32, f32, f32) = (0.75, 0.78, 0.82);

pub struct MapRenderer {
    view_box: ViewBox,
    transform: Transform2D,
    line_weight: f32,
    station_radius: f32,
    train_radius: f32,
}

impl MapRenderer {
    pub fn new(view_box: ViewBox, style: &StyleConfig) -> Self {
        Self {
            view_box,
            transform: Transform2D::default(),
            line_weight: style.line_weight,
            station_radius: style.station_radius,
            train_radius: style.train_radius,
        }
    }

    /// Refits the map into the given screen area, e.g. after a window resize.
    pub fn fit_to(&mut self, area: Rect) {
        self.transform = Transform2D::fit(&self.view_box, area);
    }

    pub fn draw_network(&self, draw: &Draw, network: &TransitNetwork) {
        for line in &network.lines {
            let params = RenderParams {
                color: rgb(line.color[0], line.color[1], line.color[2]),
                stroke_weight: self.line_weight,
            };

            let points: Vec<Point2> = line
                .path
                .waypoints()
                .iter()
                .map(|p| self.transform.apply(*p, &self.view_box))
                .collect();

            for segment in points.windows(2) {
                draw.line()
                    .start(segment[0])
                    .end(segment[1])
                    .color(params.color)
                    .stroke_weight(params.stroke_weight)
                    .caps_round();
            }

            for (point, name) in points.iter().zip(&line.station_names) {
                draw.ellipse()
                    .xy(*point)
                    .radius(self.station_radius)
                    .color(BLACK)
                    .stroke(params.color)
                    .stroke_weight(params.stroke_weight * 0.5);

                if let Some(name) = name {
                    draw.text(name)
                        .xy(*point + vec2(0.0, self.station_radius + 9.0))
                        .font_size(11)
                        .w(160.0)
                        .color(rgb(LABEL_COLOR.0, LABEL_COLOR.1, LABEL_COLOR.2));
                }
            }
        }
    }

    /// Trains without a resolved coordinate (dangling line reference) are not drawn.
    pub fn draw_trains(&self, draw: &Draw, entities: &[Entity], show_labels: bool) {
        for entity in entities {
            let Some(coordinate) = entity.coordinate else {
                continue;
            };
            let point = self.transform.apply(coordinate, &self.view_box);
            let (r, g, b) = match entity.direction {
                Direction::Forward => FORWARD_COLOR,
                Direction::Backward => BACKWARD_COLOR,
            };

            draw.ellipse()
                .xy(point)
                .radius(self.train_radius)
                .color(rgb(r, g, b))
                .stroke(BLACK)
                .stroke_weight(1.5);

            if show_labels {
                draw.text(&entity.id)
                    .xy(point + vec2(0.0, -(self.train_radius + 9.0)))
                    .font_size(10)
                    .w(180.0)
                    .color(rgb(r, g, b));
            }
        }
    }
}
