// src/render/panel_renderer.rs
// Draws the dashboard column: metric tiles, train cards, conflicts and action results.
// Layout is a simple top-down cursor; text that runs past the bottom is cut.

use nannou::prelude::*;

use super::badge_color;
use crate::utilities::formatters::truncate_text;
use crate::views::panels::{
    conflict_card, metric_tiles, optimization_lines, scenario_lines, train_card, PanelLine,
};
use crate::views::{BadgeLevel, DashboardState, PanelState};

const LINE_HEIGHT: f32 = 16.0;
const HEADER_HEIGHT: f32 = 24.0;
const PADDING: f32 = 12.0;
const MAX_TRAIN_CARDS: usize = 8;
const MAX_CONFLICT_CARDS: usize = 5;
const MAX_LINE_CHARS: usize = 58;

pub struct PanelRenderer {
    area: Rect,
}

struct Cursor<'a> {
    draw: &'a Draw,
    left: f32,
    width: f32,
    y: f32,
    bottom: f32,
}

impl<'a> Cursor<'a> {
    fn has_room(&self) -> bool {
        self.y - LINE_HEIGHT > self.bottom
    }

    fn header(&mut self, title: &str) {
        if !self.has_room() {
            return;
        }
        self.y -= PADDING;
        self.text(title, rgb(1.0, 1.0, 1.0), 15, HEADER_HEIGHT);
        self.draw
            .line()
            .start(pt2(self.left, self.y + 2.0))
            .end(pt2(self.left + self.width, self.y + 2.0))
            .color(rgba(1.0f32, 1.0, 1.0, 0.2))
            .stroke_weight(1.0);
    }

    fn line(&mut self, text: &str, color: Rgb<f32>) {
        if self.has_room() {
            self.text(&truncate_text(text, MAX_LINE_CHARS), color, 12, LINE_HEIGHT);
        }
    }

    fn panel_line(&mut self, line: &PanelLine) {
        self.line(&line.text, level_text_color(line.level));
    }

    fn error(&mut self, message: &str) {
        self.line(message, badge_color(BadgeLevel::Danger));
    }

    fn bar(&mut self, fraction: f32, color: Rgb<f32>) {
        if !self.has_room() {
            return;
        }
        let y = self.y - 3.0;
        self.draw
            .rect()
            .x_y(self.left + self.width / 2.0, y)
            .w_h(self.width, 4.0)
            .color(rgba(1.0f32, 1.0, 1.0, 0.12));
        let filled = self.width * fraction.clamp(0.0, 1.0);
        self.draw
            .rect()
            .x_y(self.left + filled / 2.0, y)
            .w_h(filled, 4.0)
            .color(color);
        self.y -= 8.0;
    }

    fn text(&mut self, text: &str, color: Rgb<f32>, size: u32, height: f32) {
        self.draw
            .text(text)
            .x_y(self.left + self.width / 2.0, self.y - height / 2.0)
            .w_h(self.width, height)
            .left_justify()
            .no_line_wrap()
            .font_size(size)
            .color(color);
        self.y -= height;
    }
}

fn level_text_color(level: BadgeLevel) -> Rgb<f32> {
    match level {
        BadgeLevel::Secondary => rgb(0.82, 0.84, 0.87),
        other => badge_color(other),
    }
}

impl PanelRenderer {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn draw(&self, draw: &Draw, state: &DashboardState, status_line: &str) {
        draw.rect()
            .xy(self.area.xy())
            .wh(self.area.wh())
            .color(rgba(0.07f32, 0.08, 0.10, 0.92));

        let mut cursor = Cursor {
            draw,
            left: self.area.left() + PADDING,
            width: self.area.w() - 2.0 * PADDING,
            y: self.area.top() - PADDING,
            bottom: self.area.bottom() + PADDING,
        };

        cursor.line(status_line, rgb(0.6, 0.63, 0.68));

        cursor.header("System Metrics");
        match &state.metrics {
            PanelState::Ready(metrics) => {
                for tile in metric_tiles(metrics) {
                    cursor.line(&format!("{}: {}", tile.label, tile.value), rgb(0.9, 0.9, 0.9));
                }
            }
            PanelState::Failed(message) => cursor.error(message),
            PanelState::Empty => cursor.line("Loading...", rgb(0.6, 0.6, 0.6)),
        }

        cursor.header("Trains");
        match &state.trains {
            PanelState::Ready(trains) => {
                for train in trains.iter().take(MAX_TRAIN_CARDS) {
                    let card = train_card(train);
                    cursor.line(&card.title, rgb(1.0, 1.0, 1.0));
                    cursor.line(
                        &format!("{}  [{}]  {}", card.route, card.status, card.delay),
                        level_text_color(card.badge),
                    );
                    cursor.bar(card.speed_fraction, badge_color(BadgeLevel::Info));
                    let speed = match card.priority {
                        Some(priority) => format!("{}  Priority: {}", card.speed, priority),
                        None => card.speed.clone(),
                    };
                    cursor.line(&speed, rgb(0.6, 0.63, 0.68));
                }
                if trains.len() > MAX_TRAIN_CARDS {
                    cursor.line(
                        &format!("+{} more", trains.len() - MAX_TRAIN_CARDS),
                        rgb(0.6, 0.63, 0.68),
                    );
                }
            }
            PanelState::Failed(message) => cursor.error(message),
            PanelState::Empty => cursor.line("Loading...", rgb(0.6, 0.6, 0.6)),
        }

        cursor.header("Conflicts");
        match &state.conflicts {
            PanelState::Ready(conflicts) if conflicts.is_empty() => {
                cursor.line("No conflicts detected", badge_color(BadgeLevel::Success));
            }
            PanelState::Ready(conflicts) => {
                for conflict in conflicts.iter().take(MAX_CONFLICT_CARDS) {
                    let card = conflict_card(conflict);
                    let color = badge_color(card.badge);
                    let title = match &card.eta {
                        Some(eta) => format!("{} ({}, {})", card.title, card.severity, eta),
                        None => format!("{} ({})", card.title, card.severity),
                    };
                    cursor.line(&title, color);
                    cursor.line(&card.description, rgb(0.82, 0.84, 0.87));
                }
            }
            PanelState::Failed(message) => cursor.error(message),
            PanelState::Empty => cursor.line("Loading...", rgb(0.6, 0.6, 0.6)),
        }

        cursor.header("Optimization");
        if state.optimization_pending() {
            cursor.line("Optimizing...", badge_color(BadgeLevel::Warning));
        }
        match &state.recommendations {
            PanelState::Ready(result) => {
                for line in optimization_lines(result) {
                    cursor.panel_line(&line);
                }
            }
            PanelState::Failed(message) => cursor.error(message),
            PanelState::Empty => {}
        }

        cursor.header("Scenario");
        if state.scenario_pending() {
            cursor.line("Running scenario...", badge_color(BadgeLevel::Warning));
        }
        match &state.scenario {
            PanelState::Ready(result) => {
                for line in scenario_lines(result) {
                    cursor.panel_line(&line);
                }
            }
            PanelState::Failed(message) => cursor.error(message),
            PanelState::Empty => {}
        }
    }
}
