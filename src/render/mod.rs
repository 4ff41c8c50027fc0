// src/render/mod.rs
// Drawing of the transit map and the dashboard panels through nannou's Draw API

pub mod map_renderer;
pub mod panel_renderer;

pub use map_renderer::MapRenderer;
pub use panel_renderer::PanelRenderer;

use nannou::prelude::*;

use crate::models::{MapPoint, ViewBox};
use crate::views::BadgeLevel;

/// Map space to nannou space: centre on the view box, flip y, scale, rotate, translate.
#[derive(Debug, Clone)]
pub struct Transform2D {
    pub translation: Vec2,
    pub scale: f32,
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transform2D {
    /// Uniform scale that fits the whole view box inside `area`, centred.
    pub fn fit(view_box: &ViewBox, area: Rect) -> Self {
        let scale_x = area.w() / view_box.width.max(f32::EPSILON);
        let scale_y = area.h() / view_box.height.max(f32::EPSILON);
        Self {
            translation: area.xy(),
            scale: scale_x.min(scale_y),
            rotation: 0.0,
        }
    }

    pub fn apply(&self, point: MapPoint, view_box: &ViewBox) -> Point2 {
        let center = view_box.center();
        let local_x = (point.x - center.x) * self.scale;
        let local_y = (center.y - point.y) * self.scale; // invert y to match nannou

        let (sin_rot, cos_rot) = self.rotation.sin_cos();
        pt2(
            self.translation.x + local_x * cos_rot - local_y * sin_rot,
            self.translation.y + local_x * sin_rot + local_y * cos_rot,
        )
    }
}

#[derive(Debug, Clone)]
pub struct RenderParams {
    pub color: Rgb<f32>,
    pub stroke_weight: f32,
}

pub fn badge_color(level: BadgeLevel) -> Rgb<f32> {
    match level {
        BadgeLevel::Success => rgb(0.10, 0.65, 0.33),
        BadgeLevel::Danger => rgb(0.86, 0.21, 0.27),
        BadgeLevel::Warning => rgb(0.98, 0.75, 0.14),
        BadgeLevel::Info => rgb(0.05, 0.67, 0.82),
        BadgeLevel::Secondary => rgb(0.55, 0.58, 0.62),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn view_box() -> ViewBox {
        ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }

    #[test]
    fn test_coordinate_transform() {
        let vb = view_box();

        // Map (0,0) is the top-left corner, so it lands at (-50, 50)
        let transform = Transform2D::default();
        let point = transform.apply(MapPoint::new(0.0, 0.0), &vb);
        assert_eq!(point.x, -50.0);
        assert_eq!(point.y, 50.0);

        let point = transform.apply(MapPoint::new(100.0, 100.0), &vb);
        assert_eq!(point.x, 50.0);
        assert_eq!(point.y, -50.0);

        // With translation
        let transform = Transform2D {
            translation: Vec2::new(100.0, 100.0),
            ..Default::default()
        };
        let point = transform.apply(MapPoint::new(0.0, 0.0), &vb);
        assert_eq!(point.x, 50.0);
        assert_eq!(point.y, 150.0);

        // With scaling
        let transform = Transform2D {
            scale: 2.0,
            ..Default::default()
        };
        let point = transform.apply(MapPoint::new(0.0, 0.0), &vb);
        assert_eq!(point.x, -100.0);
        assert_eq!(point.y, 100.0);

        // With rotation
        let transform = Transform2D {
            rotation: PI / 2.0,
            ..Default::default()
        };
        let point = transform.apply(MapPoint::new(0.0, 0.0), &vb);
        assert!((point.x - -50.0).abs() < 0.001);
        assert!((point.y - -50.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_uses_the_tighter_axis() {
        let vb = ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: 200.0,
            height: 100.0,
        };
        let area = Rect::from_x_y_w_h(10.0, -20.0, 400.0, 400.0);
        let transform = Transform2D::fit(&vb, area);

        assert_eq!(transform.scale, 2.0);
        assert_eq!(transform.translation, Vec2::new(10.0, -20.0));
        assert_eq!(transform.apply(vb.center(), &vb), pt2(10.0, -20.0));
    }
}
