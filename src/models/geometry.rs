// src/models/geometry.rs
// Planar types shared by the network model, the animator and the renderers

use serde::{Deserialize, Serialize};

/// A point in map space (top-left origin, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

impl MapPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation written so that t = 0 and t = 1 hit the endpoints exactly.
    pub fn lerp(self, other: MapPoint, t: f32) -> MapPoint {
        MapPoint {
            x: self.x * (1.0 - t) + other.x * t,
            y: self.y * (1.0 - t) + other.y * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    pub fn max_x(&self) -> f32 {
        self.min_x + self.width
    }
    pub fn max_y(&self) -> f32 {
        self.min_y + self.height
    }

    pub fn center(&self) -> MapPoint {
        MapPoint::new(
            (self.min_x + self.max_x()) / 2.0,
            (self.min_y + self.max_y()) / 2.0,
        )
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width: 1000.0,
            height: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod viewbox_tests {
        use super::*;

        #[test]
        fn test_viewbox_calculations() {
            let viewbox = ViewBox {
                min_x: 10.0,
                min_y: 20.0,
                width: 100.0,
                height: 200.0,
            };

            assert_eq!(viewbox.max_x(), 110.0);
            assert_eq!(viewbox.max_y(), 220.0);
            assert_eq!(viewbox.center(), MapPoint::new(60.0, 120.0));
        }
    }

    mod map_point_tests {
        use super::*;

        #[test]
        fn test_lerp_endpoints_are_exact() {
            let a = MapPoint::new(0.3, -7.1);
            let b = MapPoint::new(12.9, 4.4);

            assert_eq!(a.lerp(b, 0.0), a);
            assert_eq!(a.lerp(b, 1.0), b);
        }

        #[test]
        fn test_lerp_midpoint() {
            let a = MapPoint::new(10.0, 0.0);
            let b = MapPoint::new(10.0, 10.0);
            assert_eq!(a.lerp(b, 0.5), MapPoint::new(10.0, 5.0));
        }
    }
}
