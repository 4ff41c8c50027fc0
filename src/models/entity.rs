// src/models/entity.rs
//
// A train as the animator sees it: a point moving back and forth along one path.

use serde::{Deserialize, Serialize};

use super::geometry::MapPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: String,
    /// Name of the line whose path this entity travels.
    pub path_id: String,
    /// Fractional progress along the path, always within [0, 1].
    pub position: f32,
    pub direction: Direction,
    /// Progress units per tick.
    pub speed: f32,
    /// Last resolved map coordinate, `None` while its path is unknown.
    pub coordinate: Option<MapPoint>,
}

impl Entity {
    pub fn new(
        id: impl Into<String>,
        path_id: impl Into<String>,
        position: f32,
        direction: Direction,
        speed: f32,
    ) -> Self {
        Self {
            id: id.into(),
            path_id: path_id.into(),
            position: position.clamp(0.0, 1.0),
            direction,
            speed: speed.abs(),
            coordinate: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flip_and_sign() {
        assert_eq!(Direction::Forward.flipped(), Direction::Backward);
        assert_eq!(Direction::Backward.flipped(), Direction::Forward);
        assert_eq!(Direction::Forward.sign(), 1.0);
        assert_eq!(Direction::Backward.sign(), -1.0);
    }

    #[test]
    fn test_new_entity_is_normalized() {
        let entity = Entity::new("TRN001", "Main Line", 1.7, Direction::Forward, -0.01);
        assert_eq!(entity.position, 1.0);
        assert_eq!(entity.speed, 0.01);
        assert!(entity.coordinate.is_none());
    }

    #[test]
    fn test_direction_deserializes_lowercase() {
        let direction: Direction = serde_json::from_str("\"backward\"").unwrap();
        assert_eq!(direction, Direction::Backward);
    }
}
