// src/animation/position_animator.rs
//
// Moves every train back and forth along its line and resolves
// the map coordinate the renderer draws it at.

use rand::Rng;
use std::collections::HashMap;

use crate::models::{Direction, Entity, MapPoint, TransitPath};

/// Maps an entity's stored progress onto its path.
///
/// Backward entities traverse the segments in mirrored order, so the stored
/// position keeps its meaning while the visual order is reversed.
pub fn resolve_coordinate(entity: &Entity, path: &TransitPath) -> MapPoint {
    let segments = path.segment_count();
    if segments == 0 {
        return path.first();
    }

    let segment_coord = entity.position.clamp(0.0, 1.0) * segments as f32;
    let mut index = (segment_coord.floor() as usize).min(segments - 1);
    let mut factor = (segment_coord - index as f32).clamp(0.0, 1.0);

    if entity.direction == Direction::Backward {
        index = segments - 1 - index;
        factor = 1.0 - factor;
    }

    let waypoints = path.waypoints();
    waypoints[index].lerp(waypoints[index + 1], factor)
}

/// Steps one entity; flips direction when it lands on a path end.
pub fn advance(entity: &mut Entity, dt: f32) {
    entity.position += entity.direction.sign() * entity.speed * dt;

    match entity.direction {
        Direction::Forward if entity.position >= 1.0 => {
            entity.position = 1.0;
            entity.direction = entity.direction.flipped();
        }
        Direction::Backward if entity.position <= 0.0 => {
            entity.position = 0.0;
            entity.direction = entity.direction.flipped();
        }
        _ => {}
    }

    entity.position = entity.position.clamp(0.0, 1.0);
}

pub struct PositionAnimator {
    paths: HashMap<String, TransitPath>,
    entities: Vec<Entity>,
}

impl PositionAnimator {
    /// Trains are placed on the map right away, so a paused animation still shows them.
    pub fn new(paths: HashMap<String, TransitPath>, entities: Vec<Entity>) -> Self {
        let mut animator = Self { paths, entities };
        animator.resolve_all();
        animator
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities whose line is unknown; they never move.
    pub fn dangling_entities(&self) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| !self.paths.contains_key(&e.path_id))
            .collect()
    }

    /// One advance-and-resolve cycle. Pure in-memory update.
    pub fn tick(&mut self, dt: f32) {
        let paths = &self.paths;
        for entity in self
            .entities
            .iter_mut()
            .filter(|e| paths.contains_key(&e.path_id))
        {
            advance(entity, dt);
        }
        self.resolve_all();
    }

    fn resolve_all(&mut self) {
        for entity in self.entities.iter_mut() {
            if let Some(path) = self.paths.get(&entity.path_id) {
                entity.coordinate = Some(resolve_coordinate(entity, path));
            }
        }
    }

    /// Throws every entity to a random place and heading. Seen on the next tick.
    pub fn scatter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for entity in self.entities.iter_mut() {
            entity.position = rng.gen_range(0.0..=1.0);
            entity.direction = if rng.gen_bool(0.5) {
                Direction::Forward
            } else {
                Direction::Backward
            };
        }
    }
}
