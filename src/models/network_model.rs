// src/models/network_model.rs
// the JSON-based transit network: lines, their station polylines and the trains placed on them

use rand::Rng;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::entity::{Direction, Entity};
use super::geometry::{MapPoint, ViewBox};

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("failed to read network file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse network file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("line '{0}' has no stations")]
    EmptyPath(String),
    #[error("line '{0}' is defined more than once")]
    DuplicateLine(String),
}

/// An immutable polyline owned by a named line.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitPath {
    line: String,
    waypoints: Vec<MapPoint>,
}

impl TransitPath {
    pub fn new(line: impl Into<String>, waypoints: Vec<MapPoint>) -> Result<Self, NetworkError> {
        let line = line.into();
        if waypoints.is_empty() {
            return Err(NetworkError::EmptyPath(line));
        }
        Ok(Self { line, waypoints })
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn waypoints(&self) -> &[MapPoint] {
        &self.waypoints
    }

    /// Number of segments; zero for a single-waypoint path.
    pub fn segment_count(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn first(&self) -> MapPoint {
        self.waypoints[0]
    }

    pub fn last(&self) -> MapPoint {
        self.waypoints[self.waypoints.len() - 1]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineRecord {
    pub name: String,
    #[serde(default = "default_line_color")]
    pub color: [f32; 3],
    pub stations: Vec<StationRecord>,
}

fn default_line_color() -> [f32; 3] {
    [0.6, 0.6, 0.6]
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainRecord {
    pub name: String,
    pub line: String,
    #[serde(default)]
    pub position: Option<f32>,
    #[serde(default)]
    pub direction: Option<Direction>,
    pub speed: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct NetworkFile {
    #[serde(rename = "viewBox", default)]
    view_box: ViewBox,
    lines: Vec<LineRecord>,
    #[serde(default)]
    trains: Vec<TrainRecord>,
}

/// A drawable line: its path plus the station labels and colour.
#[derive(Debug, Clone)]
pub struct TransitLine {
    pub path: TransitPath,
    pub color: [f32; 3],
    pub station_names: Vec<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct TransitNetwork {
    pub view_box: ViewBox,
    pub lines: Vec<TransitLine>,
    pub trains: Vec<TrainRecord>,
}

impl TransitNetwork {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, NetworkError> {
        let file: NetworkFile = serde_json::from_str(content)?;

        let mut seen = HashSet::new();
        let mut lines = Vec::with_capacity(file.lines.len());
        for record in file.lines {
            if !seen.insert(record.name.clone()) {
                return Err(NetworkError::DuplicateLine(record.name));
            }
            let waypoints = record
                .stations
                .iter()
                .map(|s| MapPoint::new(s.x, s.y))
                .collect();
            let station_names = record.stations.into_iter().map(|s| s.name).collect();
            lines.push(TransitLine {
                path: TransitPath::new(record.name, waypoints)?,
                color: record.color,
                station_names,
            });
        }

        Ok(Self {
            view_box: file.view_box,
            lines,
            trains: file.trains,
        })
    }

    /// Paths keyed by line name, as the animator consumes them.
    pub fn paths(&self) -> HashMap<String, TransitPath> {
        self.lines
            .iter()
            .map(|l| (l.path.line().to_string(), l.path.clone()))
            .collect()
    }

    /// Builds the initial entities. Trains without a placement get a random one.
    pub fn spawn_entities<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Entity> {
        self.trains
            .iter()
            .map(|train| {
                let position = train.position.unwrap_or_else(|| rng.gen_range(0.0..=1.0));
                let direction = train.direction.unwrap_or_else(|| {
                    if rng.gen_bool(0.5) {
                        Direction::Forward
                    } else {
                        Direction::Backward
                    }
                });
                Entity::new(&train.name, &train.line, position, direction, train.speed)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "viewBox": { "minX": 0, "minY": 0, "width": 100, "height": 50 },
        "lines": [
            { "name": "Main", "color": [1.0, 0.0, 0.0],
              "stations": [ { "name": "A", "x": 0, "y": 0 }, { "x": 10, "y": 0 }, { "name": "C", "x": 10, "y": 10 } ] },
            { "name": "Spur", "stations": [ { "x": 5, "y": 5 } ] }
        ],
        "trains": [
            { "name": "T1", "line": "Main", "position": 0.25, "direction": "backward", "speed": 0.01 },
            { "name": "T2", "line": "Spur", "speed": 0.02 }
        ]
    }"#;

    #[test]
    fn test_parse_network() {
        let network = TransitNetwork::from_json(SAMPLE).unwrap();
        assert_eq!(network.view_box.width, 100.0);
        assert_eq!(network.lines.len(), 2);

        let main = &network.lines[0];
        assert_eq!(main.path.line(), "Main");
        assert_eq!(main.path.segment_count(), 2);
        assert_eq!(main.path.last(), MapPoint::new(10.0, 10.0));
        assert_eq!(main.station_names[1], None);

        let spur = &network.lines[1];
        assert_eq!(spur.color, default_line_color());
        assert_eq!(spur.path.segment_count(), 0);
    }

    #[test]
    fn test_empty_line_is_rejected() {
        let json = r#"{ "lines": [ { "name": "Ghost", "stations": [] } ] }"#;
        match TransitNetwork::from_json(json) {
            Err(NetworkError::EmptyPath(name)) => assert_eq!(name, "Ghost"),
            other => panic!("expected EmptyPath, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_line_is_rejected() {
        let json = r#"{ "lines": [
            { "name": "Main", "stations": [ { "x": 0, "y": 0 } ] },
            { "name": "Main", "stations": [ { "x": 1, "y": 1 } ] }
        ] }"#;
        assert!(matches!(
            TransitNetwork::from_json(json),
            Err(NetworkError::DuplicateLine(_))
        ));
    }

    #[test]
    fn test_spawn_entities_keeps_explicit_placement() {
        let network = TransitNetwork::from_json(SAMPLE).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let entities = network.spawn_entities(&mut rng);

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].position, 0.25);
        assert_eq!(entities[0].direction, Direction::Backward);
        assert!((0.0..=1.0).contains(&entities[1].position));
        assert_eq!(entities[1].path_id, "Spur");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let network = TransitNetwork::load(file.path()).unwrap();
        assert_eq!(network.paths().len(), 2);
    }

    #[test]
    fn test_bundled_network_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/network.json");
        let network = TransitNetwork::load(path).unwrap();
        let paths = network.paths();

        assert_eq!(network.lines.len(), 8);
        assert!(network.trains.iter().all(|t| paths.contains_key(&t.line)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = TransitNetwork::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, NetworkError::Io { .. }));
    }
}
