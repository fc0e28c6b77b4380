//! The aggregated elevation series: one global, monotonic distance
//! coordinate over every track of the journey, plus the stop labels
//! marking where each track begins.

pub mod cache;

use std::collections::{BTreeSet, HashMap};

use log::info;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::tracks::TrackSource;

/// One sample of the series: cumulative distance from the start of the
/// whole journey, elevation, and the stop label (empty everywhere except
/// the first point of each source).
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePoint {
    pub distance: f64,
    pub elevation: f64,
    pub stop: String,
}

/// The combined distance/elevation series. Computed once per run (or
/// loaded from cache) and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    points: Vec<ProfilePoint>,
}

impl Profile {
    pub fn new(points: Vec<ProfilePoint>) -> Profile {
        Profile { points }
    }

    /// Concatenates the sources in the order given. The running distance
    /// carries across source boundaries without a reset, but no distance
    /// is computed between the last point of one source and the first
    /// point of the next.
    pub fn aggregate<I: IntoIterator<Item = TrackSource>>(sources: I) -> Profile {
        let mut points = Vec::new();
        let mut total_distance = 0.0;
        for source in sources {
            let mut previous = None;
            for (index, point) in source.points.iter().enumerate() {
                if let Some(previous) = previous {
                    total_distance += point.distance_3d(previous);
                }
                points.push(ProfilePoint {
                    distance: total_distance,
                    elevation: point.elevation,
                    stop: if index == 0 {
                        source.id.clone()
                    } else {
                        String::new()
                    },
                });
                previous = Some(point);
            }
            info!(
                "Processed {}, total distance so far: {:.0} m",
                source.id, total_distance
            );
        }
        Profile { points }
    }

    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_distance(&self) -> f64 {
        self.points.last().map_or(0.0, |point| point.distance)
    }

    /// Distinct non-empty stop labels in sorted order.
    pub fn stop_labels(&self) -> BTreeSet<&str> {
        self.points
            .iter()
            .filter(|point| !point.stop.is_empty())
            .map(|point| point.stop.as_str())
            .collect()
    }

    /// Distance and elevation extents over the whole series. A series
    /// that is too short, or flat along either axis, cannot be laid out
    /// on a ring and is rejected here rather than dividing by zero later.
    pub fn extents(&self) -> Result<Extents, Error> {
        if self.points.len() < 2 {
            return Err(Error::InsufficientData);
        }
        let mut min_distance = f64::INFINITY;
        let mut max_distance = f64::NEG_INFINITY;
        let mut min_elevation = f64::INFINITY;
        let mut max_elevation = f64::NEG_INFINITY;
        for point in &self.points {
            min_distance = min_distance.min(point.distance);
            max_distance = max_distance.max(point.distance);
            min_elevation = min_elevation.min(point.elevation);
            max_elevation = max_elevation.max(point.elevation);
        }
        if max_distance <= min_distance {
            return Err(Error::DegenerateSeries("distance"));
        }
        if max_elevation <= min_elevation {
            return Err(Error::DegenerateSeries("elevation"));
        }
        Ok(Extents {
            max_distance,
            min_elevation,
            max_elevation,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub max_distance: f64,
    pub min_elevation: f64,
    pub max_elevation: f64,
}

impl Extents {
    pub fn elevation_range(&self) -> f64 {
        self.max_elevation - self.min_elevation
    }
}

/// Presentation settings for one labeled stop, user-editable in the
/// metadata table between runs. A label without a row is not shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopMetadata {
    #[serde(with = "python_bool")]
    pub show: bool,
    pub stop_key: String,
    pub display_name: String,
    #[serde(with = "python_bool")]
    pub invert_text: bool,
    /// Direction of the marker text offset, degrees.
    pub angle: f64,
}

pub type StopTable = HashMap<String, StopMetadata>;

/// Booleans in the metadata table read `True`/`False` (any case accepted)
/// so the file stays friendly to spreadsheet edits.
mod python_bool {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let text = String::deserialize(deserializer)?;
        match text.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected True or False, got {other:?}"
            ))),
        }
    }
}
