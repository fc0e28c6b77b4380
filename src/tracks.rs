use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use geo::HaversineDistance;
use log::info;

use crate::error::Error;

/// One raw track point: position on the ellipsoid plus elevation in
/// meters. The position is only ever used to compute pairwise distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub position: geo::Point<f64>,
    pub elevation: f64,
}

impl TrackPoint {
    pub fn new(longitude: f64, latitude: f64, elevation: f64) -> Self {
        Self {
            position: geo::Point::new(longitude, latitude),
            elevation,
        }
    }

    /// 3-D distance to `other` in meters: haversine ground distance
    /// combined with the elevation delta.
    pub fn distance_3d(&self, other: &TrackPoint) -> f64 {
        let flat = self.position.haversine_distance(&other.position);
        flat.hypot(other.elevation - self.elevation)
    }
}

/// The ordered point sequence of one track file, all tracks and segments
/// flattened, identified by the filename stem.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSource {
    pub id: String,
    pub points: Vec<TrackPoint>,
}

/// A folder of `.gpx` files, visited in filename order.
pub struct TrackFolder {
    dir_path: PathBuf,
}

impl TrackFolder {
    pub fn new(dir_path: &Path) -> TrackFolder {
        TrackFolder {
            dir_path: dir_path.to_owned(),
        }
    }

    pub fn sources(&self) -> Result<Vec<TrackSource>, Error> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir_path)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "gpx"))
            .collect();
        if paths.is_empty() {
            return Err(Error::NoTracks(self.dir_path.clone()));
        }
        paths.sort();

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            info!("Opening {}", path.display());
            let id = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let file = File::open(&path)?;
            sources.push(parse_source(BufReader::new(file), id, &path)?);
        }
        Ok(sources)
    }
}

fn parse_source<R: io::Read>(reader: R, id: String, path: &Path) -> Result<TrackSource, Error> {
    let gpx = gpx::read(reader).map_err(|source| Error::GpxParse {
        path: path.to_owned(),
        source,
    })?;
    let mut points = Vec::new();
    for track in gpx.tracks {
        for segment in track.segments {
            for waypoint in segment.points {
                let elevation = waypoint
                    .elevation
                    .ok_or_else(|| Error::MissingElevation(path.to_owned()))?;
                points.push(TrackPoint {
                    position: waypoint.point(),
                    elevation,
                });
            }
        }
    }
    Ok(TrackSource { id, points })
}
