use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures abort the run; there are no retries and no partial recovery.
#[derive(Error, Debug)]
pub enum Error {
    #[error("metadata file {} not found, rebuild elevation data to create it", .0.display())]
    MissingMetadata(PathBuf),
    #[error("malformed row in {}: {}", .path.display(), .source)]
    MalformedRow { path: PathBuf, source: csv::Error },
    #[error("failed to write {}: {}", .path.display(), .source)]
    CsvWrite { path: PathBuf, source: csv::Error },
    #[error("cannot lay out a ring: the {0} range of the series is zero")]
    DegenerateSeries(&'static str),
    #[error("not enough track points to draw a path")]
    InsufficientData,
    #[error("no .gpx files found in {}", .0.display())]
    NoTracks(PathBuf),
    #[error("track point without elevation in {}", .0.display())]
    MissingElevation(PathBuf),
    #[error("failed to parse {}: {}", .path.display(), .source)]
    GpxParse {
        path: PathBuf,
        source: gpx::errors::GpxError,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read configuration: {0}")]
    ConfigFormat(#[from] serde_yaml::Error),
    #[error("failed to render chart: {0}")]
    Chart(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
