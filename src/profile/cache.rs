//! CSV persistence for the aggregated series and the stop-metadata
//! table. The series cache avoids re-reading every track on each run;
//! the metadata table is bootstrapped once and then owned by the user.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::{Profile, ProfilePoint, StopMetadata, StopTable};
use crate::config::Config;
use crate::error::Error;
use crate::tracks::TrackFolder;

/// What a probe of the series cache found. Modeled as data so the
/// branching in [`load_or_build`] is explicit rather than hidden behind
/// file-existence checks.
pub enum CacheState {
    Fresh(Profile),
    Missing,
    Malformed(Error),
}

pub fn probe(path: &Path) -> CacheState {
    if !path.is_file() {
        return CacheState::Missing;
    }
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => return CacheState::Malformed(err.into()),
    };
    match parse_profile(BufReader::new(file)) {
        Ok(profile) => CacheState::Fresh(profile),
        Err(source) => CacheState::Malformed(Error::MalformedRow {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Returns the series plus whether it was rebuilt from the track files
/// this run. A rebuild persists the series cache and, only if no
/// metadata table exists yet, bootstraps one default row per stop; an
/// existing table is never overwritten.
pub fn load_or_build(config: &Config, rebuild: bool) -> Result<(Profile, bool), Error> {
    if !rebuild {
        match probe(&config.elevation_data) {
            CacheState::Fresh(profile) => {
                info!(
                    "Loaded {} points from {}",
                    profile.len(),
                    config.elevation_data.display()
                );
                return Ok((profile, false));
            }
            CacheState::Malformed(err) => return Err(err),
            CacheState::Missing => {}
        }
    }

    let sources = TrackFolder::new(&config.track_folder).sources()?;
    let profile = Profile::aggregate(sources);

    let file = File::create(&config.elevation_data)?;
    write_profile(BufWriter::new(file), &profile).map_err(|source| Error::CsvWrite {
        path: config.elevation_data.clone(),
        source,
    })?;

    if !config.metadata_file.is_file() {
        info!(
            "Writing stops metadata to {}",
            config.metadata_file.display()
        );
        let file = File::create(&config.metadata_file)?;
        write_default_metadata(BufWriter::new(file), profile.stop_labels()).map_err(
            |source| Error::CsvWrite {
                path: config.metadata_file.clone(),
                source,
            },
        )?;
    }

    Ok((profile, true))
}

/// Loads the stop table; its absence is fatal because the renderer has
/// nothing sensible to fall back to.
pub fn load_stop_metadata(path: &Path) -> Result<StopTable, Error> {
    if !path.is_file() {
        return Err(Error::MissingMetadata(path.to_owned()));
    }
    let file = File::open(path)?;
    let table = parse_stop_metadata(BufReader::new(file)).map_err(|source| Error::MalformedRow {
        path: path.to_owned(),
        source,
    })?;
    info!("Loaded metadata for {} stops", table.len());
    Ok(table)
}

#[derive(Debug, Deserialize)]
struct SeriesRow {
    #[serde(rename = "Distance(m)")]
    distance: f64,
    #[serde(rename = "Elevation(m)")]
    elevation: f64,
    #[serde(rename = "Stops")]
    stop: String,
}

fn parse_profile<R: io::Read>(reader: R) -> Result<Profile, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut points = Vec::new();
    for result in csv_reader.deserialize() {
        let row: SeriesRow = result?;
        points.push(ProfilePoint {
            distance: row.distance,
            elevation: row.elevation,
            stop: row.stop,
        });
    }
    Ok(Profile::new(points))
}

fn write_profile<W: io::Write>(writer: W, profile: &Profile) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(["Distance(m)", "Elevation(m)", "Stops"])?;
    for point in profile.points() {
        csv_writer.serialize((point.distance, point.elevation, point.stop.as_str()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn parse_stop_metadata<R: io::Read>(reader: R) -> Result<StopTable, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = StopTable::new();
    for result in csv_reader.deserialize() {
        let row: StopMetadata = result?;
        table.insert(row.stop_key.clone(), row);
    }
    Ok(table)
}

fn write_default_metadata<W: io::Write>(
    writer: W,
    labels: impl IntoIterator<Item = impl AsRef<str>>,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(["show", "stop_key", "display_name", "invert_text", "angle"])?;
    for label in labels {
        let label = label.as_ref();
        csv_writer.serialize(StopMetadata {
            show: true,
            stop_key: label.to_owned(),
            display_name: label.to_owned(),
            invert_text: false,
            angle: 0.0,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile::new(vec![
            ProfilePoint {
                distance: 0.0,
                elevation: 102.5,
                stop: "leg-01".to_owned(),
            },
            ProfilePoint {
                distance: 1311.25,
                elevation: 240.0,
                stop: String::new(),
            },
            ProfilePoint {
                distance: 2622.5,
                elevation: 98.75,
                stop: String::new(),
            },
        ])
    }

    #[test]
    fn series_round_trip() {
        let profile = sample_profile();
        let mut buffer = Vec::new();
        write_profile(&mut buffer, &profile).unwrap();
        let restored = parse_profile(buffer.as_slice()).unwrap();
        assert_eq!(restored.len(), profile.len());
        for (a, b) in profile.points().iter().zip(restored.points()) {
            assert!((a.distance - b.distance).abs() < 1e-9);
            assert!((a.elevation - b.elevation).abs() < 1e-9);
            assert_eq!(a.stop, b.stop);
        }
    }

    #[test]
    fn series_header_matches_the_cache_format() {
        let mut buffer = Vec::new();
        write_profile(&mut buffer, &sample_profile()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Distance(m),Elevation(m),Stops\n"));
        assert!(text.contains("0.0,102.5,leg-01\n"));
    }

    #[test]
    fn rejects_a_row_with_too_few_fields() {
        let data = "Distance(m),Elevation(m),Stops\n12.0,340.0\n";
        assert!(parse_profile(data.as_bytes()).is_err());
    }

    #[test]
    fn rejects_a_non_numeric_distance() {
        let data = "Distance(m),Elevation(m),Stops\ntwelve,340.0,\n";
        assert!(parse_profile(data.as_bytes()).is_err());
    }

    #[test]
    fn metadata_rows_gate_and_configure_stops() {
        let data = "show,stop_key,display_name,invert_text,angle\n\
                    True,A,StopA,False,90\n\
                    False,B,StopB,True,0\n";
        let table = parse_stop_metadata(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let a = &table["A"];
        assert!(a.show && !a.invert_text);
        assert_eq!(a.display_name, "StopA");
        assert_eq!(a.angle, 90.0);
        let b = &table["B"];
        assert!(!b.show && b.invert_text);
    }

    #[test]
    fn metadata_booleans_parse_case_insensitively() {
        let data = "show,stop_key,display_name,invert_text,angle\n\
                    TRUE,A,A,false,0\n";
        let table = parse_stop_metadata(data.as_bytes()).unwrap();
        assert!(table["A"].show);
        assert!(!table["A"].invert_text);
    }

    #[test]
    fn metadata_rejects_a_non_boolean_show() {
        let data = "show,stop_key,display_name,invert_text,angle\n\
                    maybe,A,A,False,0\n";
        assert!(parse_stop_metadata(data.as_bytes()).is_err());
    }

    #[test]
    fn default_metadata_is_one_visible_row_per_label() {
        let mut buffer = Vec::new();
        write_default_metadata(&mut buffer, ["alpha", "beta"]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "show,stop_key,display_name,invert_text,angle\n\
             True,alpha,alpha,False,0.0\n\
             True,beta,beta,False,0.0\n"
        );
    }

    #[test]
    fn default_metadata_round_trips_through_the_parser() {
        let mut buffer = Vec::new();
        write_default_metadata(&mut buffer, ["alpha"]).unwrap();
        let table = parse_stop_metadata(buffer.as_slice()).unwrap();
        assert_eq!(table["alpha"].display_name, "alpha");
        assert!(table["alpha"].show);
    }

    #[test]
    fn probe_reports_a_missing_cache() {
        assert!(matches!(
            probe(Path::new("/definitely/not/here.csv")),
            CacheState::Missing
        ));
    }
}
