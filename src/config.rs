use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// Run configuration, loaded once from YAML and immutable afterwards.
/// Unknown or missing keys fail the load rather than falling back to
/// defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub track_folder: PathBuf,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Radius of the inner circle holding the center image.
    pub circle_radius: f64,
    pub padding_inside: f64,
    pub padding_outside: f64,
    /// Angle of the first track point, degrees.
    pub start_angle: f64,
    pub line_size: f64,
    pub line_color: String,
    pub font_family: String,
    pub stop_text_color: String,
    pub center_image_path: PathBuf,
    pub heading_text: String,
    pub heading_color: String,
    pub heading_font_size: f64,
    /// Offset of the heading along its arc, SVG user units.
    pub heading_rotation: f64,
    pub footer_text: String,
    pub footer_color: String,
    pub footer_font_size: f64,
    pub footer_rotation: f64,
    /// Series cache file.
    pub elevation_data: PathBuf,
    /// Stop metadata table.
    pub metadata_file: PathBuf,
    /// Rectangular distance/elevation chart.
    pub elevation_plot_file: PathBuf,
    /// Final SVG scene.
    pub design_file: PathBuf,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        fn positive(name: &str, value: f64) -> Result<(), Error> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("circle_radius", self.circle_radius)?;
        positive("line_size", self.line_size)?;
        positive("heading_font_size", self.heading_font_size)?;
        positive("footer_font_size", self.footer_font_size)?;
        if self.padding_inside < 0.0 || self.padding_outside < 0.0 {
            return Err(Error::InvalidConfig(
                "paddings must not be negative".to_owned(),
            ));
        }
        let band = self.canvas_width / 2.0 - self.circle_radius - self.padding_outside;
        if band <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "inner circle and outside padding leave no radial band for the profile \
                 (canvas_width/2 - circle_radius - padding_outside = {band})"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "\
track_folder: tracks
canvas_width: 2000
canvas_height: 2000
circle_radius: 450
padding_inside: 40
padding_outside: 160
start_angle: -90
line_size: 4
line_color: '#2b2b2b'
font_family: Georgia
stop_text_color: '#4a3b2a'
center_image_path: images/emblem.png
heading_text: Elevation Ring
heading_color: '#2b2b2b'
heading_font_size: 96
heading_rotation: 0
footer_text: One year of rides
footer_color: '#4a3b2a'
footer_font_size: 64
footer_rotation: 250
elevation_data: out/elevation-data.csv
metadata_file: out/stops-metadata.csv
elevation_plot_file: out/elevation-profile.png
design_file: out/design.svg
";

    #[test]
    fn loads_a_complete_file() {
        let config: Config = serde_yaml::from_str(VALID).unwrap();
        config.validate().unwrap();
        assert_eq!(config.canvas_width, 2000.0);
        assert_eq!(config.start_angle, -90.0);
        assert_eq!(config.design_file, PathBuf::from("out/design.svg"));
    }

    #[test]
    fn rejects_missing_keys() {
        let truncated = VALID.replace("canvas_height: 2000\n", "");
        assert!(serde_yaml::from_str::<Config>(&truncated).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let extended = format!("{VALID}mystery_knob: 12\n");
        assert!(serde_yaml::from_str::<Config>(&extended).is_err());
    }

    #[test]
    fn rejects_inner_circle_wider_than_canvas() {
        let config: Config =
            serde_yaml::from_str(&VALID.replace("circle_radius: 450", "circle_radius: 1200"))
                .unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_line_size() {
        let config: Config =
            serde_yaml::from_str(&VALID.replace("line_size: 4", "line_size: 0")).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
