//! The auxiliary rectangular chart: plain distance vs elevation over the
//! whole series, rendered to a raster file for a quick sanity check of
//! the aggregated data.

use log::info;
use plotters::prelude::*;

use crate::config::Config;
use crate::error::Error;
use crate::profile::Profile;

const SIZE: (u32, u32) = (1280, 720);

fn chart_error<E: std::fmt::Display>(err: E) -> Error {
    Error::Chart(err.to_string())
}

pub fn render(profile: &Profile, config: &Config) -> Result<(), Error> {
    let extents = profile.extents()?;
    info!(
        "Plotting combined elevation profile to {}",
        config.elevation_plot_file.display()
    );

    let root = BitMapBackend::new(&config.elevation_plot_file, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Elevation Profile", ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(
            0.0..extents.max_distance,
            extents.min_elevation..extents.max_elevation,
        )
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Elevation (m)")
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(LineSeries::new(
            profile
                .points()
                .iter()
                .map(|point| (point.distance, point.elevation)),
            &BLUE,
        ))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    Ok(())
}
