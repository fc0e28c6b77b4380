//! Turns a folder of GPS tracks into a circular elevation-profile
//! infographic: the tracks are aggregated into one distance/elevation
//! series, cached as CSV, and rendered as a radial SVG chart with stop
//! markers and curved heading text.

pub mod chart;
pub mod config;
pub mod draw;
pub mod error;
pub mod profile;
pub mod tracks;

pub use config::Config;
pub use error::Error;
