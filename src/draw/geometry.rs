use std::{fmt, ops};

use crate::profile::Extents;

/// Canvas length in SVG user units, printed with one decimal so the
/// emitted path data stays compact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixels(f64);

impl Pixels {
    pub fn new(val: f64) -> Self {
        Self(val)
    }
}

impl ops::Deref for Pixels {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// One series point placed on the ring: the polar pair it mapped to and
/// its Cartesian position on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct RadialPoint {
    /// Degrees; the configured start angle plus up to one full turn.
    pub angle: f64,
    pub radius: f64,
    pub x: Pixels,
    pub y: Pixels,
}

/// Maps the monotonic distance axis onto a full 360° sweep and the
/// elevation range onto the radial band between the inner circle and the
/// canvas edge. Extents are fixed over the whole series, so the mapping
/// is the same for every point.
pub struct RingGeometry {
    canvas: (f64, f64),
    inner_radius: f64,
    padding_inside: f64,
    padding_outside: f64,
    start_angle: f64,
    extents: Extents,
}

impl RingGeometry {
    /// `extents` must come from [`crate::profile::Profile::extents`],
    /// which rejects the zero ranges that would make this mapping divide
    /// by zero.
    pub fn new(
        canvas: (f64, f64),
        inner_radius: f64,
        padding_inside: f64,
        padding_outside: f64,
        start_angle: f64,
        extents: Extents,
    ) -> Self {
        Self {
            canvas,
            inner_radius,
            padding_inside,
            padding_outside,
            start_angle,
            extents,
        }
    }

    pub fn project(&self, distance: f64, elevation: f64) -> RadialPoint {
        let angle = distance / self.extents.max_distance * 360.0 + self.start_angle;
        let band = self.canvas.0 / 2.0 - self.inner_radius - self.padding_outside;
        let radius = self.inner_radius
            + (elevation - self.extents.min_elevation) / self.extents.elevation_range() * band
            + self.padding_inside;
        let (cx, cy) = self.center();
        RadialPoint {
            angle,
            radius,
            x: Pixels::new(cx + radius * angle.to_radians().cos()),
            y: Pixels::new(cy + radius * angle.to_radians().sin()),
        }
    }

    pub fn canvas(&self) -> (f64, f64) {
        self.canvas
    }

    pub fn center(&self) -> (f64, f64) {
        (self.canvas.0 / 2.0, self.canvas.1 / 2.0)
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Radius of the heading/footer text arcs.
    pub fn text_radius(&self) -> f64 {
        self.inner_radius + self.padding_inside + self.padding_outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(start_angle: f64) -> RingGeometry {
        RingGeometry::new(
            (500.0, 500.0),
            50.0,
            0.0,
            0.0,
            start_angle,
            Extents {
                max_distance: 100.0,
                min_elevation: 100.0,
                max_elevation: 150.0,
            },
        )
    }

    #[test]
    fn maps_the_worked_example() {
        let geometry = geometry(0.0);

        let first = geometry.project(0.0, 100.0);
        assert_eq!(first.angle, 0.0);
        assert_eq!(first.radius, 50.0);
        assert_eq!(*first.x, 300.0);
        assert_eq!(*first.y, 250.0);

        let peak = geometry.project(50.0, 150.0);
        assert_eq!(peak.angle, 180.0);
        assert_eq!(peak.radius, 250.0);
        assert!((*peak.x - 0.0).abs() < 1e-9);
        assert!((*peak.y - 250.0).abs() < 1e-9);

        let last = geometry.project(100.0, 100.0);
        assert_eq!(last.angle, 360.0);
        assert_eq!(last.radius, 50.0);
    }

    #[test]
    fn angles_stay_within_one_turn_of_the_start_angle() {
        let geometry = geometry(-90.0);
        for distance in [0.0, 12.5, 50.0, 99.0, 100.0] {
            let point = geometry.project(distance, 120.0);
            assert!(
                (-90.0..=270.0).contains(&point.angle),
                "angle {} for distance {distance}",
                point.angle
            );
        }
    }

    #[test]
    fn radii_stay_within_the_radial_band() {
        let geometry = RingGeometry::new(
            (500.0, 500.0),
            50.0,
            10.0,
            20.0,
            0.0,
            Extents {
                max_distance: 100.0,
                min_elevation: 100.0,
                max_elevation: 150.0,
            },
        );
        // band = 250 - 50 - 20 = 180; radii run from 60 to 240
        for elevation in [100.0, 101.0, 125.0, 149.0, 150.0] {
            let point = geometry.project(40.0, elevation);
            assert!(
                (60.0..=240.0).contains(&point.radius),
                "radius {} for elevation {elevation}",
                point.radius
            );
        }
        assert_eq!(geometry.project(0.0, 100.0).radius, 60.0);
        assert_eq!(geometry.project(0.0, 150.0).radius, 240.0);
    }

    #[test]
    fn text_radius_clears_both_paddings() {
        let geometry = RingGeometry::new(
            (500.0, 500.0),
            50.0,
            10.0,
            20.0,
            0.0,
            Extents {
                max_distance: 1.0,
                min_elevation: 0.0,
                max_elevation: 1.0,
            },
        );
        assert_eq!(geometry.text_radius(), 80.0);
    }
}
