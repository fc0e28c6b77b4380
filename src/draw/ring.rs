use std::io;

use log::info;

use super::geometry::{Pixels, RadialPoint, RingGeometry};
use super::path::{decimate, Path};
use crate::config::Config;
use crate::error::Error;
use crate::profile::{Profile, StopMetadata, StopTable};
use crate::write_xml;

/// Upper bound on profile-path vertices after decimation.
const PATH_VERTEX_TARGET: usize = 700;

/// The composed radial scene: every series point mapped onto the ring at
/// full resolution, plus the stop markers that survived the metadata
/// gate. Decimation only happens when the path itself is emitted, so
/// marker placement is independent of it.
pub struct Ring<'s> {
    geometry: RingGeometry,
    points: Vec<RadialPoint>,
    stops: Vec<StopMarker<'s>>,
    config: &'s Config,
}

struct StopMarker<'s> {
    x: f64,
    y: f64,
    meta: &'s StopMetadata,
}

impl<'s> Ring<'s> {
    pub fn compose(
        profile: &Profile,
        stop_table: &'s StopTable,
        config: &'s Config,
    ) -> Result<Ring<'s>, Error> {
        let extents = profile.extents()?;
        let geometry = RingGeometry::new(
            (config.canvas_width, config.canvas_height),
            config.circle_radius,
            config.padding_inside,
            config.padding_outside,
            config.start_angle,
            extents,
        );
        let points: Vec<RadialPoint> = profile
            .points()
            .iter()
            .map(|point| geometry.project(point.distance, point.elevation))
            .collect();

        let mut stops = Vec::new();
        for (point, mapped) in profile.points().iter().zip(&points) {
            if point.stop.is_empty() {
                continue;
            }
            // a label without a metadata row, or with show unset, is silent
            if let Some(meta) = stop_table.get(&point.stop) {
                if meta.show {
                    stops.push(StopMarker {
                        x: *mapped.x,
                        y: *mapped.y,
                        meta,
                    });
                }
            }
        }

        info!(
            "Composed ring of {} points with {} stop markers",
            points.len(),
            stops.len()
        );
        Ok(Ring {
            geometry,
            points,
            stops,
            config,
        })
    }

    /// Writes the complete SVG document. Callers wanting all-or-nothing
    /// output should pass a buffer and persist it afterwards.
    pub fn write_svg_to(&self, w: &mut dyn io::Write) -> io::Result<()> {
        let config = self.config;
        let (width, height) = self.geometry.canvas();
        let (cx, cy) = self.geometry.center();

        writeln!(
            w,
            r#"<?xml version="1.0" encoding="utf-8" ?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg version="1.1" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" style="background: none;">
    <title>{}</title>
    <desc>Circular elevation profile.</desc>"#,
            width, height, config.heading_text
        )?;

        // inner circle with the center emblem on top of it
        let inner = self.geometry.inner_radius();
        write_xml!(w,
            <circle cx={cx} cy={cy} r={inner + config.line_size}
                stroke="black" stroke-width={config.line_size} />)?;
        write_xml!(w,
            <image href={config.center_image_path.display()}
                x={cx - inner} y={cy - inner}
                width={2.0 * inner} height={2.0 * inner} />)?;

        let vertices = decimate(&self.points, PATH_VERTEX_TARGET);
        Path::from_vertices(&vertices).write_svg_fragment_to(
            w,
            &config.line_color,
            config.line_size,
        )?;

        for stop in &self.stops {
            stop.write_svg_fragment_to(w, config)?;
        }

        self.write_arc_text_to(w)?;

        writeln!(w, "</svg>")
    }

    fn write_arc_text_to(&self, w: &mut dyn io::Write) -> io::Result<()> {
        let config = self.config;
        let (cx, cy) = self.geometry.center();
        let radius = self.geometry.text_radius();

        write_xml!(w, <defs>)?;
        write_xml!(w,
            <path d={circle_path_d(cx, cy, radius, true)} id="headingPath" fill="none" />)?;
        write_xml!(w,
            <path d={circle_path_d(cx, cy, radius, false)} id="footerPath" fill="none" />)?;
        write_xml!(w, </defs>)?;

        write_xml!(w,
            <text fill={&config.heading_color} font-size={config.heading_font_size}
                font-weight="bold" font-family={&config.font_family}>
                <textPath href="#headingPath" startOffset={config.heading_rotation}>
                    {&config.heading_text}
                </textPath>
            </text>)?;
        write_xml!(w,
            <text fill={&config.footer_color} font-size={config.footer_font_size}
                font-weight="bold" font-family={&config.font_family} style="text-anchor:middle">
                <textPath href="#footerPath" startOffset={config.footer_rotation}>
                    {&config.footer_text}
                </textPath>
            </text>)
    }
}

impl<'s> StopMarker<'s> {
    fn write_svg_fragment_to(&self, w: &mut dyn io::Write, config: &Config) -> io::Result<()> {
        let meta = self.meta;
        let offset = 5.0 * config.line_size;
        let text_x = self.x + offset * meta.angle.to_radians().cos();
        let text_y = self.y + offset * meta.angle.to_radians().sin();
        // flipped text reads right-side-up and anchors away from the path
        let (rotation, anchor) = if meta.invert_text {
            (meta.angle + 180.0, "end")
        } else {
            (meta.angle, "start")
        };

        write_xml!(w,
            <circle cx={Pixels::new(self.x)} cy={Pixels::new(self.y)} r={3.0 * config.line_size}
                fill="white" stroke="black" stroke-width={config.line_size} />)?;
        write_xml!(w,
            <text x={Pixels::new(text_x)} y={Pixels::new(text_y)}
                font-size={6.0 * config.line_size}
                fill={&config.stop_text_color}
                font-family={&config.font_family}
                text-anchor={anchor}
                transform={format!("rotate({rotation},{text_x},{text_y})")}>
                {&meta.display_name}
            </text>)
    }
}

/// Full-circle path data for text to follow: two half-circle arcs,
/// starting at the right of the circle when clockwise and at the left
/// otherwise.
fn circle_path_d(cx: f64, cy: f64, radius: f64, clockwise: bool) -> String {
    let diameter = radius * 2.0;
    if clockwise {
        format!(
            "M{cx},{cy} m {radius},0 \
             a {radius},{radius} 0 1,1 -{diameter},0 \
             a {radius},{radius} 0 1,1 {diameter},0"
        )
    } else {
        format!(
            "M{cx},{cy} m -{radius},0 \
             a {radius},{radius} 0 1,0 {diameter},0 \
             a {radius},{radius} 0 1,0 -{diameter},0"
        )
    }
}
