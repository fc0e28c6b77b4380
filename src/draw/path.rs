use std::fmt;
use std::io;

use super::geometry::{Pixels, RadialPoint};
use crate::write_xml;

/// Keeps every `stride`-th vertex where stride = max(1, n / target), so
/// the output count stays near `target` however long the series is.
/// Index 0 always survives. Straight segments only, no curve fitting.
pub fn decimate(points: &[RadialPoint], target: usize) -> Vec<RadialPoint> {
    let stride = points.len().checked_div(target).unwrap_or(0).max(1);
    points.iter().copied().step_by(stride).collect()
}

pub enum PathTo {
    Move(Pixels, Pixels),
    Line(Pixels, Pixels),
}

/// An ordered sequence of straight path segments, serialized into SVG
/// path data on display.
pub struct Path {
    ops: Vec<PathTo>,
}

impl Path {
    /// The first vertex opens the path, every later vertex extends it
    /// with a line segment.
    pub fn from_vertices(vertices: &[RadialPoint]) -> Self {
        let ops = vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| {
                if index == 0 {
                    PathTo::Move(vertex.x, vertex.y)
                } else {
                    PathTo::Line(vertex.x, vertex.y)
                }
            })
            .collect();
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn write_svg_fragment_to(
        &self,
        w: &mut dyn io::Write,
        stroke: &str,
        line_width: f64,
    ) -> io::Result<()> {
        write_xml!(w,
            <path stroke-width={line_width} stroke={stroke} fill="none" d={self} />)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            match op {
                PathTo::Move(x, y) => write!(f, "M{x},{y} ")?,
                PathTo::Line(x, y) => write!(f, "L{x},{y} ")?,
            }
        }
        Ok(())
    }
}
