use log::trace;
use svgtypes::{PathParser, PathSegment as SvgSegment};

use crate::error::{LoaderError, Result};
use crate::geom::{
    arc::{arc_to_cubics, Arc},
    coordinate::Point,
    path::Path,
};

#[derive(Debug, Clone, Copy)]
enum LastControl {
    None,
    Cubic(Point),
    Quad(Point),
}

struct PathBuilder {
    path: Path,
    last_control: LastControl,
}

impl PathBuilder {
    fn new() -> Self {
        PathBuilder {
            path: Path::new(),
            last_control: LastControl::None,
        }
    }

    fn current(&self) -> Point {
        *self.path.current_point()
    }

    fn resolve(&self, abs: bool, x: f64, y: f64) -> Point {
        if abs {
            Point::new(x, y)
        } else {
            let c = self.current();
            Point::new(c.x() + x, c.y() + y)
        }
    }

    fn apply(&mut self, segment: SvgSegment) {
        let mut next_control = LastControl::None;
        match segment {
            SvgSegment::MoveTo { abs, x, y } => {
                let p = self.resolve(abs, x, y);
                self.path.move_to(p);
            }
            SvgSegment::LineTo { abs, x, y } => {
                let p = self.resolve(abs, x, y);
                self.path.line_to(p);
            }
            SvgSegment::HorizontalLineTo { abs, x } => {
                let c = self.current();
                let x = if abs { x } else { c.x() + x };
                self.path.line_to(Point::new(x, c.y()));
            }
            SvgSegment::VerticalLineTo { abs, y } => {
                let c = self.current();
                let y = if abs { y } else { c.y() + y };
                self.path.line_to(Point::new(c.x(), y));
            }
            SvgSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let c1 = self.resolve(abs, x1, y1);
                let c2 = self.resolve(abs, x2, y2);
                let end = self.resolve(abs, x, y);
                self.path.curve_to(c1, c2, end);
                next_control = LastControl::Cubic(c2);
            }
            SvgSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let current = self.current();
                let c1 = match self.last_control {
                    LastControl::Cubic(prev) => current.reflect(&prev),
                    _ => current,
                };
                let c2 = self.resolve(abs, x2, y2);
                let end = self.resolve(abs, x, y);
                self.path.curve_to(c1, c2, end);
                next_control = LastControl::Cubic(c2);
            }
            SvgSegment::Quadratic { abs, x1, y1, x, y } => {
                let control = self.resolve(abs, x1, y1);
                let end = self.resolve(abs, x, y);
                self.path.quad_to(control, end);
                next_control = LastControl::Quad(control);
            }
            SvgSegment::SmoothQuadratic { abs, x, y } => {
                let current = self.current();
                let control = match self.last_control {
                    LastControl::Quad(prev) => current.reflect(&prev),
                    _ => current,
                };
                let end = self.resolve(abs, x, y);
                self.path.quad_to(control, end);
                next_control = LastControl::Quad(control);
            }
            SvgSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let from = self.current();
                let to = self.resolve(abs, x, y);
                let arc = Arc {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                };
                match arc_to_cubics(from, &arc, to) {
                    Some(curves) => {
                        for curve in curves {
                            self.path.push_cubic(curve);
                        }
                    }
                    None => self.path.line_to(to),
                }
            }
            SvgSegment::ClosePath { .. } => {
                self.path.close_last_subpath();
            }
        }
        self.last_control = next_control;
    }
}

/// Parses the contents of a `d` attribute into an absolute [`Path`].
///
/// Relative commands are resolved against the current point, smooth curves
/// reflect the previous control point and arcs become cubic curves.
pub fn parse_path_data(data: &str) -> Result<Path> {
    let mut builder = PathBuilder::new();
    for segment in PathParser::from(data) {
        let segment = segment.map_err(|e| {
            LoaderError::Geometry(format!("{} in path data {:?}", e, truncate(data)))
        })?;
        trace!("path segment: {:?}", segment);
        builder.apply(segment);
    }
    Ok(builder.path)
}

fn truncate(data: &str) -> String {
    const LIMIT: usize = 64;
    match data.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &data[..idx]),
        None => data.to_string(),
    }
}
