use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geom::{bezier::BezierCubic, coordinate::Point};

#[derive(Debug, Clone, Copy)]
pub struct Arc {
    pub rx: f64,
    pub ry: f64,
    /// degrees
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Approximates the arc from `from` to `to` with cubic segments of at most 90 degrees.
///
/// Returns `None` when the arc degenerates to a straight line (a zero radius);
/// coincident end points produce an empty list.
pub fn arc_to_cubics(from: Point, arc: &Arc, to: Point) -> Option<Vec<BezierCubic>> {
    if from == to {
        return Some(Vec::new());
    }
    let mut rx = arc.rx.abs();
    let mut ry = arc.ry.abs();
    if rx == 0.0 || ry == 0.0 {
        return None;
    }

    let phi = arc.x_axis_rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let dx = (from.x() - to.x()) / 2.0;
    let dy = (from.y() - to.y()) / 2.0;
    let x1p = cos_phi * dx + sin_phi * dy;
    let y1p = -sin_phi * dx + cos_phi * dy;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let rx_sq = rx * rx;
    let ry_sq = ry * ry;
    let numer = (rx_sq * ry_sq - rx_sq * y1p * y1p - ry_sq * x1p * x1p).max(0.0);
    let denom = rx_sq * y1p * y1p + ry_sq * x1p * x1p;
    let coef = if denom > 0.0 {
        (numer / denom).sqrt()
    } else {
        0.0
    };
    let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
    let cxp = sign * coef * rx * y1p / ry;
    let cyp = -sign * coef * ry * x1p / rx;

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x() + to.x()) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y() + to.y()) / 2.0;

    let theta1 = vector_angle(1.0, 0.0, (x1p - cxp) / rx, (y1p - cyp) / ry);
    let mut dtheta = vector_angle(
        (x1p - cxp) / rx,
        (y1p - cyp) / ry,
        (-x1p - cxp) / rx,
        (-y1p - cyp) / ry,
    );
    if arc.sweep && dtheta < 0.0 {
        dtheta += TAU;
    } else if !arc.sweep && dtheta > 0.0 {
        dtheta -= TAU;
    }

    let count = ((dtheta.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let step = dtheta / count as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    // point and derivative on the rotated ellipse at angle t
    let at = |t: f64| -> (Point, Point) {
        let (sin_t, cos_t) = t.sin_cos();
        let p = Point::new(
            cx + rx * cos_phi * cos_t - ry * sin_phi * sin_t,
            cy + rx * sin_phi * cos_t + ry * cos_phi * sin_t,
        );
        let d = Point::new(
            -rx * cos_phi * sin_t - ry * sin_phi * cos_t,
            -rx * sin_phi * sin_t + ry * cos_phi * cos_t,
        );
        (p, d)
    };

    let mut curves = Vec::with_capacity(count);
    let mut start = from;
    for i in 0..count {
        let t1 = theta1 + i as f64 * step;
        let t2 = t1 + step;
        let (_, d1) = at(t1);
        let (p2, d2) = at(t2);
        let end = if i + 1 == count { to } else { p2 };
        let c1 = Point::new(start.x() + k * d1.x(), start.y() + k * d1.y());
        let c2 = Point::new(end.x() - k * d2.x(), end.y() - k * d2.y());
        curves.push(BezierCubic::new(start, c1, c2, end));
        start = end;
    }
    Some(curves)
}

fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let dot = ux * vx + uy * vy;
    let len = (ux * ux + uy * uy).sqrt() * (vx * vx + vy * vy).sqrt();
    let angle = (dot / len).clamp(-1.0, 1.0).acos();
    if ux * vy - uy * vx < 0.0 {
        -angle
    } else {
        angle
    }
}
