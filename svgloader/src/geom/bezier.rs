use crate::geom::{
    bbox::BoundingBox,
    coordinate::{Matrix, Point},
};

const EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierQuad {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
}

impl BezierQuad {
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        BezierQuad { p0, p1, p2 }
    }

    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let x = mt * mt * self.p0.x() + 2.0 * mt * t * self.p1.x() + t * t * self.p2.x();
        let y = mt * mt * self.p0.y() + 2.0 * mt * t * self.p1.y() + t * t * self.p2.y();
        Point::new(x, y)
    }

    pub fn extents(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new(self.p0.x(), self.p0.y(), self.p2.x(), self.p2.y());
        let roots = [
            quad_extremum(self.p0.x(), self.p1.x(), self.p2.x()),
            quad_extremum(self.p0.y(), self.p1.y(), self.p2.y()),
        ];
        for t in roots.into_iter().flatten() {
            bbox.include_point(&self.eval(t));
        }
        bbox
    }

    pub fn transform(&self, matrix: &Matrix) -> BezierQuad {
        BezierQuad::new(
            self.p0.transform(matrix),
            self.p1.transform(matrix),
            self.p2.transform(matrix),
        )
    }

    pub fn to_cubic(&self) -> BezierCubic {
        let c1 = Point::new(
            self.p0.x() + 2.0 / 3.0 * (self.p1.x() - self.p0.x()),
            self.p0.y() + 2.0 / 3.0 * (self.p1.y() - self.p0.y()),
        );
        let c2 = Point::new(
            self.p2.x() + 2.0 / 3.0 * (self.p1.x() - self.p2.x()),
            self.p2.y() + 2.0 / 3.0 * (self.p1.y() - self.p2.y()),
        );
        BezierCubic::new(self.p0, c1, c2, self.p2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierCubic {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl BezierCubic {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        BezierCubic { p0, p1, p2, p3 }
    }

    pub fn eval(&self, t: f64) -> Point {
        Point::new(
            cubic_eval(self.p0.x(), self.p1.x(), self.p2.x(), self.p3.x(), t),
            cubic_eval(self.p0.y(), self.p1.y(), self.p2.y(), self.p3.y(), t),
        )
    }

    pub fn extents(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new(self.p0.x(), self.p0.y(), self.p3.x(), self.p3.y());
        let xs = cubic_extrema(self.p0.x(), self.p1.x(), self.p2.x(), self.p3.x());
        let ys = cubic_extrema(self.p0.y(), self.p1.y(), self.p2.y(), self.p3.y());
        for t in xs.into_iter().chain(ys).flatten() {
            bbox.include_point(&self.eval(t));
        }
        bbox
    }

    pub fn transform(&self, matrix: &Matrix) -> BezierCubic {
        BezierCubic::new(
            self.p0.transform(matrix),
            self.p1.transform(matrix),
            self.p2.transform(matrix),
            self.p3.transform(matrix),
        )
    }
}

fn in_open_unit(t: f64) -> Option<f64> {
    (t > 0.0 && t < 1.0).then_some(t)
}

fn quad_extremum(p0: f64, p1: f64, p2: f64) -> Option<f64> {
    let denom = p0 - 2.0 * p1 + p2;
    if denom.abs() <= EPSILON {
        return None;
    }
    in_open_unit((p0 - p1) / denom)
}

fn cubic_eval(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 3.0 * p0 - 6.0 * p1 + 3.0 * p2;
    let c = -3.0 * p0 + 3.0 * p1;
    ((a * t + b) * t + c) * t + p0
}

// roots of the derivative 3a t^2 + 2b t + c
fn cubic_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> [Option<f64>; 2] {
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 3.0 * p0 - 6.0 * p1 + 3.0 * p2;
    let c = -3.0 * p0 + 3.0 * p1;
    let qa = 3.0 * a;
    let qb = 2.0 * b;
    let qc = c;

    if qa.abs() <= EPSILON {
        if qb.abs() <= EPSILON {
            return [None, None];
        }
        return [in_open_unit(-qc / qb), None];
    }
    let disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        return [None, None];
    }
    let s = disc.sqrt();
    [
        in_open_unit((-qb + s) / (2.0 * qa)),
        in_open_unit((-qb - s) / (2.0 * qa)),
    ]
}
