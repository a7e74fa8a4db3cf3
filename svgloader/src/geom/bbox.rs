use crate::geom::coordinate::Point;

/// Axis aligned box stored by its corners, `xmin <= xmax` and `ymin <= ymax`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl BoundingBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        BoundingBox {
            xmin: x0.min(x1),
            ymin: y0.min(y1),
            xmax: x0.max(x1),
            ymax: y0.max(y1),
        }
    }

    /// Box with origin `(x, y)` and extent `(width, height)`.
    pub fn from_bounds(x: f64, y: f64, width: f64, height: f64) -> Self {
        BoundingBox::new(x, y, x + width, y + height)
    }

    pub fn from_point(point: &Point) -> Self {
        BoundingBox::new(point.x(), point.y(), point.x(), point.y())
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    pub fn include_point(&mut self, point: &Point) {
        self.xmin = self.xmin.min(point.x());
        self.ymin = self.ymin.min(point.y());
        self.xmax = self.xmax.max(point.x());
        self.ymax = self.ymax.max(point.y());
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }
}
