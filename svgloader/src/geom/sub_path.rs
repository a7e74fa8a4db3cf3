use crate::geom::{
    bbox::BoundingBox,
    bezier::{BezierCubic, BezierQuad},
    coordinate::{Matrix, Point},
};

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    Curve3(BezierQuad),
    Curve4(BezierCubic),
    Closed,
}

impl PathSegment {
    pub fn transform(&self, matrix: &Matrix) -> PathSegment {
        match self {
            PathSegment::MoveTo(p) => PathSegment::MoveTo(p.transform(matrix)),
            PathSegment::LineTo(p) => PathSegment::LineTo(p.transform(matrix)),
            PathSegment::Curve3(c) => PathSegment::Curve3(c.transform(matrix)),
            PathSegment::Curve4(c) => PathSegment::Curve4(c.transform(matrix)),
            PathSegment::Closed => PathSegment::Closed,
        }
    }

    pub fn extents(&self) -> Option<BoundingBox> {
        match self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(BoundingBox::from_point(p)),
            PathSegment::Curve3(c) => Some(c.extents()),
            PathSegment::Curve4(c) => Some(c.extents()),
            PathSegment::Closed => None,
        }
    }

    pub fn dump_xml(&self) -> String {
        match self {
            PathSegment::MoveTo(p) => format!("<move x=\"{}\" y=\"{}\" />\n", p.x(), p.y()),
            PathSegment::LineTo(p) => format!("<line x=\"{}\" y=\"{}\" />\n", p.x(), p.y()),
            PathSegment::Curve3(c) => format!(
                "<quad x1=\"{}\" y1=\"{}\" x=\"{}\" y=\"{}\" />\n",
                c.p1.x(),
                c.p1.y(),
                c.p2.x(),
                c.p2.y()
            ),
            PathSegment::Curve4(c) => format!(
                "<cubic x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" x=\"{}\" y=\"{}\" />\n",
                c.p1.x(),
                c.p1.y(),
                c.p2.x(),
                c.p2.y(),
                c.p3.x(),
                c.p3.y()
            ),
            PathSegment::Closed => "<close />\n".to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SubPath {
    segments: Vec<PathSegment>,
    is_closed: bool,
}

impl SubPath {
    pub fn new(point: Point) -> Self {
        SubPath {
            segments: vec![PathSegment::MoveTo(point)],
            is_closed: false,
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn close(&mut self) {
        if self.is_closed {
            return;
        }
        self.segments.push(PathSegment::Closed);
        self.is_closed = true;
    }

    pub fn add_segment(&mut self, seg: PathSegment) {
        self.segments.push(seg)
    }

    pub fn start_point(&self) -> Option<&Point> {
        match self.segments.first() {
            Some(PathSegment::MoveTo(p)) => Some(p),
            _ => None,
        }
    }

    pub fn extents(&self) -> Option<BoundingBox> {
        self.segments
            .iter()
            .filter_map(PathSegment::extents)
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn transform(&self, matrix: &Matrix) -> SubPath {
        SubPath {
            segments: self.segments.iter().map(|s| s.transform(matrix)).collect(),
            is_closed: self.is_closed,
        }
    }
}
