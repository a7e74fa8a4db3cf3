use crate::geom::{
    bbox::BoundingBox,
    bezier::{BezierCubic, BezierQuad},
    coordinate::{Matrix, Point},
    sub_path::{PathSegment, SubPath},
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Path {
    current: Point,
    sub_paths: Vec<SubPath>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Point) {
        self.current = point;
        self.sub_paths.push(SubPath::new(point));
    }

    pub fn line_to(&mut self, target: Point) {
        self.open_sub_path().add_segment(PathSegment::LineTo(target));
        self.current = target;
    }

    pub fn quad_to(&mut self, control: Point, end: Point) {
        let curve = BezierQuad::new(self.current, control, end);
        self.open_sub_path().add_segment(PathSegment::Curve3(curve));
        self.current = end;
    }

    pub fn curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.push_cubic(BezierCubic::new(self.current, control1, control2, end));
    }

    pub fn push_cubic(&mut self, curve: BezierCubic) {
        let end = curve.p3;
        self.open_sub_path().add_segment(PathSegment::Curve4(curve));
        self.current = end;
    }

    pub fn close_last_subpath(&mut self) {
        if let Some(sub) = self.sub_paths.last_mut() {
            sub.close();
            if let Some(start) = sub.start_point() {
                self.current = *start;
            }
        }
    }

    pub fn current_point(&self) -> &Point {
        &self.current
    }

    pub fn sub_paths(&self) -> &[SubPath] {
        self.sub_paths.as_slice()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.sub_paths.iter().flat_map(|s| s.segments().iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sub_paths.is_empty()
    }

    pub fn extents(&self) -> Option<BoundingBox> {
        self.sub_paths
            .iter()
            .filter_map(SubPath::extents)
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn transformed(&self, matrix: &Matrix) -> Path {
        Path {
            current: self.current.transform(matrix),
            sub_paths: self.sub_paths.iter().map(|s| s.transform(matrix)).collect(),
        }
    }

    // a drawing command after a close (or before any move) starts at the current point
    fn open_sub_path(&mut self) -> &mut SubPath {
        let needs_new = match self.sub_paths.last() {
            Some(sub) => sub.is_closed(),
            None => true,
        };
        if needs_new {
            self.sub_paths.push(SubPath::new(self.current));
        }
        let last = self.sub_paths.len() - 1;
        &mut self.sub_paths[last]
    }
}
