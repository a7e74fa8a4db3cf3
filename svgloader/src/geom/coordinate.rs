/// Affine matrix in the `[a b 0; c d 0; e f 1]` row-vector layout:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Matrix { a, b, c, d, e, f }
    }

    /// Composes `self` followed by `right`.
    pub fn transform(&self, right: &Matrix) -> Matrix {
        let a = self.a * right.a + self.b * right.c;
        let b = self.a * right.b + self.b * right.d;
        let c = self.c * right.a + self.d * right.c;
        let d = self.c * right.b + self.d * right.d;
        let e = self.e * right.a + self.f * right.c + right.e;
        let f = self.e * right.b + self.f * right.d + right.f;
        Matrix { a, b, c, d, e, f }
    }

    pub fn new_translation_matrix(e: f64, f: f64) -> Matrix {
        Matrix::new(1.0, 0.0, 0.0, 1.0, e, f)
    }

    pub fn new_scale_matrix(sx: f64, sy: f64) -> Matrix {
        Matrix::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn transform(&self, matrix: &Matrix) -> Point {
        let x = matrix.a * self.x + matrix.c * self.y + matrix.e;
        let y = matrix.b * self.x + matrix.d * self.y + matrix.f;
        Point { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn reflect(&self, other: &Point) -> Point {
        Point::new(2.0 * self.x - other.x, 2.0 * self.y - other.y)
    }
}
