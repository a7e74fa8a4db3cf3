pub mod trace;

use crate::error::Result;
use crate::geom::{coordinate::Matrix, path::Path};

#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub path: Path,
    pub fill: bool,
    pub alpha: f64,
    pub transform: Matrix,
}

impl Patch {
    pub fn outline(path: Path, alpha: f64, transform: Matrix) -> Self {
        Patch {
            path,
            fill: false,
            alpha,
            transform,
        }
    }
}

pub trait Device {
    fn view_transform(&self) -> Matrix;

    fn add_patch(&mut self, patch: Patch) -> Result<()>;
}
