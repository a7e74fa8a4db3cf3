use std::fs::File;
use std::path::Path as FilePath;

use cairo::{Context, Format, ImageSurface};
use log::debug;
use svgloader::{
    device::{Device, Patch},
    error::{LoaderError, Result},
    geom::{bbox::BoundingBox, coordinate::Matrix, path::Path, sub_path::PathSegment},
};

const MARGIN: f64 = 10.0;

fn device_error(e: impl std::fmt::Display) -> LoaderError {
    LoaderError::Device(e.to_string())
}

/// Strokes patch outlines onto an ARGB image, y axis pointing up.
pub struct CairoDevice {
    surface: ImageSurface,
    context: Context,
    view: Matrix,
    line_width: f64,
}

impl CairoDevice {
    pub fn new(width: i32, height: i32, data_box: Option<&BoundingBox>) -> Result<Self> {
        let surface = ImageSurface::create(Format::ARgb32, width, height).map_err(device_error)?;
        let context = Context::new(&surface).map_err(device_error)?;
        context.set_source_rgba(1.0, 1.0, 1.0, 1.0);
        context.paint().map_err(device_error)?;
        let view = view_matrix(width as f64, height as f64, data_box);
        debug!("cairo device {}x{} view {:?}", width, height, view);
        Ok(CairoDevice {
            surface,
            context,
            view,
            line_width: 1.0,
        })
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    pub fn save(&self, path: impl AsRef<FilePath>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|e| LoaderError::Io {
            source: e,
            msg: format!("Failed to create {}", path.display()),
        })?;
        self.surface.write_to_png(&mut file).map_err(device_error)?;
        Ok(())
    }

    fn set_matrix(&self, m: &Matrix) {
        self.context
            .set_matrix(cairo::Matrix::new(m.a, m.b, m.c, m.d, m.e, m.f));
    }

    fn append_path(&self, path: &Path) {
        for sub in path.sub_paths() {
            for seg in sub.segments() {
                match seg {
                    PathSegment::MoveTo(p) => self.context.move_to(p.x(), p.y()),
                    PathSegment::LineTo(p) => self.context.line_to(p.x(), p.y()),
                    PathSegment::Curve3(c3) => {
                        let c = c3.to_cubic();
                        self.context
                            .curve_to(c.p1.x(), c.p1.y(), c.p2.x(), c.p2.y(), c.p3.x(), c.p3.y());
                    }
                    PathSegment::Curve4(c) => {
                        self.context
                            .curve_to(c.p1.x(), c.p1.y(), c.p2.x(), c.p2.y(), c.p3.x(), c.p3.y());
                    }
                    PathSegment::Closed => self.context.close_path(),
                }
            }
        }
    }
}

// data box onto the surface minus a margin, flipping y
fn view_matrix(width: f64, height: f64, data_box: Option<&BoundingBox>) -> Matrix {
    let Some(bbox) = data_box else {
        return Matrix::new(1.0, 0.0, 0.0, -1.0, 0.0, height);
    };
    let scale = |extent: f64, pixels: f64| {
        let usable = (pixels - 2.0 * MARGIN).max(1.0);
        if extent > 0.0 {
            usable / extent
        } else {
            1.0
        }
    };
    let sx = scale(bbox.width(), width);
    let sy = scale(bbox.height(), height);
    Matrix::new(
        sx,
        0.0,
        0.0,
        -sy,
        MARGIN - bbox.xmin() * sx,
        height - MARGIN + bbox.ymin() * sy,
    )
}

impl Device for CairoDevice {
    fn view_transform(&self) -> Matrix {
        self.view
    }

    fn add_patch(&mut self, patch: Patch) -> Result<()> {
        self.context.save().map_err(device_error)?;
        self.context.new_path();
        self.set_matrix(&patch.transform);
        self.append_path(&patch.path);
        self.context.identity_matrix();
        self.context.set_source_rgba(0.0, 0.0, 0.0, patch.alpha);
        self.context.set_line_width(self.line_width);
        if patch.fill {
            self.context.fill_preserve().map_err(device_error)?;
        }
        self.context.stroke().map_err(device_error)?;
        self.context.restore().map_err(device_error)?;
        Ok(())
    }
}
