use crate::error::{LoaderError, Result};
use crate::geom::{bbox::BoundingBox, coordinate::Matrix};

pub fn transform_from(bbox: &BoundingBox) -> Result<Matrix> {
    check_extent("source", bbox)?;
    let sx = 1.0 / bbox.width();
    let sy = 1.0 / bbox.height();
    Ok(Matrix::new_translation_matrix(-bbox.xmin(), -bbox.ymin())
        .transform(&Matrix::new_scale_matrix(sx, sy)))
}

pub fn transform_to(bbox: &BoundingBox) -> Result<Matrix> {
    check_extent("target", bbox)?;
    Ok(Matrix::new_scale_matrix(bbox.width(), bbox.height())
        .transform(&Matrix::new_translation_matrix(bbox.xmin(), bbox.ymin())))
}

/// Affine map sending the corners of `natural` onto the corners of `target`.
///
/// The axes are scaled independently, so the aspect ratio of the geometry is
/// only kept when both boxes share it.
pub fn derive_fit_transform(natural: &BoundingBox, target: &BoundingBox) -> Result<Matrix> {
    let matrix = transform_from(natural)?.transform(&transform_to(target)?);
    if !matrix.is_finite() {
        return Err(LoaderError::DegenerateGeometry(format!(
            "fit transform from {:?} to {:?} is not finite",
            natural, target
        )));
    }
    Ok(matrix)
}

fn check_extent(which: &str, bbox: &BoundingBox) -> Result<()> {
    if bbox.is_degenerate() || !bbox.width().is_finite() || !bbox.height().is_finite() {
        return Err(LoaderError::DegenerateGeometry(format!(
            "{} box has no usable extent: width={} height={}",
            which,
            bbox.width(),
            bbox.height()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::coordinate::Point;

    #[test]
    fn test_center_maps_to_center() {
        let natural = BoundingBox::new(0.0, 0.0, 2.0, 4.0);
        let target = BoundingBox::from_bounds(100.0, 100.0, 10.0, 20.0);
        let m = derive_fit_transform(&natural, &target).unwrap();
        assert_eq!(Point::new(1.0, 2.0).transform(&m), Point::new(105.0, 110.0));
    }

    #[test]
    fn test_corners_map_to_corners() {
        let natural = BoundingBox::new(-3.0, 1.0, 5.0, 3.0);
        let target = BoundingBox::new(10.0, 10.0, 12.0, 30.0);
        let m = derive_fit_transform(&natural, &target).unwrap();
        let lower_left = Point::new(natural.xmin(), natural.ymin()).transform(&m);
        let upper_right = Point::new(natural.xmax(), natural.ymax()).transform(&m);
        assert_eq!(lower_left, Point::new(target.xmin(), target.ymin()));
        assert_eq!(upper_right, Point::new(target.xmax(), target.ymax()));
        assert_eq!(
            Point::new(natural.xmin(), natural.ymax()).transform(&m),
            Point::new(target.xmin(), target.ymax())
        );
        assert_eq!(
            Point::new(natural.xmax(), natural.ymin()).transform(&m),
            Point::new(target.xmax(), target.ymin())
        );
    }

    #[test]
    fn test_axes_scale_independently() {
        let natural = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let target = BoundingBox::new(0.0, 0.0, 4.0, 2.0);
        let m = derive_fit_transform(&natural, &target).unwrap();
        assert_eq!(m.a, 4.0);
        assert_eq!(m.d, 2.0);
    }

    #[test]
    fn test_zero_height_target_is_degenerate() {
        let natural = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        let target = BoundingBox::new(10.0, 20.0, 30.0, 20.0);
        let err = derive_fit_transform(&natural, &target).unwrap_err();
        assert!(matches!(err, LoaderError::DegenerateGeometry(_)));
    }

    #[test]
    fn test_zero_height_natural_is_degenerate() {
        let natural = BoundingBox::new(0.0, 0.0, 10.0, 0.0);
        let target = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let err = derive_fit_transform(&natural, &target).unwrap_err();
        assert!(matches!(err, LoaderError::DegenerateGeometry(_)));
    }

    #[test]
    fn test_overflowing_extent_rejected() {
        let natural = BoundingBox::new(-1e308, 0.0, 1e308, 1.0);
        assert!(natural.width().is_infinite());
        let target = BoundingBox::from_bounds(0.0, 0.0, 10.0, 10.0);
        assert!(matches!(
            derive_fit_transform(&natural, &target),
            Err(LoaderError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            derive_fit_transform(&target, &natural),
            Err(LoaderError::DegenerateGeometry(_))
        ));
    }
}
