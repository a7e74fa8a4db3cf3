use std::path::{Path as FilePath, PathBuf};

use log::{debug, info};

use crate::device::{Device, Patch};
use crate::error::{LoaderError, Result};
use crate::geom::{bbox::BoundingBox, coordinate::Matrix, fit::derive_fit_transform, path::Path};
use crate::loader::{config::LoaderConfig, table::Table, DataSource};
use crate::svg::SvgDocument;

pub const BUNDLED_SVG_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/svgs");

const PLACEHOLDER_COLUMN: &str = "bogus";
const TIME_COLUMN: &str = "svgx";

/// Uses `file_ref` when it exists, otherwise the file with the same name in `asset_dir`.
pub fn resolve_svg_path(
    file_ref: impl AsRef<FilePath>,
    asset_dir: impl AsRef<FilePath>,
) -> Result<PathBuf> {
    let file_ref = file_ref.as_ref();
    if file_ref.exists() {
        return Ok(file_ref.to_path_buf());
    }
    let not_found = || LoaderError::NotFound(file_ref.display().to_string());
    let file_name = file_ref.file_name().ok_or_else(not_found)?;
    let bundled = asset_dir.as_ref().join(file_name);
    if !bundled.exists() {
        return Err(not_found());
    }
    debug!(
        "{} not found, using bundled {}",
        file_ref.display(),
        bundled.display()
    );
    Ok(bundled)
}

/// Draws the outlines of every `<path>` in an svg file.
#[derive(Debug)]
pub struct SvgLoader {
    filename: PathBuf,
    config: LoaderConfig,
    paths: Option<Vec<Path>>,
}

impl SvgLoader {
    pub fn new(file_ref: impl AsRef<FilePath>, config: LoaderConfig) -> Result<Self> {
        Self::with_asset_dir(file_ref, BUNDLED_SVG_DIR, config)
    }

    pub fn with_asset_dir(
        file_ref: impl AsRef<FilePath>,
        asset_dir: impl AsRef<FilePath>,
        config: LoaderConfig,
    ) -> Result<Self> {
        let filename = resolve_svg_path(file_ref, asset_dir)?;
        Ok(SvgLoader {
            filename,
            config,
            paths: None,
        })
    }

    pub fn filename(&self) -> &FilePath {
        self.filename.as_path()
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn paths(&self) -> Result<&[Path]> {
        self.paths.as_deref().ok_or(LoaderError::NotOpened)
    }

    pub fn natural_bounding_box(&self) -> Result<Option<BoundingBox>> {
        Ok(self
            .paths()?
            .iter()
            .filter_map(Path::extents)
            .reduce(|acc, b| acc.union(&b)))
    }

    pub fn fit_transform(&self) -> Result<Option<Matrix>> {
        let Some(target) = self.config.transform_to_box() else {
            return Ok(None);
        };
        match self.natural_bounding_box()? {
            Some(natural) => Ok(Some(derive_fit_transform(&natural, target)?)),
            None => Ok(None),
        }
    }

    pub fn drawn_bounding_box(&self) -> Result<Option<BoundingBox>> {
        let natural = self.natural_bounding_box()?;
        match (natural, self.config.transform_to_box()) {
            (Some(_), Some(target)) => Ok(Some(*target)),
            (natural, _) => Ok(natural),
        }
    }
}

impl DataSource for SvgLoader {
    fn open(&mut self) -> Result<()> {
        let doc = SvgDocument::from_file(&self.filename)?;
        let paths = doc.paths()?;
        info!(
            "loaded {} paths from {}",
            paths.len(),
            self.filename.display()
        );
        self.paths = Some(paths);
        Ok(())
    }

    fn draw(&self, device: &mut dyn Device) -> Result<()> {
        let paths = self.paths()?;
        let fit = self.fit_transform()?;
        let view = device.view_transform();
        for path in paths {
            let path = match &fit {
                Some(m) => path.transformed(m),
                None => path.clone(),
            };
            device.add_patch(Patch::outline(path, self.config.alpha(), view))?;
        }
        Ok(())
    }

    fn gather(&self, _x_ident: &[String], _y_ident: &[String], _animate: bool) -> Result<Table> {
        Ok(Table::new()
            .with_column("svgx", vec![0.0, 1.0])
            .with_column("svgy", vec![0.0, 3.0]))
    }

    fn find_column_identifier(&self, _column_name: &str) -> Vec<String> {
        vec![PLACEHOLDER_COLUMN.to_string()]
    }

    fn find_column_timestamp_identifier(
        &self,
        _column_name: &str,
        _matching: &str,
    ) -> Vec<String> {
        vec![PLACEHOLDER_COLUMN.to_string()]
    }

    fn gather_next_datasets(&mut self) -> Result<()> {
        Ok(())
    }

    fn get_default_time_column(&self) -> &str {
        TIME_COLUMN
    }

    fn animate_only(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::device::trace::TraceDevice;
    use crate::geom::coordinate::Point;

    fn peek_filename(name: &str) -> PathBuf {
        let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        d.push(format!("tests/resources/{}", name));
        d
    }

    fn open_loader(name: &str, config: LoaderConfig) -> SvgLoader {
        let mut loader = SvgLoader::new(peek_filename(name), config).unwrap();
        loader.open().unwrap();
        loader
    }

    #[test]
    fn test_path_count() {
        let loader = open_loader("three_paths.svg", LoaderConfig::default());
        assert_eq!(loader.paths().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_svg() {
        let loader = open_loader("empty.svg", LoaderConfig::default());
        assert!(loader.paths().unwrap().is_empty());
        assert_eq!(loader.natural_bounding_box().unwrap(), None);

        // no geometry, nothing to fit and nothing drawn
        let config = LoaderConfig::default().with_transform_to_box(0.0, 0.0, 1.0, 1.0);
        let loader = open_loader("empty.svg", config);
        let mut device = TraceDevice::new();
        loader.draw(&mut device).unwrap();
        assert!(device.patches().is_empty());
    }

    #[test]
    fn test_line_bounding_box() {
        let loader = open_loader("line.svg", LoaderConfig::default());
        assert_eq!(
            loader.natural_bounding_box().unwrap(),
            Some(BoundingBox::new(0.0, 0.0, 10.0, 0.0))
        );
    }

    #[test]
    fn test_line_cannot_be_fitted() {
        let config = LoaderConfig::default().with_transform_to_box(0.0, 0.0, 10.0, 10.0);
        let loader = open_loader("line.svg", config);
        let mut device = TraceDevice::new();
        let err = loader.draw(&mut device).unwrap_err();
        assert!(matches!(err, LoaderError::DegenerateGeometry(_)));
        assert!(device.patches().is_empty());
    }

    #[test]
    fn test_curve_extents_include_bulge() {
        let loader = open_loader("curves.svg", LoaderConfig::default());
        let bbox = loader.natural_bounding_box().unwrap().unwrap();
        assert_eq!(bbox.xmin(), 0.0);
        assert_eq!(bbox.xmax(), 3.0);
        assert_eq!(bbox.ymin(), 0.0);
        assert_eq!(bbox.ymax(), 3.0);
    }

    #[test]
    fn test_draw_untransformed() {
        let loader = open_loader("three_paths.svg", LoaderConfig::default());
        let view = Matrix::new_scale_matrix(1.0, -1.0);
        let mut device = TraceDevice::with_view_transform(view);
        loader.draw(&mut device).unwrap();

        let patches = device.patches();
        assert_eq!(patches.len(), 3);
        for (patch, path) in patches.iter().zip(loader.paths().unwrap()) {
            assert_eq!(&patch.path, path);
            assert!(!patch.fill);
            assert_eq!(patch.alpha, 0.2);
            assert_eq!(patch.transform, view);
        }
    }

    #[test]
    fn test_draw_fits_target_box() {
        let config = LoaderConfig::default()
            .with_transform_to_box(100.0, 100.0, 10.0, 20.0)
            .with_alpha(0.6)
            .unwrap();
        let loader = open_loader("rect.svg", config);
        assert_eq!(
            loader.natural_bounding_box().unwrap(),
            Some(BoundingBox::new(0.0, 0.0, 2.0, 4.0))
        );
        let m = loader.fit_transform().unwrap().unwrap();
        assert_eq!(Point::new(1.0, 2.0).transform(&m), Point::new(105.0, 110.0));

        let mut device = TraceDevice::new();
        loader.draw(&mut device).unwrap();
        let patch = &device.patches()[0];
        assert_eq!(patch.alpha, 0.6);
        assert_eq!(
            patch.path.extents(),
            Some(BoundingBox::new(100.0, 100.0, 110.0, 120.0))
        );
        assert_eq!(
            loader.drawn_bounding_box().unwrap(),
            Some(BoundingBox::new(100.0, 100.0, 110.0, 120.0))
        );
    }

    #[test]
    fn test_draw_is_idempotent() {
        let config = LoaderConfig::default().with_transform_to_box(-5.0, 3.0, 7.0, 2.0);
        let loader = open_loader("three_paths.svg", config);
        let mut first = TraceDevice::new();
        let mut second = TraceDevice::new();
        loader.draw(&mut first).unwrap();
        loader.draw(&mut second).unwrap();
        assert_eq!(first.patches(), second.patches());
        assert_eq!(first.content(), second.content());
    }

    #[test]
    fn test_bundled_fallback() {
        let mut loader = SvgLoader::new("field.svg", LoaderConfig::default()).unwrap();
        let bundled = FilePath::new(BUNDLED_SVG_DIR).join("field.svg");
        assert_eq!(loader.filename(), bundled.as_path());
        loader.open().unwrap();
        assert_eq!(loader.paths().unwrap().len(), 5);
        assert_eq!(
            loader.natural_bounding_box().unwrap(),
            Some(BoundingBox::new(0.0, 0.0, 648.0, 324.0))
        );

        // a directory that does not exist still resolves by base name
        let loader = SvgLoader::new("/no/such/dir/field.svg", LoaderConfig::default()).unwrap();
        assert!(loader.filename().starts_with(BUNDLED_SVG_DIR));
    }

    #[test]
    fn test_existing_file_preferred_over_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("field.svg");
        fs::write(&local, r#"<svg><path d="M0 0 L1 1"/></svg>"#).unwrap();
        let mut loader = SvgLoader::new(&local, LoaderConfig::default()).unwrap();
        assert_eq!(loader.filename(), local.as_path());
        loader.open().unwrap();
        assert_eq!(loader.paths().unwrap().len(), 1);
    }

    #[test]
    fn test_not_found() {
        let err = SvgLoader::new("no_such_drawing.svg", LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));

        let dir = tempfile::tempdir().unwrap();
        let err = SvgLoader::with_asset_dir("field.svg", dir.path(), LoaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn test_open_errors() {
        let mut loader =
            SvgLoader::new(peek_filename("malformed.svg"), LoaderConfig::default()).unwrap();
        assert!(matches!(loader.open(), Err(LoaderError::Parse(_))));
        assert!(matches!(loader.paths(), Err(LoaderError::NotOpened)));

        let mut loader =
            SvgLoader::new(peek_filename("bad_path.svg"), LoaderConfig::default()).unwrap();
        assert!(matches!(loader.open(), Err(LoaderError::Geometry(_))));
        assert!(matches!(loader.paths(), Err(LoaderError::NotOpened)));
    }

    #[test]
    fn test_non_utf8_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("binary.svg");
        fs::write(&file, b"<svg>\xFF\xFE<path d=\"M0 0 L1 1\"/></svg>").unwrap();
        let mut loader = SvgLoader::new(&file, LoaderConfig::default()).unwrap();
        assert!(matches!(loader.open(), Err(LoaderError::Parse(_))));
        assert!(matches!(loader.paths(), Err(LoaderError::NotOpened)));
    }

    #[test]
    fn test_latin1_declared_file_opens() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("latin1.svg");
        let bytes: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\
            <svg><!-- caf\xE9 --><path d=\"M0 0 L1 1\"/></svg>";
        fs::write(&file, bytes).unwrap();
        let mut loader = SvgLoader::new(&file, LoaderConfig::default()).unwrap();
        loader.open().unwrap();
        assert_eq!(loader.paths().unwrap().len(), 1);
    }

    #[test]
    fn test_loader_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SvgLoader>();
    }

    #[test]
    fn test_draw_before_open() {
        let loader = SvgLoader::new(peek_filename("rect.svg"), LoaderConfig::default()).unwrap();
        let mut device = TraceDevice::new();
        assert!(matches!(
            loader.draw(&mut device),
            Err(LoaderError::NotOpened)
        ));
    }

    #[test]
    fn test_contract_stubs() {
        let mut loader = open_loader("rect.svg", LoaderConfig::default());
        assert!(!loader.animate_only());
        assert_eq!(loader.get_default_time_column(), "svgx");
        assert_eq!(loader.find_column_identifier("anything"), vec!["bogus"]);
        assert_eq!(
            loader.find_column_timestamp_identifier("anything", "timestamp"),
            vec!["bogus"]
        );
        loader.gather_next_datasets().unwrap();
        let table = loader.gather(&[], &[], false).unwrap();
        assert_eq!(table.column("svgx"), Some(&[0.0, 1.0][..]));
        assert_eq!(table.column("svgy"), Some(&[0.0, 3.0][..]));
    }

    #[test]
    fn test_boxed_data_source() {
        let mut sources: Vec<Box<dyn DataSource>> = vec![Box::new(
            SvgLoader::new(peek_filename("three_paths.svg"), LoaderConfig::default()).unwrap(),
        )];
        let mut device = TraceDevice::new();
        for source in sources.iter_mut() {
            source.open().unwrap();
            source.draw(&mut device).unwrap();
        }
        assert_eq!(device.patches().len(), 3);
    }
}
