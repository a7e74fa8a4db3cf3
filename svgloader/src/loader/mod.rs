pub mod config;
pub mod svg;
pub mod table;

pub use config::LoaderConfig;
pub use svg::SvgLoader;
pub use table::Table;

use crate::device::Device;
use crate::error::Result;

/// Methods the plotting framework calls on every data source.
pub trait DataSource {
    /// Reads the underlying data; must be called before `draw` or `gather`.
    fn open(&mut self) -> Result<()>;

    fn draw(&self, device: &mut dyn Device) -> Result<()>;

    fn gather(&self, x_ident: &[String], y_ident: &[String], animate: bool) -> Result<Table>;

    fn find_column_identifier(&self, column_name: &str) -> Vec<String>;

    fn find_column_timestamp_identifier(&self, column_name: &str, matching: &str) -> Vec<String>;

    fn gather_next_datasets(&mut self) -> Result<()>;

    fn get_default_time_column(&self) -> &str;

    fn animate_only(&self) -> bool;
}
