pub mod document;
pub mod path_data;

pub use document::SvgDocument;
pub use path_data::parse_path_data;
