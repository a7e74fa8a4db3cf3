pub mod bbox;
pub mod bezier;
pub mod coordinate;
pub mod fit;
pub mod path;
pub mod sub_path;

pub(crate) mod arc;
