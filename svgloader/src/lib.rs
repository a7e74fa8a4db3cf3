pub mod device;
pub mod error;
pub mod geom;
pub mod loader;
pub mod svg;
