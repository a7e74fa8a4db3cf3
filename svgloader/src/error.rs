use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to find svg file: '{0}'")]
    NotFound(String),

    #[error("IO:{msg}")]
    Io { source: io::Error, msg: String },

    #[error("SVG parse error: '{0}'")]
    Parse(String),

    #[error("Path data error: '{0}'")]
    Geometry(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Loader has not been opened")]
    NotOpened,

    #[error("Device error: {0}")]
    Device(String),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
