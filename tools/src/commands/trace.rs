use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use svgloader::device::trace::TraceDevice;
use svgloader::error::{LoaderError, Result};
use svgloader::loader::{DataSource, SvgLoader};

#[derive(Debug, Parser)]
pub struct Config {
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
}

pub fn command(loader: &SvgLoader, cfg: Config) -> Result<()> {
    let mut device = TraceDevice::new();
    loader.draw(&mut device)?;
    info!("traced {} patches", device.patches().len());

    let outname = cfg.output.unwrap_or(PathBuf::from("svgtrace.xml"));
    let io_error = |e| LoaderError::Io {
        source: e,
        msg: format!("Failed to write {}", outname.display()),
    };
    let mut file = File::create(&outname).map_err(io_error)?;
    file.write_all(device.content().as_bytes()).map_err(io_error)?;
    Ok(())
}
