use std::path::PathBuf;

use cairo_render::cairo_device::CairoDevice;
use clap::Parser;
use log::info;

use svgloader::error::Result;
use svgloader::loader::{DataSource, SvgLoader};

#[derive(Debug, Parser)]
pub struct Config {
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: i32,

    #[arg(long, default_value_t = 600)]
    height: i32,

    /// stroke width in pixels
    #[arg(long, default_value_t = 1.0)]
    line_width: f64,
}

pub fn command(loader: &SvgLoader, cfg: Config) -> Result<()> {
    let data_box = loader.drawn_bounding_box()?;
    let mut device = CairoDevice::new(cfg.width, cfg.height, data_box.as_ref())?;
    device.set_line_width(cfg.line_width);
    loader.draw(&mut device)?;

    let outname = cfg.output.unwrap_or(PathBuf::from("svgrender.png"));
    device.save(&outname)?;
    info!("wrote {}", outname.display());
    Ok(())
}
