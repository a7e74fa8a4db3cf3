use clap::Parser;

use svgloader::error::Result;
use svgloader::loader::SvgLoader;

#[derive(Debug, Parser)]
pub struct Config {
    /// also print the box of every path
    #[arg(short, long)]
    pub(crate) each: bool,
}

pub fn command(loader: &SvgLoader, cfg: Config) -> Result<()> {
    let paths = loader.paths()?;
    println!("paths: {}", paths.len());
    if cfg.each {
        for (i, path) in paths.iter().enumerate() {
            match path.extents() {
                Some(b) => println!(
                    "  {}: {} {} {} {}",
                    i,
                    b.xmin(),
                    b.ymin(),
                    b.xmax(),
                    b.ymax()
                ),
                None => println!("  {}: empty", i),
            }
        }
    }
    match loader.natural_bounding_box()? {
        Some(b) => println!("bbox: {} {} {} {}", b.xmin(), b.ymin(), b.xmax(), b.ymax()),
        None => println!("bbox: empty"),
    }
    if let Some(m) = loader.fit_transform()? {
        println!(
            "fit transform: {} {} {} {} {} {}",
            m.a, m.b, m.c, m.d, m.e, m.f
        );
    }
    Ok(())
}
