use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::{error, info};

use svgloader::error::{LoaderError, Result};
use svgloader::loader::{DataSource, LoaderConfig, SvgLoader};
mod commands;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, value_name = "FILE")]
    filename: PathBuf,

    /// json object with `transform_to_box` and `alpha`
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// fit the outlines into x,y,w,h
    #[arg(long = "box", value_delimiter = ',', allow_hyphen_values = true)]
    target_box: Option<Vec<f64>>,

    #[arg(short, long)]
    alpha: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Bbox(commands::bbox::Config),
    Trace(commands::trace::Config),
    Render(commands::render::Config),
}

fn loader_config(cli: &Cli) -> Result<LoaderConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| LoaderError::Io {
                source: e,
                msg: format!("Failed to read config {}", path.display()),
            })?;
            LoaderConfig::from_json(&text)?
        }
        None => LoaderConfig::default(),
    };
    if let Some(b) = &cli.target_box {
        if b.len() != 4 {
            return Err(LoaderError::Config(format!(
                "--box needs x,y,w,h, got {} values",
                b.len()
            )));
        }
        config = config.with_transform_to_box(b[0], b[1], b[2], b[3]);
    }
    if let Some(alpha) = cli.alpha {
        config = config.with_alpha(alpha)?;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = loader_config(&cli)?;
    let mut loader = SvgLoader::new(&cli.filename, config)?;
    loader.open()?;
    info!("Process {:?}", loader.filename().display());

    match cli.command {
        Commands::Bbox(cfg) => commands::bbox::command(&loader, cfg),
        Commands::Trace(cfg) => commands::trace::command(&loader, cfg),
        Commands::Render(cfg) => commands::render::command(&loader, cfg),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("svgtools: {}", e);
        process::exit(1);
    }
}
