use clap::Args;

use vigia_core::Surface;

use crate::OutputFormat;
use crate::config::VigiaConfig;

#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Client-space x of the click.
    #[arg(long)]
    pub x: f64,
    /// Client-space y of the click.
    #[arg(long)]
    pub y: f64,
    /// Map width in pixels.
    #[arg(long)]
    pub width: f64,
    /// Map height in pixels.
    #[arg(long)]
    pub height: f64,
    /// Client-space x of the map's left edge.
    #[arg(long, default_value_t = 0.0)]
    pub left: f64,
    /// Client-space y of the map's top edge.
    #[arg(long, default_value_t = 0.0)]
    pub top: f64,
}

impl LocateArgs {
    pub fn surface(&self) -> Surface {
        Surface {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
        }
    }
}

pub fn run(config: &VigiaConfig, args: &LocateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let surface = args.surface();
    let coords = config
        .map
        .bounds()
        .locate(&surface, surface.offset_of(args.x, args.y))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&coords)?);
        }
        OutputFormat::Text => {
            println!("Latitude:  {}", coords.latitude);
            println!("Longitude: {}", coords.longitude);
        }
    }
    Ok(())
}
