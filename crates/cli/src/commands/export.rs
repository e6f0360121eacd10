use std::path::PathBuf;

use clap::Args;
use tracing::info;

use vigia_core::to_feature_collection;

use crate::config::VigiaConfig;
use crate::state_factory::open_form;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write the GeoJSON to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn run(config: &VigiaConfig, args: &ExportArgs) -> anyhow::Result<()> {
    let form = open_form(config).await?;
    let reports = form.store().load().await?;
    let collection = to_feature_collection(&reports);
    let body = serde_json::to_string_pretty(&collection)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, body).await?;
            info!(path = %path.display(), features = collection.features.len(), "exported reports");
            println!("Exported {} reports to {}", collection.features.len(), path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}
