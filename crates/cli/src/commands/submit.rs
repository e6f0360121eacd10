use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;

use vigia_core::{FileCandidate, MapClick, Surface};
use vigia_form::ReportForm;

use crate::OutputFormat;
use crate::commands::show::print_report;
use crate::config::VigiaConfig;
use crate::state_factory::open_form;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Kind of event, e.g. `flood` or `landslide`.
    #[arg(long)]
    pub event_type: Option<String>,
    /// When it happened (`YYYY-MM-DDTHH:MM`). Defaults to now.
    #[arg(long)]
    pub date_time: Option<String>,
    /// Free-text description.
    #[arg(long)]
    pub description: Option<String>,
    /// Click x on the map, relative to its top-left corner.
    #[arg(long, requires_all = ["y", "width", "height"])]
    pub x: Option<f64>,
    /// Click y on the map.
    #[arg(long, requires = "x")]
    pub y: Option<f64>,
    /// Map width in pixels.
    #[arg(long, requires = "x")]
    pub width: Option<f64>,
    /// Map height in pixels.
    #[arg(long, requires = "x")]
    pub height: Option<f64>,
    /// Latitude typed directly, instead of a map click.
    #[arg(long, conflicts_with = "x", allow_hyphen_values = true)]
    pub latitude: Option<String>,
    /// Longitude typed directly, instead of a map click.
    #[arg(long, conflicts_with = "x", allow_hyphen_values = true)]
    pub longitude: Option<String>,
    /// Attach a file (repeatable). Only its name, size and type are recorded.
    #[arg(long = "file")]
    pub files: Vec<PathBuf>,
}

pub async fn run(config: &VigiaConfig, args: &SubmitArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mut form = open_form(config).await?;
    fill(&mut form, args)?;

    let mut candidates = Vec::with_capacity(args.files.len());
    for path in &args.files {
        candidates.push(candidate_for(path).await?);
    }
    for rejected in form.on_files_selected(candidates) {
        eprintln!("{rejected}");
    }

    let report = match form.submit().await {
        Ok(report) => report,
        Err(e) => bail!(e.user_message()),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Report submitted.");
            print_report(&report);
        }
    }
    Ok(())
}

fn fill(form: &mut ReportForm, args: &SubmitArgs) -> anyhow::Result<()> {
    if let Some(ref value) = args.event_type {
        form.set_event_type(value.as_str());
    }
    if let Some(ref value) = args.date_time {
        form.set_date_time(value.as_str());
    }
    if let Some(ref value) = args.description {
        form.set_description(value.as_str());
    }
    if let (Some(x), Some(y), Some(width), Some(height)) = (args.x, args.y, args.width, args.height)
    {
        form.on_map_click(&Surface::new(width, height), MapClick { x, y })?;
    }
    if let Some(ref value) = args.latitude {
        form.set_latitude(value.as_str());
    }
    if let Some(ref value) = args.longitude {
        form.set_longitude(value.as_str());
    }
    Ok(())
}

async fn candidate_for(path: &Path) -> anyhow::Result<FileCandidate> {
    let meta = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    if !meta.is_file() {
        bail!("{} is not a file", path.display());
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(FileCandidate::new(name, meta.len(), media_type_for(path)))
}

/// Media type guessed from the file extension, or empty if unknown.
fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "3gp" => "video/3gpp",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_types_by_extension() {
        assert_eq!(media_type_for(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(media_type_for(Path::new("clip.mov")), "video/quicktime");
        assert_eq!(media_type_for(Path::new("notes.txt")), "");
        assert_eq!(media_type_for(Path::new("README")), "");
    }

    #[tokio::test]
    async fn candidate_uses_file_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("street.png");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let candidate = candidate_for(&path).await.unwrap();
        assert_eq!(candidate.name, "street.png");
        assert_eq!(candidate.size, 2048);
        assert_eq!(candidate.media_type, "image/png");
    }

    #[tokio::test]
    async fn directories_are_not_attachments() {
        let dir = tempfile::tempdir().unwrap();
        assert!(candidate_for(dir.path()).await.is_err());
    }
}
