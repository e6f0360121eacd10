use anyhow::bail;

use vigia_core::Report;

use crate::OutputFormat;
use crate::config::VigiaConfig;
use crate::state_factory::open_form;

pub async fn run(config: &VigiaConfig, id: u64, format: &OutputFormat) -> anyhow::Result<()> {
    let form = open_form(config).await?;
    let Some(report) = form.store().get(id).await? else {
        bail!("report not found: {id}");
    };
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_report(&report),
    }
    Ok(())
}

pub fn print_report(report: &Report) {
    println!("ID:          {}", report.id);
    println!("Type:        {}", report.event_type);
    println!("Date:        {}", report.date_time);
    println!("Location:    {}, {}", report.latitude, report.longitude);
    println!("Submitted:   {}", report.timestamp);
    println!("Description: {}", report.description);
    if !report.files.is_empty() {
        println!("Files:");
        for f in &report.files {
            println!("  {} ({} bytes) {}", f.name, f.size, f.media_type);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = VigiaConfig::default();
        config.storage.path = dir.path().join("data.json").display().to_string();

        let err = run(&config, 99, &OutputFormat::Text).await.unwrap_err();
        assert_eq!(err.to_string(), "report not found: 99");
    }
}
