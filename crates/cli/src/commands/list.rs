use crate::OutputFormat;
use crate::config::VigiaConfig;
use crate::state_factory::open_form;

pub async fn run(config: &VigiaConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let form = open_form(config).await?;
    let reports = form.store().load().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            println!("{} reports:", reports.len());
            for r in &reports {
                println!(
                    "  {id} | {kind} | {when} | {lat}, {long} | {files} file(s)",
                    id = r.id,
                    kind = r.event_type,
                    when = r.date_time,
                    lat = r.latitude,
                    long = r.longitude,
                    files = r.files.len(),
                );
            }
        }
    }
    Ok(())
}
