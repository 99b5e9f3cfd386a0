use crate::app::App;
use anyhow::Result;
use colored::Colorize;
use orienta_core::status::{ApiStatus, StatusService};

pub async fn run(app: &App) -> Result<()> {
    let status = app.status.status().await?;
    let label = match status {
        ApiStatus::Online => status.to_string().green(),
        ApiStatus::Offline => status.to_string().red(),
    };
    println!("{} {} ({})", "API:".bright_black(), label, app.config.api_base_url);
    Ok(())
}
