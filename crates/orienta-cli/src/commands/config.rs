use crate::ConfigAction;
use anyhow::Result;
use colored::Colorize;
use orienta_core::config::ClientConfig;
use orienta_infrastructure::ConfigService;
use orienta_interaction::ApiClient;

pub fn run(service: &ConfigService, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show(service),
        ConfigAction::SetApiUrl { url } => set_api_url(service, &url),
    }
}

fn show(service: &ConfigService) -> Result<()> {
    let config = service.get_config()?;
    println!("{} {}", "File:".bright_black(), service.config_path().display());
    println!("api_base_url             = {}", config.api_base_url);
    println!("request_timeout_secs     = {}", config.request_timeout_secs);
    println!("autosave_quiet_period_ms = {}", config.autosave_quiet_period_ms);
    println!("log_level                = {}", config.log_level);
    Ok(())
}

fn set_api_url(service: &ConfigService, url: &str) -> Result<()> {
    let candidate = ClientConfig {
        api_base_url: url.trim().to_string(),
        ..ClientConfig::default()
    };
    // Rejects URLs the REST client could not use.
    ApiClient::new(&candidate)?;

    let saved = service.update(|config| config.api_base_url = candidate.api_base_url.clone())?;
    println!("API URL set to {}", saved.api_base_url.green());
    Ok(())
}
