use crate::app::App;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use orienta_core::guide::{GuideRepository, GuideRequest};

pub async fn list(app: &App) -> Result<()> {
    app.auth.require_authenticated().await?;
    let shelves = app.library.fetch_shelves().await?;
    output::print_shelves(&shelves);
    Ok(())
}

pub async fn show(app: &App, id: &str) -> Result<()> {
    app.auth.require_authenticated().await?;
    let guide = app.guides.find_by_id(id).await?;
    guide.validate()?;
    output::print_guide(&guide);
    Ok(())
}

pub async fn delete(app: &App, id: &str) -> Result<()> {
    app.auth.require_authenticated().await?;
    let outcome = app.library.delete_guide(id).await;
    match outcome.error {
        None => Ok(()),
        Some(message) => Err(anyhow::anyhow!(message)),
    }
}

pub async fn generate(app: &App, request: GuideRequest) -> Result<()> {
    app.auth.require_authenticated().await?;
    app.generation.validate_topic(&request.topic).await?;

    println!(
        "{}",
        format!("Generating a {}-day guide, this can take a minute...", request.days).bright_black()
    );
    let guide = app.generation.generate(&request).await?;
    println!("Open it with `orienta study {}`", guide.id.bold());
    Ok(())
}
