use crate::app::App;
use anyhow::Result;
use colored::Colorize;
use orienta_core::user::{Credentials, Registration};

pub async fn register(app: &App, username: String, email: String, password: String) -> Result<()> {
    app.auth.require_guest().await?;
    let registration = Registration {
        username,
        email,
        password,
    };
    app.auth.register(&registration).await?;
    println!("{}", "You can now log in with `orienta login`.".bright_black());
    Ok(())
}

pub async fn login(app: &App, email: String, password: String) -> Result<()> {
    app.auth.require_guest().await?;
    let user = app.auth.login(&Credentials::new(email, password)).await?;
    println!("Logged in as {}", user.username.bold());
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.auth.require_authenticated().await?;
    app.auth.logout().await;
    println!("{}", "Logged out.".green());
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    let user = app.auth.require_authenticated().await?;
    println!("{} <{}>", user.username.bold(), user.email);
    if let Some(created_at) = &user.created_at {
        println!("{} {}", "Member since".bright_black(), created_at);
    }
    Ok(())
}
