use anyhow::Result;
use clap::{Parser, Subcommand};
use orienta_core::guide::{GuideRequest, KnowledgeLevel};
use orienta_infrastructure::{ConfigService, EnvOverrides, OrientaPaths};

mod app;
mod commands;
mod logging;
mod output;

use app::App;

#[derive(Parser)]
#[command(name = "orienta")]
#[command(about = "Orienta - personalized study guides from your terminal", long_about = None)]
struct Cli {
    /// Override the API base URL for this run
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the API is reachable
    Status,
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ORIENTA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ORIENTA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List your guides
    Guides,
    /// Show one guide day by day
    Show { id: String },
    /// Mark days as done (or not done with --undo) and save
    Toggle {
        id: String,
        #[arg(required = true, value_name = "DAY")]
        days: Vec<u32>,
        #[arg(long)]
        undo: bool,
    },
    /// Study a guide interactively; changes are saved automatically
    Study { id: String },
    /// Generate a new guide
    Generate {
        #[arg(long)]
        title: String,
        #[arg(long)]
        topic: String,
        /// zero | beginner | intermediate
        #[arg(long, default_value = "zero")]
        knowledge: KnowledgeLevel,
        /// Minutes of study per day
        #[arg(long, default_value_t = 30)]
        focus_time: u32,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Delete a guide
    Delete { id: String },
    /// Inspect or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Store a new API base URL
    SetApiUrl { url: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        if !err.is::<output::Reported>() {
            output::print_failure(&err);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = OrientaPaths::resolve()?;
    let mut overrides = EnvOverrides::from_env();
    if let Some(url) = cli.api_url {
        overrides.api_base_url = Some(url);
    }
    let config_service = ConfigService::new(&paths, overrides);
    let config = config_service.get_config()?;

    let _log_guard = logging::init(&config, &paths, cli.verbose)?;
    tracing::debug!("[Cli] Using config from {}", config_service.config_path().display());

    // Config commands must keep working when the stored API URL is broken.
    let command = match cli.command {
        Commands::Config { action } => return commands::config::run(&config_service, action),
        command => command,
    };

    let app = App::build(config_service, &paths)?;
    let result = dispatch(&app, command).await;

    let notices = app.messages.drain();
    output::print_notices(&notices);
    match result {
        Err(_) if notices.iter().any(|notice| notice.is_error()) => Err(output::Reported.into()),
        other => other,
    }
}

impl Commands {
    fn needs_session(&self) -> bool {
        !matches!(self, Commands::Status | Commands::Config { .. })
    }
}

async fn dispatch(app: &App, command: Commands) -> Result<()> {
    if command.needs_session() {
        app.auth.initialize().await;
    }

    match command {
        Commands::Status => commands::status::run(app).await,
        Commands::Config { action } => commands::config::run(&app.config_service, action),
        Commands::Register {
            username,
            email,
            password,
        } => commands::account::register(app, username, email, password).await,
        Commands::Login { email, password } => commands::account::login(app, email, password).await,
        Commands::Logout => commands::account::logout(app).await,
        Commands::Whoami => commands::account::whoami(app).await,
        Commands::Guides => commands::guides::list(app).await,
        Commands::Show { id } => commands::guides::show(app, &id).await,
        Commands::Delete { id } => commands::guides::delete(app, &id).await,
        Commands::Generate {
            title,
            topic,
            knowledge,
            focus_time,
            days,
        } => {
            let request = GuideRequest {
                title,
                topic,
                knowledge,
                focus_time,
                days,
            };
            commands::guides::generate(app, request).await
        }
        Commands::Toggle { id, days, undo } => commands::study::toggle(app, &id, &days, undo).await,
        Commands::Study { id } => commands::study::interactive(app, &id).await,
    }
}
