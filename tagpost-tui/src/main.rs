use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;
use uuid::Uuid;

use tagpost::api::ApiClient;
use tagpost::app::{handlers::KeyOutcome, App};
use tagpost::logging::{self, LogConfig};
use tagpost::server_config::ServerConfigManager;
use tagpost::{terminal, ui};

/// tagpost - compose and edit posts, tag friends, add a location
#[derive(Parser)]
#[command(name = "tagpost")]
#[command(about = "Terminal post composer with friend tagging and locations")]
#[command(version)]
struct Cli {
    /// Server URL to connect to
    #[arg(long, short, env = "TAGPOST_SERVER_URL")]
    server: Option<String>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,

    /// Session token sent with every request
    #[arg(long, env = "TAGPOST_SESSION_TOKEN")]
    session_token: Option<String>,

    /// Open this post in the edit composer instead of a new post
    #[arg(long)]
    post: Option<Uuid>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so clap's env fallbacks can see it
    let _ = dotenv::dotenv();
    let cli = Cli::parse();

    let log_config = LogConfig::for_verbosity(cli.verbose);
    logging::init_logging(&log_config)?;

    let server_config_manager = ServerConfigManager::new()?;
    if let Some(url) = &cli.server {
        // Remember an explicit server for the next run
        if let Err(e) = server_config_manager.save_server_url(url.clone()) {
            log::warn!("Failed to save server URL: {}", e);
        }
    }
    let server_url = server_config_manager.determine_server_url(cli.server)?;
    log::info!("Using server {}", server_url);

    let mut api_client = ApiClient::new(server_url);
    if cli.session_token.is_some() {
        log::info!("Using session token from command line");
    }
    api_client.set_session_token(cli.session_token);

    let mut app = App::new(api_client);
    app.log_config = log_config;
    app.color_scheme = server_config_manager.color_scheme().unwrap_or_else(|e| {
        log::warn!("Could not load color scheme: {}", e);
        Default::default()
    });

    match cli.post {
        Some(post_id) => match app.api_client.get_post(post_id).await {
            Ok(post) => {
                app.last_saved = Some(post.clone());
                app.open_composer_edit_post(&post);
            }
            Err(e) => {
                log::error!("Failed to load post {}: {}", post_id, e);
                app.status_message = Some(format!("Could not load post {}: {}", post_id, e));
            }
        },
        None => app.open_composer_new_post(),
    }

    let mut tui = terminal::init()?;
    let result = run(&mut tui, &mut app).await;
    terminal::restore()?;

    if let Err(e) = server_config_manager.save_color_scheme(app.color_scheme) {
        log::warn!("Failed to save color scheme: {}", e);
    }

    result
}

async fn run(tui: &mut terminal::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.dispatch_pending_fetches();
        app.drain_fetch_outcomes();

        tui.draw(|frame| ui::render(&*app, frame))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key_event(key)? == KeyOutcome::Submit {
                app.submit_composer().await?;
            }
        }
    }
    Ok(())
}
