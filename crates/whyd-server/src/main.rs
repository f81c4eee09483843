//! Whyd, the GDPR consent page server.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod analytics;
mod auth;
mod params;
mod render;
mod routes;
mod state;
mod template;

use analytics::VisitLog;
use auth::{SessionLogin, User};
use state::AppState;
use template::MainTemplate;
use whyd_consent::ConsentBlocks;
use whyd_core::WhydConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                println!("Whyd: GDPR consent page server");
                println!();
                println!("Usage: whyd");
                println!();
                println!("Environment:");
                println!("  PORT                 HTTP port (default 8080)");
                println!("  WHYD_CONSENT_EN      English consent Markdown");
                println!("  WHYD_CONSENT_FR      French consent Markdown");
                println!("  WHYD_PUBLIC_DIR      Static assets directory (default public)");
                println!("  WHYD_SESSION_COOKIE  Session cookie name (default whydSid)");
                println!("  WHYD_LOGIN_PATH      Login page (default /login)");
                println!("  WHYD_DEV_SESSION     Session id logged in as a demo user");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}. Use 'whyd help' for usage.", arg);
                std::process::exit(1);
            }
        }
    }

    let config = WhydConfig::from_env()?;
    let port = config.port;

    // Consent text is rendered once; a missing document stops startup.
    let consent_blocks = ConsentBlocks::load(&config.consent_sources)
        .context("Failed to load consent documents")?;

    let login = SessionLogin::new(&config.session_cookie, &config.login_path);
    if let Some(sid) = &config.dev_session {
        login.insert(
            sid.clone(),
            User {
                id: "dev".into(),
                name: "Demo User".into(),
            },
        );
        info!("Demo session enabled via {}", config.session_cookie);
    }

    let state = Arc::new(AppState::new(
        config,
        consent_blocks,
        Arc::new(login),
        Arc::new(MainTemplate::default()),
        Arc::new(VisitLog::new()),
    ));

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Whyd server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
