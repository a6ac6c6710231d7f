use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coffee_greeter::client::{Submitter, render_state};
use coffee_greeter::infrastructure::AppState;
use coffee_greeter::{config, server};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coffee_greeter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // --submit <name>: act as a client against a running server
    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--submit") {
        let Some(name) = args.get(pos + 1).filter(|n| !n.trim().is_empty()) else {
            eprintln!("Usage: coffee-greeter --submit <name>");
            return ExitCode::FAILURE;
        };

        tracing::info!("Submitting '{}' to {}", name, config.api_url);
        let submitter = Submitter::new(&config.api_url);
        let state = submitter.submit(name).await;
        println!("{}", render_state(&state));

        return if state.error().is_some() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    let state = AppState::from_config(&config);
    let app = server::build_router(state, &config.cors_allowed_origins);

    let (listener, addr) = match server::bind(config.port).await {
        Ok(bound) => bound,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        "Coffee greeter listening on {} (model {}, region {})",
        addr,
        config.model_id,
        config.region
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("HTTP server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
