//! services/web/src/bin/web.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_lib::{
    adapters::{HttpSoapClient, SoapGameAdapter},
    config::Config,
    error::AppError,
    web::{
        add_game_handler, add_vote_handler, clear_games_handler, derive_user, list_handler,
        own_game_handler, state::AppState,
    },
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to the Remote Game API ---
    // The adapter validates the api key during construction; a rejected key
    // aborts startup rather than serving requests that can only fail.
    let transport = Arc::new(HttpSoapClient::new(
        reqwest::Client::new(),
        config.game_api_url.clone(),
    ));
    info!("Validating game api key...");
    let games = Arc::new(SoapGameAdapter::connect(transport, config.game_api_key.clone()).await?);
    info!("Game api key accepted.");

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        games,
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    // Every route passes through the identity middleware; handlers decide
    // for themselves whether the visitor may act.
    let app = Router::new()
        .route("/", get(list_handler))
        .route("/add-game", post(add_game_handler))
        .route("/add-vote/{id}", get(add_vote_handler))
        .route("/own-game/{id}", get(own_game_handler))
        .route("/clear-games", get(clear_games_handler))
        .layer(axum_middleware::from_fn(derive_user))
        .with_state(app_state);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
