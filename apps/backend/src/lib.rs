pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use flashforge_core::DictionaryLookup;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::dictionary::StaticDictionary;
use crate::services::notes::{InMemoryNoteStore, NoteStore};
use crate::services::sessions::LookupSessions;

/// How often finished lookup sessions are swept.
const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dictionary: Arc<dyn DictionaryLookup>,
    pub notes: Arc<dyn NoteStore>,
    pub lookups: Arc<LookupSessions>,
}

impl AppState {
    pub fn new(
        config: Config,
        dictionary: Arc<dyn DictionaryLookup>,
        notes: Arc<dyn NoteStore>,
    ) -> Self {
        let lookups = Arc::new(LookupSessions::new(
            config.choice_timeout,
            config.session_retention,
        ));
        Self {
            config: Arc::new(config),
            dictionary,
            notes,
            lookups,
        }
    }
}

/// Build the API router with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Card routes
        .route("/api/cards/polish", post(routes::cards::polish))
        // Definition routes
        .route(
            "/api/definitions/rank",
            post(routes::definitions::rank_definitions),
        )
        // Lookup routes
        .route("/api/lookups", post(routes::lookups::start))
        .route(
            "/api/lookups/:id",
            get(routes::lookups::status).delete(routes::lookups::remove),
        )
        .route("/api/lookups/:id/choice", post(routes::lookups::choose))
        .route("/api/lookups/:id/card", post(routes::lookups::card))
        // Note routes
        .route("/api/notes/:id", get(routes::notes::get))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let dictionary = match &config.dictionary_path {
        Some(path) => StaticDictionary::load(path)?,
        None => {
            tracing::warn!("DICTIONARY_PATH not set, starting with an empty dictionary");
            StaticDictionary::new()
        }
    };

    let addr = config.addr();
    let state = AppState::new(
        config,
        Arc::new(dictionary),
        Arc::new(InMemoryNoteStore::new()),
    );
    state.lookups.spawn_sweeper(SESSION_SWEEP_PERIOD);
    let app = router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
