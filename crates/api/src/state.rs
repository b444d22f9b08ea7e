use std::sync::Arc;
use std::time::Duration;

use lectern_pipeline::{Orchestrator, UsageGate};
use lectern_providers::{CaptionClient, GenerationClient, MediaClient, TranscriptionClient};

use crate::config::ServerConfig;
use crate::stores::{DbEntitlementStore, DbLectureStore};

/// Timeout for outbound provider calls. Transcription of a long
/// recording is the slowest leg, so this is deliberately generous.
const PROVIDER_TIMEOUT_SECS: u64 = 300;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lectern_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The processing pipeline, wired to the real provider clients.
    pub orchestrator: Arc<Orchestrator>,
    /// Entitlement gate consulted before each run.
    pub gate: UsageGate,
}

impl AppState {
    /// Wire provider clients and database stores into a ready state.
    pub fn new(pool: lectern_db::DbPool, config: ServerConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        let generation = Arc::new(GenerationClient::new(
            http.clone(),
            config.google_ai_api_key.clone(),
        ));
        let orchestrator = Orchestrator::new(
            Arc::new(MediaClient::new(http.clone())),
            Arc::new(TranscriptionClient::new(
                http.clone(),
                config.groq_api_key.clone(),
            )),
            Arc::new(CaptionClient::new(http)),
            generation.clone(),
            generation,
            Some(Arc::new(DbLectureStore::new(pool.clone()))),
        );
        let gate = UsageGate::new(Arc::new(DbEntitlementStore::new(pool.clone())));

        Self {
            pool,
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            gate,
        }
    }
}
