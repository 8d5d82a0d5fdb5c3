use lead_scoring_api::config::Config;
use lead_scoring_api::handlers::{self, AppState};
use lead_scoring_api::normalizer::ResponseNormalizer;
use lead_scoring_api::predictor::LeadPredictor;
use lead_scoring_api::score_source::{RandomScoreSource, ScoreSource};
use lead_scoring_api::scoring_client::ScoringClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - The scoring service client and score synthesis.
/// - HTTP routes and middleware (CORS, body limit, tracing).
///
/// It then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_scoring_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let scoring_client = ScoringClient::from_config(&config)?;
    tracing::info!("✓ Scoring client initialized: {}", scoring_client.predict_url());

    let score_source: Arc<dyn ScoreSource> = match config.score_seed {
        Some(seed) => Arc::new(RandomScoreSource::seeded(seed)),
        None => Arc::new(RandomScoreSource::from_entropy()),
    };

    // Build application state
    let app_state = Arc::new(AppState {
        predictor: LeadPredictor::new(
            Arc::new(scoring_client),
            ResponseNormalizer::new(score_source),
        ),
    });

    let app = handlers::router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
