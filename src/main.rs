use std::sync::Arc;

use anyhow::Context;

use symptom_advisor::advice::AdvicePipeline;
use symptom_advisor::config::AppConfig;
use symptom_advisor::llm::create_provider;
use symptom_advisor::places::{GooglePlacesClient, ProviderLookup};
use symptom_advisor::results::ResultsCoordinator;
use symptom_advisor::web::app_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;

    eprintln!("🩺 Symptom Advisor v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.gemini.model);
    eprintln!("   Intake: http://{}/", config.addr);
    eprintln!("   Results API: http://{}/api/results", config.addr);

    // ── Advice ───────────────────────────────────────────────────────────
    let llm = create_provider(&config.gemini);
    let advice = Arc::new(AdvicePipeline::new(llm));

    // ── Provider lookup ──────────────────────────────────────────────────
    let places = GooglePlacesClient::new(&config.places);
    if places.is_configured() {
        eprintln!("   Places: enabled");
    } else {
        eprintln!("   Places: disabled (PLACES_API_KEY not set)");
    }
    let lookup = Arc::new(ProviderLookup::new(Arc::new(places)));

    // ── Server ───────────────────────────────────────────────────────────
    let results = Arc::new(ResultsCoordinator::new(advice, lookup));
    let app = app_routes(results);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!(addr = %config.addr, "Symptom Advisor listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
