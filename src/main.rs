use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_rest::{ApiDoc, AppState, router};
use ward_core::config::id_seed_from_env_value;
use ward_core::{CoreConfig, PatientService};

/// Main entry point for the Ward application.
///
/// Resolves configuration from the environment once at startup, builds the
/// patient service, and serves the REST API with Swagger documentation.
///
/// # Environment Variables
/// - `WARD_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `WARD_ID_SEED`: optional u64 seed selecting the deterministic
///   identifier source (for reproducible runs; leave unset in production)
/// - `RUST_LOG`: tracing filter, on top of the `ward=info` default
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ward=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("WARD_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let id_seed = id_seed_from_env_value(std::env::var("WARD_ID_SEED").ok())
        .map_err(anyhow::Error::from)?;

    if id_seed.is_some() {
        tracing::warn!("WARD_ID_SEED is set; patient identifiers are deterministic");
    }

    tracing::info!("++ Starting Ward REST on {}", rest_addr);

    let cfg = Arc::new(CoreConfig::new(id_seed));
    let state = AppState::new(PatientService::new(cfg));

    let app = router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
