//! Periodic BC HTTP Server

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use periodic_bc::export::write_keywords;
use periodic_bc::host::RecordedEquation;
use periodic_bc::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct PbcRequest {
    model: MeshHost,
    face_pairs: Vec<FacePairSpec>,
    #[serde(default)]
    mode: LoadingMode,
    #[serde(default)]
    options: Option<PbcOptions>,
    /// Also return the keyword deck
    #[serde(default)]
    keywords: bool,
}

#[derive(Debug, Serialize)]
struct PbcResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<ResultsData>,
}

#[derive(Debug, Serialize)]
struct ResultsData {
    report: SetupReport,
    node_sets: BTreeMap<String, Vec<NodeId>>,
    equations: Vec<RecordedEquation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<String>,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn setup_pbc(Json(request): Json<PbcRequest>) -> impl IntoResponse {
    match run_setup(request) {
        Ok(results) => (
            StatusCode::OK,
            Json(PbcResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            warn!("PBC setup rejected: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(PbcResponse {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }),
            )
        }
    }
}

fn run_setup(request: PbcRequest) -> PbcResult<ResultsData> {
    let mut host = request.model;
    let setup = PeriodicSetup::new(request.options.unwrap_or_default());

    let report = setup.run(&mut host, &request.face_pairs, &request.mode)?;
    let keywords = request.keywords.then(|| write_keywords(&host));

    Ok(ResultsData {
        report,
        node_sets: host.node_sets,
        equations: host.equations,
        keywords,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/pbc", post(setup_pbc))
        .layer(cors);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8087);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Periodic BC server listening on http://{}", addr);
    info!("  Health check: GET  /health");
    info!("  PBC setup:    POST /api/v1/pbc");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
