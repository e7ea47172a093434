use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info_span, warn};
use uuid::Uuid;

use crate::gateway::Gateway;
use crate::types::{
    BatteryReply, ConfigureReply, HealthStatus, HistoryQuery, HistoryReply, ScanReply,
    WifiCredentials,
};

pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route("/api/esp32/config", post(configure_device))
        .route("/api/esp32/scan", get(scan_networks))
        .route("/api/battery", get(battery_data))
        .route("/api/battery/history", get(battery_history))
        .route("/api/health", get(health_check))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %req.method(),
                    path = %req.uri().path(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(gateway)
}

async fn configure_device(
    State(gateway): State<Arc<Gateway>>,
    body: Result<Json<WifiCredentials>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(creds)) => gateway.configure_device(creds).await.into_response(),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected wifi configuration body");
            (rejection.status(), Json(ConfigureReply::failed(rejection.body_text()))).into_response()
        }
    }
}

async fn scan_networks(State(gateway): State<Arc<Gateway>>) -> ScanReply {
    gateway.scan_networks().await
}

async fn battery_data(State(gateway): State<Arc<Gateway>>) -> BatteryReply {
    gateway.battery_data().await
}

async fn battery_history(
    State(gateway): State<Arc<Gateway>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => gateway.battery_history(query.limit).await.into_response(),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected battery history query");
            (rejection.status(), Json(HistoryReply::mock(rejection.body_text()))).into_response()
        }
    }
}

async fn health_check(State(gateway): State<Arc<Gateway>>) -> Json<HealthStatus> {
    Json(gateway.health())
}

impl IntoResponse for ConfigureReply {
    fn into_response(self) -> Response {
        let status = match self {
            ConfigureReply::Applied { .. } => StatusCode::OK,
            ConfigureReply::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for ScanReply {
    fn into_response(self) -> Response {
        let status = match self {
            ScanReply::Networks(_) => StatusCode::OK,
            ScanReply::Unavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

// Battery fallbacks are still a usable reading, so both branches are 200.
impl IntoResponse for BatteryReply {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl IntoResponse for HistoryReply {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
