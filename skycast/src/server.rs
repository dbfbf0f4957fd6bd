//! HTTP shell: routes, handlers and shared state.
//!
//! The provider (and with it the API key) lives only here; browsers talk to
//! this server and never see the credential.

use std::sync::Arc;

use anyhow::Context;
use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skycast_core::{
    ViewState, WeatherProvider, WeatherSnapshot, WeatherView,
    view::{NO_CITY_MESSAGE, NOT_FOUND_MESSAGE},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::pages::{LandingPage, NotFoundPage, WeatherPage};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

/// Create the router with both pages and the JSON endpoint.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/weather", get(weather_page))
        .route("/api/weather", get(weather_api))
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl-C: {e}");
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

/// Drive a fresh view through one lookup.
async fn lookup(provider: &dyn WeatherProvider, city: Option<&str>) -> WeatherView {
    let mut view = WeatherView::new();
    if let Some(ticket) = view.set_city(city) {
        let result = provider.current(&ticket.city).await;
        view.resolve(ticket, result);
    }
    view
}

fn render_html<T: Template>(page: T) -> Response {
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("template rendering failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

async fn landing() -> Response {
    render_html(LandingPage)
}

async fn weather_page(State(state): State<AppState>, Query(query): Query<WeatherQuery>) -> Response {
    let view = lookup(state.provider.as_ref(), query.city.as_deref()).await;
    render_html(WeatherPage::from(view.render()))
}

async fn not_found(uri: Uri) -> Response {
    let mut response = render_html(NotFoundPage { path: uri.path().to_string() });
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// JSON form of a loaded snapshot, with the derived Fahrenheit value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub condition: String,
    pub observed_at: Option<DateTime<Utc>>,
}

impl From<WeatherSnapshot> for WeatherReport {
    fn from(s: WeatherSnapshot) -> Self {
        Self {
            temperature_f: s.temperature_f(),
            location_name: s.location_name,
            temperature_c: s.temperature_c,
            humidity_pct: s.humidity_pct,
            wind_kph: s.wind_kph,
            condition: s.condition,
            observed_at: s.observed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message.to_string() })).into_response()
}

async fn weather_api(State(state): State<AppState>, Query(query): Query<WeatherQuery>) -> Response {
    let view = lookup(state.provider.as_ref(), query.city.as_deref()).await;

    match view.state() {
        ViewState::Loaded(snapshot) => Json(WeatherReport::from(snapshot.clone())).into_response(),
        ViewState::NoCity => error_json(StatusCode::BAD_REQUEST, NO_CITY_MESSAGE),
        ViewState::NotFound | ViewState::Loading => {
            error_json(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
