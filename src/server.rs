//! HTTP surface of the server: `GET /cotacao`.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::core::{BidResponse, BidStore, ExchangeRateProvider};

pub const BID_ROUTE: &str = "/cotacao";

/// Shared per-server state. Deadlines are fixed for the server's lifetime and
/// restart for every request.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ExchangeRateProvider>,
    pub store: Arc<dyn BidStore>,
    pub api_timeout: Duration,
    pub db_timeout: Duration,
}

/// The two ways a bid request can fail. Both render as a plain-text 500.
#[derive(Debug)]
pub enum ApiError {
    Fetch(anyhow::Error),
    Save(anyhow::Error),
}

impl ApiError {
    fn message(&self) -> &'static str {
        match self {
            ApiError::Fetch(_) => "Error fetching exchange rate",
            ApiError::Save(_) => "Error saving exchange rate",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.message();
        let (ApiError::Fetch(err) | ApiError::Save(err)) = &self;
        error!("{message}: {err:#}");
        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(BID_ROUTE, get(get_bid))
        .with_state(state)
}

pub async fn get_bid(State(state): State<AppState>) -> Result<Json<BidResponse>, ApiError> {
    let bid = state
        .provider
        .fetch_bid(state.api_timeout)
        .await
        .map_err(ApiError::Fetch)?;
    info!(%bid, "Current bid");

    let id = state
        .store
        .save_bid(&bid, state.db_timeout)
        .await
        .map_err(ApiError::Save)?;
    info!(id, "Exchange rate saved successfully");

    Ok(Json(BidResponse { bid }))
}

/// Serves the bid endpoint on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}
