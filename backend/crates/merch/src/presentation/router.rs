//! Merch Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::MerchConfig;
use crate::application::session_token::SessionTokenService;
use crate::domain::repository::LedgerStore;
use crate::infra::postgres::PgLedgerStore;
use crate::presentation::handlers::{self, MerchAppState};
use crate::presentation::middleware::require_bearer;

/// Create the Merch router with the PostgreSQL Ledger Store
pub fn merch_router(store: PgLedgerStore, config: MerchConfig) -> Router {
    merch_router_generic(store, config)
}

/// Create a generic Merch router for any Ledger Store implementation
pub fn merch_router_generic<R>(store: R, config: MerchConfig) -> Router
where
    R: LedgerStore + Clone + Send + Sync + 'static,
{
    let tokens = SessionTokenService::new(&config);
    let state = MerchAppState {
        repo: Arc::new(store),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/buy/{item}", get(handlers::buy_item::<R>))
        .route("/sendCoin", post(handlers::send_coin::<R>))
        .route("/info", get(handlers::get_info::<R>))
        .route_layer(middleware::from_fn_with_state(tokens, require_bearer));

    Router::new()
        .route("/auth", post(handlers::authenticate::<R>))
        .merge(protected)
        .with_state(state)
}
