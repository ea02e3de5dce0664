//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::MerchConfig;
use crate::application::{
    AuthenticateInput, AuthenticateUseCase, BuyItemUseCase, GetInfoUseCase, SendCoinInput,
    SendCoinUseCase,
};
use crate::domain::repository::LedgerStore;
use crate::error::{MerchError, MerchResult};
use crate::presentation::dto::{AuthRequest, AuthResponse, InfoResponse, SendCoinRequest};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for merch handlers
#[derive(Clone)]
pub struct MerchAppState<R>
where
    R: LedgerStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<MerchConfig>,
}

/// Unwrap a JSON body, reporting rejections as invalid input
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> MerchResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| MerchError::InvalidInput(rejection.body_text()))
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth
pub async fn authenticate<R>(
    State(state): State<MerchAppState<R>>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> MerchResult<Json<AuthResponse>>
where
    R: LedgerStore + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(AuthenticateInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        token: output.token,
    }))
}

// ============================================================================
// Buy
// ============================================================================

/// GET /api/buy/{item}
pub async fn buy_item<R>(
    State(state): State<MerchAppState<R>>,
    Extension(AuthenticatedUser(user_name)): Extension<AuthenticatedUser>,
    Path(item): Path<String>,
) -> MerchResult<StatusCode>
where
    R: LedgerStore + Clone + Send + Sync + 'static,
{
    let use_case = BuyItemUseCase::new(state.repo.clone());
    use_case.execute(&user_name, &item).await?;

    Ok(StatusCode::OK)
}

// ============================================================================
// Send Coin
// ============================================================================

/// POST /api/sendCoin
pub async fn send_coin<R>(
    State(state): State<MerchAppState<R>>,
    Extension(AuthenticatedUser(user_name)): Extension<AuthenticatedUser>,
    payload: Result<Json<SendCoinRequest>, JsonRejection>,
) -> MerchResult<StatusCode>
where
    R: LedgerStore + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case = SendCoinUseCase::new(state.repo.clone());
    use_case
        .execute(
            &user_name,
            SendCoinInput {
                to_user: req.to_user,
                amount: req.amount,
            },
        )
        .await?;

    Ok(StatusCode::OK)
}

// ============================================================================
// Info
// ============================================================================

/// GET /api/info
pub async fn get_info<R>(
    State(state): State<MerchAppState<R>>,
    Extension(AuthenticatedUser(user_name)): Extension<AuthenticatedUser>,
) -> MerchResult<Json<InfoResponse>>
where
    R: LedgerStore + Clone + Send + Sync + 'static,
{
    let use_case = GetInfoUseCase::new(state.repo.clone());
    let info = use_case.execute(&user_name).await?;

    Ok(Json(info.into()))
}
