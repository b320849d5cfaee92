//! Escrow handlers: create, list, get, deposit, withdraw.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateEscrowRequest, DepositRequest, EscrowDetailResponse, EscrowListParams,
    EscrowListResponse, EscrowResponse, WithdrawRequest,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery, Caller};
use crate::app_state::AppState;
use crate::domain::{EscrowFilter, EscrowId, PoolId, Principal};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /escrows`: Open an escrow against a live pool.
///
/// # Errors
///
/// Returns `KeyNotFound` if the pool is not live or `InsufficientStake`
/// if `value` is below its minimum stake.
#[utoipa::path(
    post,
    path = "/api/v1/escrows",
    tag = "Escrows",
    summary = "Create an escrow",
    description = "Opens an escrow owned by the caller. The initial value must be at least the pool's current minimum stake.",
    params(("x-principal" = String, Header, description = "Calling principal")),
    request_body = CreateEscrowRequest,
    responses(
        (status = 201, description = "Escrow created", body = EscrowResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
        (status = 422, description = "Value below minimum stake", body = ErrorResponse),
    )
)]
pub async fn create_escrow(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ApiJson(req): ApiJson<CreateEscrowRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let value = req.value.get();
    let entry = state
        .ledger_service
        .create_escrow(&caller, req.pool_id, value)
        .await?;

    Ok((StatusCode::CREATED, Json(EscrowResponse::from(entry))))
}

/// `GET /escrows`: List escrows, optionally filtered by pool and owner.
///
/// # Errors
///
/// Returns [`GatewayError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/escrows",
    tag = "Escrows",
    summary = "List escrows",
    description = "Returns a paginated list of escrows, oldest first. Escrows whose pool was deleted are included.",
    params(EscrowListParams),
    responses(
        (status = 200, description = "Paginated escrow list", body = EscrowListResponse),
    )
)]
pub async fn list_escrows(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<EscrowListParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let filter = EscrowFilter {
        pool_id: params.pool_id.map(PoolId::from_uuid),
        owner: params.owner.as_deref().map(Principal::new),
    };
    let entries = state.ledger_service.list_escrows(&filter).await;

    let (page, pagination) = params.pagination().paginate(entries);
    Ok(Json(EscrowListResponse {
        data: page.into_iter().map(EscrowResponse::from).collect(),
        pagination,
    }))
}

/// `GET /escrows/{id}`: Get escrow details.
///
/// # Errors
///
/// Returns `KeyNotFound` if no escrow has this ID.
#[utoipa::path(
    get,
    path = "/api/v1/escrows/{id}",
    tag = "Escrows",
    summary = "Get escrow details",
    description = "Returns the escrow and whether the pool it was created against is still live.",
    params(("id" = uuid::Uuid, Path, description = "Escrow UUID")),
    responses(
        (status = 200, description = "Escrow details", body = EscrowDetailResponse),
        (status = 404, description = "Escrow not found", body = ErrorResponse),
    )
)]
pub async fn get_escrow(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let (entry, pool_live) = state
        .ledger_service
        .get_escrow(EscrowId::from_uuid(id))
        .await?;

    Ok(Json(EscrowDetailResponse {
        escrow: EscrowResponse::from(entry),
        pool_live,
    }))
}

/// `POST /escrows/{id}/deposit`: Add value to an escrow.
///
/// # Errors
///
/// Returns `KeyNotFound`, `AddressUnauthorised` or `BalanceOverflow`.
#[utoipa::path(
    post,
    path = "/api/v1/escrows/{id}/deposit",
    tag = "Escrows",
    summary = "Deposit into an escrow",
    description = "Owner-only. Allowed even after the escrow's pool was deleted.",
    params(
        ("id" = uuid::Uuid, Path, description = "Escrow UUID"),
        ("x-principal" = String, Header, description = "Calling principal"),
    ),
    request_body = DepositRequest,
    responses(
        (status = 200, description = "Deposit applied", body = EscrowResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Escrow not found", body = ErrorResponse),
        (status = 422, description = "Balance overflow", body = ErrorResponse),
    )
)]
pub async fn deposit_escrow(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<uuid::Uuid>,
    ApiJson(req): ApiJson<DepositRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let value = req.value.get();
    let entry = state
        .ledger_service
        .deposit_escrow(&caller, EscrowId::from_uuid(id), value)
        .await?;

    Ok(Json(EscrowResponse::from(entry)))
}

/// `POST /escrows/{id}/withdraw`: Take value out of an escrow.
///
/// # Errors
///
/// Returns `KeyNotFound`, `AddressUnauthorised` or `InsufficientBalance`.
#[utoipa::path(
    post,
    path = "/api/v1/escrows/{id}/withdraw",
    tag = "Escrows",
    summary = "Withdraw from an escrow",
    description = "Owner-only. The amount may not exceed the current balance; withdrawing the full balance leaves the escrow at zero.",
    params(
        ("id" = uuid::Uuid, Path, description = "Escrow UUID"),
        ("x-principal" = String, Header, description = "Calling principal"),
    ),
    request_body = WithdrawRequest,
    responses(
        (status = 200, description = "Withdrawal applied", body = EscrowResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Escrow not found", body = ErrorResponse),
        (status = 422, description = "Insufficient balance", body = ErrorResponse),
    )
)]
pub async fn withdraw_escrow(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<uuid::Uuid>,
    ApiJson(req): ApiJson<WithdrawRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let amount = req.amount.get();
    let entry = state
        .ledger_service
        .withdraw_escrow(&caller, EscrowId::from_uuid(id), amount)
        .await?;

    Ok(Json(EscrowResponse::from(entry)))
}

/// Escrow routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/escrows", post(create_escrow).get(list_escrows))
        .route("/escrows/{id}", get(get_escrow))
        .route("/escrows/{id}/deposit", post(deposit_escrow))
        .route("/escrows/{id}/withdraw", post(withdraw_escrow))
}
