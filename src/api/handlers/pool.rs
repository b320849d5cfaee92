//! Pool CRUD handlers: create, list, get, update, delete.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreatePoolRequest, PoolListParams, PoolListResponse, PoolResponse, UpdatePoolRequest,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery, Caller};
use crate::app_state::AppState;
use crate::domain::{PoolId, Principal};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /pools`: Create a new pool owned by the caller.
///
/// # Errors
///
/// Returns [`GatewayError`] on an empty name, a malformed stake or a
/// missing caller.
#[utoipa::path(
    post,
    path = "/api/v1/pools",
    tag = "Pools",
    summary = "Create a pool",
    description = "Creates a pool owned by the calling principal. `min_stake` is the smallest value an escrow may be opened with.",
    params(("x-principal" = String, Header, description = "Calling principal")),
    request_body = CreatePoolRequest,
    responses(
        (status = 201, description = "Pool created", body = PoolResponse),
        (status = 400, description = "Empty name or malformed stake", body = ErrorResponse),
        (status = 401, description = "Missing caller", body = ErrorResponse),
    )
)]
pub async fn create_pool(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ApiJson(req): ApiJson<CreatePoolRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let min_stake = req.min_stake.get();
    let entry = state
        .ledger_service
        .create_pool(&caller, req.name, req.description, min_stake)
        .await?;

    Ok((StatusCode::CREATED, Json(PoolResponse::from(entry))))
}

/// `GET /pools`: List live pools with pagination and optional owner
/// filter.
///
/// # Errors
///
/// Returns [`GatewayError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/pools",
    tag = "Pools",
    summary = "List pools",
    description = "Returns a paginated list of live pools, oldest first, optionally filtered by owner.",
    params(PoolListParams),
    responses(
        (status = 200, description = "Paginated pool list", body = PoolListResponse),
    )
)]
pub async fn list_pools(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PoolListParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let owner = params.owner.as_deref().map(Principal::new);
    let entries = state.ledger_service.list_pools(owner.as_ref()).await;

    let (page, pagination) = params.pagination().paginate(entries);
    Ok(Json(PoolListResponse {
        data: page.into_iter().map(PoolResponse::from).collect(),
        pagination,
    }))
}

/// `GET /pools/{id}`: Get pool details.
///
/// # Errors
///
/// Returns `KeyNotFound` if the pool is not live.
#[utoipa::path(
    get,
    path = "/api/v1/pools/{id}",
    tag = "Pools",
    summary = "Get pool details",
    params(("id" = uuid::Uuid, Path, description = "Pool UUID")),
    responses(
        (status = 200, description = "Pool details", body = PoolResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
    )
)]
pub async fn get_pool(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let entry = state.ledger_service.get_pool(PoolId::from_uuid(id)).await?;
    Ok(Json(PoolResponse::from(entry)))
}

/// `PUT /pools/{id}`: Replace a pool's name, description and minimum
/// stake.
///
/// # Errors
///
/// Returns `KeyNotFound`, `AddressUnauthorised` or `EmptyString`.
#[utoipa::path(
    put,
    path = "/api/v1/pools/{id}",
    tag = "Pools",
    summary = "Update a pool",
    description = "Owner-only. The new minimum stake applies to future escrows; existing balances are untouched.",
    params(
        ("id" = uuid::Uuid, Path, description = "Pool UUID"),
        ("x-principal" = String, Header, description = "Calling principal"),
    ),
    request_body = UpdatePoolRequest,
    responses(
        (status = 200, description = "Pool updated", body = PoolResponse),
        (status = 400, description = "Empty name or malformed stake", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
    )
)]
pub async fn update_pool(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<uuid::Uuid>,
    ApiJson(req): ApiJson<UpdatePoolRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let min_stake = req.min_stake.get();
    let entry = state
        .ledger_service
        .update_pool(
            &caller,
            PoolId::from_uuid(id),
            req.name,
            req.description,
            min_stake,
        )
        .await?;

    Ok(Json(PoolResponse::from(entry)))
}

/// `DELETE /pools/{id}`: Remove a pool.
///
/// # Errors
///
/// Returns `KeyNotFound` or `AddressUnauthorised`.
#[utoipa::path(
    delete,
    path = "/api/v1/pools/{id}",
    tag = "Pools",
    summary = "Delete a pool",
    description = "Owner-only. Escrows pledged against the pool are not affected.",
    params(
        ("id" = uuid::Uuid, Path, description = "Pool UUID"),
        ("x-principal" = String, Header, description = "Calling principal"),
    ),
    responses(
        (status = 204, description = "Pool deleted"),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
    )
)]
pub async fn delete_pool(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    state
        .ledger_service
        .delete_pool(&caller, PoolId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pool management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pools", post(create_pool).get(list_pools))
        .route(
            "/pools/{id}",
            get(get_pool).put(update_pool).delete(delete_pool),
        )
}
