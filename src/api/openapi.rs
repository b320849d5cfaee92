//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::handlers::{escrow, pool, system};

/// Aggregated OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "world-pool-gateway",
        description = "Stake pools and the escrows pledged against them."
    ),
    paths(
        pool::create_pool,
        pool::list_pools,
        pool::get_pool,
        pool::update_pool,
        pool::delete_pool,
        escrow::create_escrow,
        escrow::list_escrows,
        escrow::get_escrow,
        escrow::deposit_escrow,
        escrow::withdraw_escrow,
        system::health_handler,
    ),
    tags(
        (name = "Pools", description = "Pool lifecycle"),
        (name = "Escrows", description = "Escrow lifecycle and balances"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;
