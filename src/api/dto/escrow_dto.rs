//! Escrow-related DTOs for create, deposit, withdraw, get and list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{
    AmountDto, PaginationMeta, PaginationParams, default_page, default_per_page,
};
use crate::domain::{EscrowEntry, EscrowId, PoolId, Principal};

/// Request body for `POST /escrows`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEscrowRequest {
    /// Pool to pledge against.
    pub pool_id: PoolId,
    /// Initial balance; must be at least the pool's minimum stake.
    pub value: AmountDto,
}

/// Request body for `POST /escrows/{id}/deposit`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DepositRequest {
    /// Value to add to the balance.
    pub value: AmountDto,
}

/// Request body for `POST /escrows/{id}/withdraw`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct WithdrawRequest {
    /// Amount to take from the balance.
    pub amount: AmountDto,
}

/// Escrow representation returned by mutation and list endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct EscrowResponse {
    /// Escrow identifier.
    pub escrow_id: EscrowId,
    /// Pool the escrow is pledged against.
    pub pool_id: PoolId,
    /// Owning principal.
    pub owner: Principal,
    /// Current balance (string-encoded u128).
    pub balance: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last balance change.
    pub updated_at: DateTime<Utc>,
}

impl From<EscrowEntry> for EscrowResponse {
    fn from(entry: EscrowEntry) -> Self {
        Self {
            escrow_id: entry.escrow_id,
            pool_id: entry.pool_id,
            owner: entry.owner,
            balance: entry.balance.to_string(),
            created_at: entry.created_at,
            updated_at: entry.last_modified_at,
        }
    }
}

/// Single escrow detail for `GET /escrows/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EscrowDetailResponse {
    /// Escrow fields.
    #[serde(flatten)]
    pub escrow: EscrowResponse,
    /// Whether the pool the escrow was created against still exists.
    pub pool_live: bool,
}

/// Query parameters for `GET /escrows`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EscrowListParams {
    /// Only escrows pledged against this pool.
    #[serde(default)]
    pub pool_id: Option<uuid::Uuid>,
    /// Only escrows owned by this principal.
    #[serde(default)]
    pub owner: Option<String>,
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl EscrowListParams {
    /// Returns the pagination part of the query.
    #[must_use]
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Paginated list response for `GET /escrows`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EscrowListResponse {
    /// Escrows on this page.
    pub data: Vec<EscrowResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
