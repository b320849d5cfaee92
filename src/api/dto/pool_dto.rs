//! Pool-related DTOs for create, update, get and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{
    AmountDto, PaginationMeta, PaginationParams, default_page, default_per_page,
};
use crate::domain::{PoolEntry, PoolId, Principal};

/// Request body for `POST /pools`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePoolRequest {
    /// Pool name; must not be empty.
    pub name: String,
    /// Optional description, defaults to empty.
    #[serde(default)]
    pub description: String,
    /// Minimum stake for escrows created against the pool.
    pub min_stake: AmountDto,
}

/// Request body for `PUT /pools/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePoolRequest {
    /// New pool name; must not be empty.
    pub name: String,
    /// New description, defaults to empty.
    #[serde(default)]
    pub description: String,
    /// New minimum stake.
    pub min_stake: AmountDto,
}

/// Pool representation returned by every pool endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolResponse {
    /// Pool identifier.
    pub pool_id: PoolId,
    /// Owning principal.
    pub owner: Principal,
    /// Pool name.
    pub name: String,
    /// Pool description.
    pub description: String,
    /// Minimum stake (string-encoded u128).
    pub min_stake: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<PoolEntry> for PoolResponse {
    fn from(entry: PoolEntry) -> Self {
        Self {
            pool_id: entry.pool_id,
            owner: entry.owner,
            name: entry.name,
            description: entry.description,
            min_stake: entry.min_stake.to_string(),
            created_at: entry.created_at,
            updated_at: entry.last_modified_at,
        }
    }
}

/// Query parameters for `GET /pools`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PoolListParams {
    /// Only pools owned by this principal.
    #[serde(default)]
    pub owner: Option<String>,
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl PoolListParams {
    /// Returns the pagination part of the query.
    #[must_use]
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Paginated list response for `GET /pools`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolListResponse {
    /// Pools on this page.
    pub data: Vec<PoolResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
