//! Ledger and gateway error types with HTTP status code mapping.
//!
//! [`LedgerError`] is the domain taxonomy returned by the pool registry and
//! escrow ledger. [`GatewayError`] is the central error type for the
//! gateway: it wraps [`LedgerError`] and adds transport-level failures. Each
//! variant maps to a specific HTTP status code and structured JSON error
//! response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4002,
///     "reason": "InsufficientBalance",
///     "message": "insufficient balance: requested 11, available 10"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code, stable reason and message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Stable machine-readable reason, e.g. `"KeyNotFound"`.
    pub reason: String,
    /// Human-readable error message.
    pub message: String,
}

/// Failure taxonomy of the pool registry and escrow ledger.
///
/// A failed operation reports exactly one of these and leaves all ledger
/// state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A required text field was empty.
    #[error("required text field is empty")]
    EmptyString,

    /// The identifier does not resolve to a live pool or escrow.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The caller is not the recorded owner of the entity.
    #[error("caller is not the owner of {0}")]
    AddressUnauthorised(String),

    /// Escrow creation value is below the pool's minimum stake.
    #[error("insufficient stake: pool requires {required}, provided {provided}")]
    InsufficientStake {
        /// The pool's configured minimum stake.
        required: u128,
        /// The value offered at escrow creation.
        provided: u128,
    },

    /// Withdrawal amount exceeds the current escrow balance.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount the caller asked to withdraw.
        requested: u128,
        /// Current escrow balance.
        available: u128,
    },

    /// A deposit would push the balance past `u128::MAX`.
    #[error("deposit of {value} overflows balance {balance}")]
    BalanceOverflow {
        /// Current escrow balance.
        balance: u128,
        /// Deposit value.
        value: u128,
    },
}

impl LedgerError {
    /// Returns the stable taxonomy name of this error.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::EmptyString => "EmptyString",
            Self::KeyNotFound(_) => "KeyNotFound",
            Self::AddressUnauthorised(_) => "AddressUnauthorised",
            Self::InsufficientStake { .. } => "InsufficientStake",
            Self::InsufficientBalance { .. } => "InsufficientBalance",
            Self::BalanceOverflow { .. } => "BalanceOverflow",
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                   |
/// |-----------|-----------------|-------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request / 401         |
/// | 2000–2999 | Lookup / Access | 404 Not Found / 403 Forbidden |
/// | 3000–3999 | Server          | 500 Internal Server Error     |
/// | 4000–4999 | Stake / Balance | 422 Unprocessable Entity      |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Error propagated from the ledger state machine.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Request validation failed before reaching the ledger.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request carried no caller principal.
    #[error("missing or empty caller principal header")]
    MissingPrincipal,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the stable machine-readable reason for this variant.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Ledger(err) => err.reason(),
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::MissingPrincipal => "MissingPrincipal",
            Self::Internal(_) => "Internal",
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Ledger(LedgerError::EmptyString) => 1002,
            Self::MissingPrincipal => 1003,
            Self::Ledger(LedgerError::KeyNotFound(_)) => 2001,
            Self::Ledger(LedgerError::AddressUnauthorised(_)) => 2002,
            Self::Internal(_) => 3000,
            Self::Ledger(LedgerError::InsufficientStake { .. }) => 4001,
            Self::Ledger(LedgerError::InsufficientBalance { .. }) => 4002,
            Self::Ledger(LedgerError::BalanceOverflow { .. }) => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::Ledger(LedgerError::EmptyString) => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingPrincipal => StatusCode::UNAUTHORIZED,
            Self::Ledger(LedgerError::KeyNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Ledger(LedgerError::AddressUnauthorised(_)) => StatusCode::FORBIDDEN,
            Self::Ledger(
                LedgerError::InsufficientStake { .. }
                | LedgerError::InsufficientBalance { .. }
                | LedgerError::BalanceOverflow { .. },
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                reason: self.reason().to_string(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
