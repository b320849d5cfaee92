//! Data Transfer Objects for REST request/response serialization.
//!
//! All stake amounts are serialized as JSON strings to prevent precision
//! loss on u128 values; requests accept either a string or an integer.

pub mod common_dto;
pub mod escrow_dto;
pub mod pool_dto;

pub use common_dto::*;
pub use escrow_dto::*;
pub use pool_dto::*;
