//! Caller identity.
//!
//! A [`Principal`] is the already-authenticated identity of whoever issues
//! an operation. The ledger never inspects it beyond equality: it is
//! recorded as the owner of pools and escrows, and compared against that
//! owner on every mutation.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Opaque caller identity, e.g. an account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Wraps an identity string.
    #[must_use]
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(identity: &str) -> Self {
        Self::new(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact() {
        assert_eq!(Principal::from("0xabc"), Principal::new("0xabc".to_string()));
        assert_ne!(Principal::from("0xabc"), Principal::from("0xABC"));
    }
}
