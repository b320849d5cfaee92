//! Shared DTO types used across multiple endpoints.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use utoipa::ToSchema;

/// Stake amount as provided in request bodies.
///
/// Accepts a decimal string or a bare JSON integer, both over the full u128
/// range. The raw JSON token is read directly, since serde_json hands
/// integers above `u64::MAX` to generic visitors as floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[schema(value_type = String, example = "1050975209")]
pub struct AmountDto(u128);

impl AmountDto {
    /// Returns the amount in stake units.
    #[must_use]
    pub const fn get(self) -> u128 {
        self.0
    }
}

impl<'de> Deserialize<'de> for AmountDto {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        parse_amount(raw.get()).map(Self).map_err(de::Error::custom)
    }
}

/// Parses one raw JSON token as a non-negative integer amount.
fn parse_amount(raw: &str) -> Result<u128, String> {
    let raw = raw.trim();
    let (digits, quoted) = match raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(inner) => (inner, true),
        None => (raw, false),
    };
    if digits.starts_with('-') {
        return Err(format!("amount must not be negative, got {raw}"));
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(if quoted {
            format!("amount string must be decimal digits, got {raw}")
        } else {
            format!("amount must be a decimal string or a non-negative integer, got {raw}")
        });
    }
    digits
        .parse()
        .map_err(|_| format!("amount {digits} exceeds the u128 range"))
}

/// Pagination query parameters for list endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Items per page (max 100).
    pub per_page: u32,
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_per_page() -> u32 {
    20
}

impl PaginationParams {
    /// Clamps `page` to at least 1 and `per_page` to 1..=100.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
        }
    }

    /// Cuts one page out of `items` and describes it.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>) -> (Vec<T>, PaginationMeta) {
        let Self { page, per_page } = self.clamped();
        let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
        let total_pages = total.div_ceil(per_page);

        let start = usize::try_from(u64::from(page - 1) * u64::from(per_page)).unwrap_or(usize::MAX);
        let data = items
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        (
            data,
            PaginationMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        )
    }
}
