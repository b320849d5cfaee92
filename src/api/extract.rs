//! Request extractors shared by the REST handlers.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::domain::Principal;
use crate::error::GatewayError;

/// Header carrying the calling principal.
pub const PRINCIPAL_HEADER: &str = "x-principal";

/// Caller identity taken from the [`PRINCIPAL_HEADER`] header.
///
/// Rejects with [`GatewayError::MissingPrincipal`] when the header is
/// absent, not valid UTF-8, or blank.
#[derive(Debug, Clone)]
pub struct Caller(pub Principal);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(GatewayError::MissingPrincipal)?;
        Ok(Self(Principal::new(value)))
    }
}

/// JSON body extractor whose rejections render as
/// [`GatewayError::InvalidRequest`].
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Path extractor whose rejections render as
/// [`GatewayError::InvalidRequest`].
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query-string extractor whose rejections render as
/// [`GatewayError::InvalidRequest`].
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}
