//! Extract a [`PageRequest`] from `page`, `size` and `sort` query parameters.

use crate::page::PageRequest;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

/// Never rejects: malformed query strings yield the default page request.
#[derive(Clone, Debug)]
pub struct PageQuery(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| PageRequest::from_query(&pairs))
            .unwrap_or_default();
        Ok(PageQuery(request))
    }
}
