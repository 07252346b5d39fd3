//! Entity CRUD handlers: create, update, list, get, delete.
//!
//! Every handler is generic over the entity; [`crate::routes::entity_routes`] instantiates
//! them once per type.

use crate::domain::{Entity, ListingMode};
use crate::error::AppError;
use crate::extractors::PageQuery;
use crate::response::{pagination_headers, Alerts};
use crate::service::CrudService;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Handler state for one entity type.
pub struct EntityContext<E: Entity> {
    pub service: CrudService<E>,
    pub alerts: Arc<Alerts>,
}

impl<E: Entity> Clone for EntityContext<E> {
    fn clone(&self) -> Self {
        EntityContext {
            service: self.service.clone(),
            alerts: Arc::clone(&self.alerts),
        }
    }
}

impl<E: Entity> EntityContext<E> {
    pub fn new(service: CrudService<E>, alerts: Arc<Alerts>) -> Self {
        EntityContext { service, alerts }
    }
}

fn collection_url<E: Entity>() -> String {
    format!("/api{}", E::PATH)
}

/// POST: 400 with a failure alert when the record already has an id, else 201 with `Location`.
pub async fn create<E: Entity>(
    State(ctx): State<EntityContext<E>>,
    Json(record): Json<E>,
) -> Result<Response, AppError> {
    tracing::debug!(record = ?record, "REST request to save {}", E::LABEL);
    create_record(&ctx, record).await
}

async fn create_record<E: Entity>(ctx: &EntityContext<E>, record: E) -> Result<Response, AppError> {
    if record.id().is_some() {
        let message = format!("A new {} cannot already have an ID", E::NAME);
        let headers = ctx.alerts.failure(E::NAME, "idexists", &message)?;
        return Ok((StatusCode::BAD_REQUEST, headers).into_response());
    }
    let saved = ctx.service.save(record).await?;
    let id = saved
        .id()
        .ok_or_else(|| AppError::Internal(format!("store assigned no id to {}", E::LABEL)))?
        .to_string();
    let mut headers = ctx.alerts.entity_created(E::NAME, &id)?;
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&format!("{}/{}", collection_url::<E>(), id))?,
    );
    Ok((StatusCode::CREATED, headers, Json(saved)).into_response())
}

/// PUT: a record without an id is created; otherwise it overwrites the stored one.
pub async fn update<E: Entity>(
    State(ctx): State<EntityContext<E>>,
    Json(record): Json<E>,
) -> Result<Response, AppError> {
    tracing::debug!(record = ?record, "REST request to update {}", E::LABEL);
    let Some(id) = record.id() else {
        return create_record(&ctx, record).await;
    };
    let saved = ctx.service.save(record).await?;
    let headers = ctx.alerts.entity_updated(E::NAME, &id.to_string())?;
    Ok((StatusCode::OK, headers, Json(saved)).into_response())
}

/// GET collection: a page with pagination headers, or every row, per [`Entity::LISTING`].
pub async fn list<E: Entity>(
    State(ctx): State<EntityContext<E>>,
    PageQuery(request): PageQuery,
) -> Result<Response, AppError> {
    match E::LISTING {
        ListingMode::Paged => {
            tracing::debug!(page = request.page, size = request.size, "REST request to get a page of {}s", E::LABEL);
            request.ensure_sortable(E::is_sortable)?;
            let page = ctx.service.find_page(&request).await?;
            let headers = pagination_headers(&page, &collection_url::<E>())?;
            Ok((StatusCode::OK, headers, Json(page.content)).into_response())
        }
        ListingMode::Unpaged => {
            tracing::debug!("REST request to get all {}s", E::LABEL);
            let rows = ctx.service.find_all().await?;
            Ok((StatusCode::OK, Json(rows)).into_response())
        }
    }
}

/// GET by id: 404 with an empty body when absent.
pub async fn read<E: Entity>(
    State(ctx): State<EntityContext<E>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    tracing::debug!(id, "REST request to get {}", E::LABEL);
    Ok(match ctx.service.find_one(id).await? {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// DELETE by id: always 200 with a deletion alert, whether or not the id existed.
pub async fn delete<E: Entity>(
    State(ctx): State<EntityContext<E>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    tracing::debug!(id, "REST request to delete {}", E::LABEL);
    ctx.service.delete(id).await?;
    let headers = ctx.alerts.entity_deleted(E::NAME, &id.to_string())?;
    Ok((StatusCode::OK, headers).into_response())
}
