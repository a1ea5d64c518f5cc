//! HTTP routes.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use garage_core::model::fields_from_value;
use garage_core::{DeleteOutcome, DocId, Document, DocumentStore, Fields, Revision};

use crate::error::ApiError;
use crate::inventory::Inventory;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Optional revision precondition on update and delete.
#[derive(Debug, Default, Deserialize)]
pub struct RevQuery {
    pub rev: Option<String>,
}

impl RevQuery {
    fn revision(self) -> garage_core::Result<Option<Revision>> {
        self.rev.map(Revision::new).transpose()
    }
}

/// Build the API router around a shared inventory.
///
/// CORS is open to any origin, method and header.
pub fn router<S>(inventory: Arc<Inventory<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/create", post(create::<S>))
        .route("/readall", get(read_all::<S>))
        .route("/read/:id", get(read_one::<S>))
        .route("/update/:id", put(update::<S>))
        .route("/delete/:id", delete(remove::<S>))
        .with_state(inventory)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Parse a request body as a JSON object.
///
/// Malformed or non-object bodies are reported as an [`ApiError`] like any
/// other failure.
fn body_fields(body: &Bytes) -> garage_core::Result<Fields> {
    let value: Value = serde_json::from_slice(body)?;
    fields_from_value(value)
}

async fn create<S: DocumentStore>(
    State(inventory): State<Arc<Inventory<S>>>,
    body: Bytes,
) -> ApiResult<Document> {
    let fields = body_fields(&body)?;
    Ok(Json(inventory.create(fields).await?))
}

async fn read_all<S: DocumentStore>(
    State(inventory): State<Arc<Inventory<S>>>,
) -> ApiResult<Vec<Document>> {
    Ok(Json(inventory.read_all().await?))
}

async fn read_one<S: DocumentStore>(
    State(inventory): State<Arc<Inventory<S>>>,
    Path(id): Path<String>,
) -> ApiResult<Document> {
    let id = DocId::new(id)?;
    Ok(Json(inventory.read_one(&id).await?))
}

async fn update<S: DocumentStore>(
    State(inventory): State<Arc<Inventory<S>>>,
    Path(id): Path<String>,
    Query(query): Query<RevQuery>,
    body: Bytes,
) -> ApiResult<Document> {
    let id = DocId::new(id)?;
    let rev = query.revision()?;
    let patch = body_fields(&body)?;
    Ok(Json(inventory.update(&id, patch, rev).await?))
}

async fn remove<S: DocumentStore>(
    State(inventory): State<Arc<Inventory<S>>>,
    Path(id): Path<String>,
    Query(query): Query<RevQuery>,
) -> ApiResult<DeleteOutcome> {
    let id = DocId::new(id)?;
    let rev = query.revision()?;
    Ok(Json(inventory.delete(&id, rev).await?))
}
