//! Product API
//!
//! Every write goes through the product repository, which keeps each
//! product and its stock row in one transaction.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use espetinho_core::{NewProduct, ProductUpdate};
use tracing::info;

use crate::dto::{
    CreateProductRequest, CreatedProductResponse, ProductResponse, UpdateProductRequest,
};
use crate::error::{created, ok_message, ApiError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/produtos", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /api/produtos - newest first
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.db.products().list_with_details().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/produtos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductResponse>> {
    let product = state
        .db
        .products()
        .get_with_details(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;
    Ok(Json(product.into()))
}

/// POST /api/produtos
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<impl IntoResponse> {
    let input = NewProduct::try_from(payload)?;
    let ids = state.db.products().create_with_stock(&input).await?;

    info!(product_id = ids.product_id, name = %input.name, "Product created via API");
    Ok(created(CreatedProductResponse::from(ids), "Product created"))
}

/// PUT /api/produtos/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<impl IntoResponse> {
    let input = ProductUpdate::try_from(payload)?;
    state.db.products().update_with_stock(id, &input).await?;
    Ok(ok_message("Product updated"))
}

/// DELETE /api/produtos/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.db.products().delete_with_stock(id).await?;
    Ok(ok_message("Product deleted"))
}
