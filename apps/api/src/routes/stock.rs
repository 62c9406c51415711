//! Stock ledger API
//!
//! Standalone rows (supplies such as charcoal or skewers) are managed here.
//! Rows owned by a product change through the product endpoints.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use espetinho_core::{StockInput, StockItemDetails};
use tracing::info;

use crate::dto::{AvailabilityRequest, StockRequest};
use crate::error::{created, ok_message, ApiError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/estoques", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
        .route("/{id}/disponibilidade", put(set_availability))
}

/// GET /api/estoques - newest first
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<StockItemDetails>>> {
    Ok(Json(state.db.stock().list().await?))
}

/// GET /api/estoques/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StockItemDetails>> {
    let row = state
        .db
        .stock()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock item", id))?;
    Ok(Json(row))
}

/// POST /api/estoques
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<StockRequest>,
) -> AppResult<impl IntoResponse> {
    let input: StockInput = payload.into();
    let row = state.db.stock().create(&input).await?;

    info!(id = row.id, "Stock item created via API");
    Ok(created(row, "Stock item created"))
}

/// PUT /api/estoques/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockRequest>,
) -> AppResult<impl IntoResponse> {
    let input: StockInput = payload.into();
    state.db.stock().update(id, &input).await?;
    Ok(ok_message("Stock item updated"))
}

/// DELETE /api/estoques/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.db.stock().delete(id).await?;
    Ok(ok_message("Stock item deleted"))
}

/// PUT /api/estoques/{id}/disponibilidade
pub async fn set_availability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AvailabilityRequest>,
) -> AppResult<impl IntoResponse> {
    state.db.stock().set_availability(id, payload.available).await?;
    Ok(ok_message(if payload.available {
        "Stock item available"
    } else {
        "Stock item unavailable"
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{create_product, delete, get, post, put, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_stock_lifecycle() {
        let (app, _db) = test_app().await;

        let (status, json) = post(
            &app,
            "/api/estoques",
            json!({ "descricao": "Carvão 5kg", "id_categoria": 3, "disponivel": true }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json["data"]["id"].as_i64().unwrap();

        let (status, json) = get(&app, &format!("/api/estoques/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["category"], "INSUMOS");

        let (status, _) = put(
            &app,
            &format!("/api/estoques/{id}"),
            json!({ "description": "Carvão 10kg", "category_id": 3, "available": true }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = put(
            &app,
            &format!("/api/estoques/{id}/disponibilidade"),
            json!({ "disponivel": false }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = get(&app, &format!("/api/estoques/{id}")).await;
        assert_eq!(json["description"], "Carvão 10kg");
        assert_eq!(json["available"], false);

        let (status, _) = delete(&app, &format!("/api/estoques/{id}")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = delete(&app, &format!("/api/estoques/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stock_validation() {
        let (app, _db) = test_app().await;

        let (status, _) = post(
            &app,
            "/api/estoques",
            json!({ "description": "ab", "category_id": 3 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = put(
            &app,
            "/api/estoques/77",
            json!({ "description": "Carvão", "category_id": 3 }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_product_stock_row_cannot_be_deleted_directly() {
        let (app, db) = test_app().await;
        let product_id = create_product(&app, "Espeto de Queijo", 9.0, 1).await;
        let stock_id = db.products().get(product_id).await.unwrap().unwrap().stock_id;

        let (status, json) = delete(&app, &format!("/api/estoques/{stock_id}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("in use"));
    }
}
