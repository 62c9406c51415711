//! Order API
//!
//! ```text
//! POST /api/pedidos ──► place_order ──► customer by phone ──► order + items (one tx)
//! PUT  /api/pedidos/{id}/status ──► any of the five statuses, irregular moves logged
//! GET  /api/pedidos/estatisticas ──► trailing 24h count and revenue
//! ```

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use espetinho_core::NewOrder;
use espetinho_db::place_order;
use tracing::info;

use crate::dto::{
    CreateOrderRequest, CreatedOrderResponse, OrderDetailResponse, OrderResponse,
    StatisticsResponse, StatusRequest,
};
use crate::error::{created, ok_message, ApiError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/pedidos", routes())
        .route("/api/estatisticas", get(statistics))
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        // Fixed segments before /{id}
        .route("/pendentes", get(pending))
        .route("/estatisticas", get(statistics))
        .route("/{id}", get(get_by_id))
        .route("/{id}/status", put(update_status))
}

/// GET /api/pedidos - newest first, with customer name and phone
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = state.db.orders().list().await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// POST /api/pedidos
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<impl IntoResponse> {
    let request = NewOrder::try_from(payload)?;
    let order = place_order(&state.db, &request).await?;

    info!(order_id = order.id, total = %order.total(), "Order placed");
    Ok(created(CreatedOrderResponse::from(order), "Order created"))
}

/// GET /api/pedidos/pendentes - oldest first, the kitchen queue
pub async fn pending(State(state): State<AppState>) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = state.db.orders().pending().await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /api/pedidos/estatisticas and /api/estatisticas
pub async fn statistics(State(state): State<AppState>) -> AppResult<Json<StatisticsResponse>> {
    let stats = state.db.statistics().compute(Utc::now()).await?;
    Ok(Json(stats.into()))
}

/// GET /api/pedidos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetailResponse>> {
    let order = state
        .db
        .orders()
        .get_with_items(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", id))?;
    Ok(Json(order.into()))
}

/// PUT /api/pedidos/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusRequest>,
) -> AppResult<impl IntoResponse> {
    state.db.orders().update_status(id, &payload.status).await?;
    Ok(ok_message("Order status updated"))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{create_product, get, post, put, test_app};
    use axum::http::StatusCode;
    use axum::Router;
    use serde_json::{json, Value};

    async fn place(app: &Router, product_id: i64) -> Value {
        let (status, json) = post(
            app,
            "/api/pedidos",
            json!({
                "cliente": "Ana",
                "telefone": "5561999999999",
                "itens": [{ "id_produto": product_id, "quantidade": 2, "preco_unitario": 12.50 }],
                "valor_total": 25.00
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json
    }

    #[tokio::test]
    async fn test_place_and_read_order() {
        let (app, _db) = test_app().await;
        let product_id = create_product(&app, "Beef Skewer", 12.50, 1).await;

        let json = place(&app, product_id).await;
        assert_eq!(json["data"]["status"], "PENDING");
        assert_eq!(json["data"]["total"], 25.0);
        assert!(json["data"]["customer_id"].is_i64());
        let order_id = json["data"]["order_id"].as_i64().unwrap();

        let (status, json) = get(&app, &format!("/api/pedidos/{order_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["customer_name"], "Ana");
        assert_eq!(json["customer_phone"], "5561999999999");
        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["quantity"], 2);
        assert_eq!(items[0]["unit_price"], 12.5);
        assert_eq!(items[0]["product_name"], "Beef Skewer");
    }

    #[tokio::test]
    async fn test_invalid_order_is_rejected() {
        let (app, db) = test_app().await;

        let (status, json) = post(
            &app,
            "/api/pedidos",
            json!({ "cliente": "Ana", "telefone": "5561999999999", "valor_total": 0 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");

        let (status, _) = post(
            &app,
            "/api/pedidos",
            json!({ "telefone": "5561999999999", "valor_total": 10 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(db.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overflowing_quantity_is_rejected() {
        let (app, db) = test_app().await;
        let product_id = create_product(&app, "Beef Skewer", 12.50, 1).await;

        let (status, json) = post(
            &app,
            "/api/pedidos",
            json!({
                "cliente": "Ana",
                "telefone": "5561999999999",
                "itens": [{
                    "id_produto": product_id,
                    "quantidade": 4611686018427387903_i64,
                    "preco_unitario": 12.50
                }],
                "valor_total": 25.00
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{json}");
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(db.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_finite_amounts_are_rejected() {
        let (app, db) = test_app().await;
        let product_id = create_product(&app, "Beef Skewer", 12.50, 1).await;

        for (price, total) in [("inf", "25"), ("12.5", "1e300")] {
            let (status, json) = post(
                &app,
                "/api/pedidos",
                json!({
                    "cliente": "Ana",
                    "telefone": "5561999999999",
                    "itens": [{ "id_produto": product_id, "quantidade": 2, "preco_unitario": price }],
                    "valor_total": total
                }),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{json}");
            assert_eq!(json["code"], "VALIDATION_ERROR");
        }
        assert!(db.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_rolls_back() {
        let (app, db) = test_app().await;

        let (status, _) = post(
            &app,
            "/api/pedidos",
            json!({
                "cliente": "Ana",
                "telefone": "5561999999999",
                "itens": [{ "id_produto": 999, "quantidade": 1, "preco_unitario": 5 }],
                "valor_total": 5
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(db.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_updates() {
        let (app, _db) = test_app().await;
        let product_id = create_product(&app, "Beef Skewer", 12.50, 1).await;
        let order_id = place(&app, product_id).await["data"]["order_id"].as_i64().unwrap();

        let (status, _) = get(&app, "/api/pedidos/pendentes").await;
        assert_eq!(status, StatusCode::OK);

        let uri = format!("/api/pedidos/{order_id}/status");
        let (status, _) = put(&app, &uri, json!({ "status": "PREPARING" })).await;
        assert_eq!(status, StatusCode::OK);

        let (_, pending) = get(&app, "/api/pedidos/pendentes").await;
        assert!(pending.as_array().unwrap().is_empty());

        // Legacy name, irregular move: accepted
        let (status, _) = put(&app, &uri, json!({ "status": "pendente" })).await;
        assert_eq!(status, StatusCode::OK);
        let (_, json) = get(&app, &format!("/api/pedidos/{order_id}")).await;
        assert_eq!(json["status"], "PENDING");

        let (status, json) = put(&app, &uri, json!({ "status": "COOKING" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");

        let (status, _) = put(&app, "/api/pedidos/999/status", json!({ "status": "READY" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_statistics() {
        let (app, _db) = test_app().await;

        let (status, json) = get(&app, "/api/estatisticas").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["order_count"], 0);
        assert_eq!(json["revenue"], 0.0);

        let product_id = create_product(&app, "Beef Skewer", 12.50, 1).await;
        place(&app, product_id).await;
        place(&app, product_id).await;

        let (_, json) = get(&app, "/api/pedidos/estatisticas").await;
        assert_eq!(json["order_count"], 2);
        assert_eq!(json["revenue"], 50.0);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let (app, _db) = test_app().await;
        let (status, json) = get(&app, "/api/pedidos/12").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Order not found: 12");
    }
}
