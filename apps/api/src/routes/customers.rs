//! Customer API (read-only; customers are created by checkout)

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use espetinho_core::validation::validate_required;
use espetinho_core::Customer;
use serde::Deserialize;

use crate::dto::CustomerOrderResponse;
use crate::error::{ApiError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PhoneQuery {
    #[serde(default, alias = "telefone")]
    pub phone: String,
}

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/clientes", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_by_phone))
        .route("/{id}", get(get_by_id))
        .route("/{id}/pedidos", get(orders))
}

/// GET /api/clientes?telefone=...
pub async fn find_by_phone(
    State(state): State<AppState>,
    Query(query): Query<PhoneQuery>,
) -> AppResult<Json<Customer>> {
    validate_required("phone", &query.phone)?;

    let customer = state
        .db
        .customers()
        .find_by_phone(&query.phone)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", query.phone.trim()))?;
    Ok(Json(customer))
}

/// GET /api/clientes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let customer = state
        .db
        .customers()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", id))?;
    Ok(Json(customer))
}

/// GET /api/clientes/{id}/pedidos - newest first
pub async fn orders(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<CustomerOrderResponse>>> {
    if state.db.customers().get(id).await?.is_none() {
        return Err(ApiError::not_found("Customer", id));
    }

    let orders = state.db.customers().orders_of(id).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{create_product, get, post, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_customer_history() {
        let (app, _db) = test_app().await;
        let product_id = create_product(&app, "Espeto de Frango", 10.0, 1).await;

        for quantity in [1, 3] {
            let (status, _) = post(
                &app,
                "/api/pedidos",
                json!({
                    "customer_name": "Bruno",
                    "phone": "5561988887777",
                    "items": [{ "product_id": product_id, "quantity": quantity, "unit_price": 10.0 }],
                    "total": 10.0 * quantity as f64
                }),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, customer) = get(&app, "/api/clientes?telefone=5561988887777").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(customer["name"], "Bruno");
        let id = customer["id"].as_i64().unwrap();

        let (status, json) = get(&app, &format!("/api/clientes/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["phone"], "5561988887777");

        let (status, json) = get(&app, &format!("/api/clientes/{id}/pedidos")).await;
        assert_eq!(status, StatusCode::OK);
        let orders = json.as_array().unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0]["total"], 30.0);
        assert_eq!(orders[0]["item_count"], 1);
    }

    #[tokio::test]
    async fn test_unknown_customer() {
        let (app, _db) = test_app().await;

        let (status, _) = get(&app, "/api/clientes/5").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get(&app, "/api/clientes/5/pedidos").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get(&app, "/api/clientes?telefone=000").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get(&app, "/api/clientes").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
