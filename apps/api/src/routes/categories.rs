//! Category API (read-only; the registry is fixed by migration)

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use espetinho_core::{Category, StockItemDetails};

use crate::dto::CategoryProductsResponse;
use crate::error::{ApiError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/categorias", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{id}", get(get_by_id))
        .route("/{id}/produtos", get(products))
        .route("/{id}/estoques", get(available_stock))
}

/// GET /api/categorias
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list().await?))
}

/// GET /api/categorias/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = state
        .db
        .categories()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    Ok(Json(category))
}

/// GET /api/categorias/{id}/produtos
pub async fn products(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CategoryProductsResponse>> {
    let full = state.db.categories().with_products(id).await?;
    Ok(Json(CategoryProductsResponse {
        category: full.category,
        products: full.products.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/categorias/{id}/estoques - available stock rows only
pub async fn available_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<StockItemDetails>>> {
    if state.db.categories().get(id).await?.is_none() {
        return Err(ApiError::not_found("Category", id));
    }
    Ok(Json(state.db.stock().available_by_category(id).await?))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{create_product, get, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_list_categories() {
        let (app, _db) = test_app().await;

        let (status, json) = get(&app, "/api/categorias").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["ESPETOS", "BEBIDAS", "INSUMOS"]);
    }

    #[tokio::test]
    async fn test_category_products() {
        let (app, _db) = test_app().await;
        create_product(&app, "Espeto de Frango", 10.0, 1).await;
        create_product(&app, "Água Mineral", 3.5, 2).await;

        let (status, json) = get(&app, "/api/categorias/1/produtos").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "ESPETOS");
        let products = json["products"].as_array().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["name"], "Espeto de Frango");
        assert_eq!(products[0]["unit_price"], 10.0);

        let (status, json) = get(&app, "/api/categorias/2/estoques").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let (app, _db) = test_app().await;

        for uri in ["/api/categorias/9", "/api/categorias/9/produtos", "/api/categorias/9/estoques"] {
            let (status, _) = get(&app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }
}
