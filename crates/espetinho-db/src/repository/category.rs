//! Category Repository
//!
//! The registry is fixed by migration; this repository only reads it.

use espetinho_core::{Category, CategoryWithProducts, ProductDetails};
use sqlx::SqlitePool;
use tracing::debug;

use super::product::PRODUCT_DETAILS_SELECT;
use super::table::TableRepository;
use crate::error::{DbError, DbResult};

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    base: TableRepository<Category>,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository {
            base: TableRepository::new(pool),
        }
    }

    /// All categories ordered by id (1 ESPETOS, 2 BEBIDAS, 3 INSUMOS).
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        self.base.find_all().await
    }

    pub async fn get(&self, id: i64) -> DbResult<Option<Category>> {
        self.base.find_by_id(id).await
    }

    /// Products whose stock row is filed under `category_id`, by name.
    pub async fn products_of(&self, category_id: i64) -> DbResult<Vec<ProductDetails>> {
        let sql = format!("{PRODUCT_DETAILS_SELECT} WHERE s.category_id = ? ORDER BY p.name");
        let products = sqlx::query_as::<_, ProductDetails>(&sql)
            .bind(category_id)
            .fetch_all(self.base.pool())
            .await?;

        debug!(category_id, count = products.len(), "Loaded category products");
        Ok(products)
    }

    /// The category and its products; NotFound for an unknown id.
    pub async fn with_products(&self, id: i64) -> DbResult<CategoryWithProducts> {
        let category = self
            .get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Category", id))?;
        let products = self.products_of(id).await?;

        Ok(CategoryWithProducts { category, products })
    }
}
