//! # Request and Response Bodies
//!
//! JSON shapes at the HTTP boundary.
//!
//! Requests use English snake_case names and also accept the Portuguese
//! names the menu site and admin panel send (`nome`, `preco_unitario`,
//! `itens`, ...). Prices cross the boundary as decimals and become
//! [`Money`] here; nothing past this module sees a float. An amount that
//! is not a finite number of cents fails the conversion with a
//! [`ValidationError`].
//!
//! Form posts send numbers and flags as strings, so the numeric and boolean
//! fields also accept `"12.50"`, `"1"`, `"on"` and friends.

use chrono::{DateTime, Utc};
use espetinho_core::{
    Category, CreatedProduct, CustomerOrder, Money, NewOrder, NewOrderItem, NewProduct, Order,
    OrderItemDetails, OrderStatus, OrderSummary, OrderWithItems, ProductDetails, ProductUpdate,
    Statistics, StockInput, ValidationError,
};
use espetinho_core::validation::parse_amount;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Lenient scalars
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => false,
        Some(Scalar::Bool(b)) => b,
        Some(Scalar::Int(n)) => n != 0,
        Some(Scalar::Float(n)) => n != 0.0,
        Some(Scalar::Text(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "on" | "yes" | "sim"
        ),
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Scalar::Int(n)) => Ok(n as f64),
        Some(Scalar::Float(n)) => Ok(n),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Scalar::Text(s)) => s
            .trim()
            .replace(',', ".")
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {}", s))),
        Some(Scalar::Bool(_)) => Err(serde::de::Error::custom("expected a number")),
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Scalar::Int(n)) => Ok(n),
        Some(Scalar::Float(n)) if n.fract() == 0.0 => Ok(n as i64),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(0),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: {}", s))),
        Some(_) => Err(serde::de::Error::custom("expected an integer")),
    }
}

fn decimal(money: Money) -> f64 {
    money.to_decimal()
}

fn cents(value: i64) -> f64 {
    Money::from_cents(value).to_decimal()
}

// =============================================================================
// Products
// =============================================================================

/// POST /api/produtos
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "descricao")]
    pub description: Option<String>,
    #[serde(default, alias = "preco_unitario", deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    #[serde(default, alias = "id_categoria", deserialize_with = "lenient_i64")]
    pub category_id: i64,
    #[serde(default, alias = "disponivel", deserialize_with = "lenient_bool")]
    pub available: bool,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ValidationError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            unit_price: parse_amount("unit_price", req.unit_price)?,
            name: req.name,
            description: req.description.filter(|d| !d.trim().is_empty()),
            category_id: req.category_id,
            available: req.available,
        })
    }
}

/// PUT /api/produtos/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, alias = "preco_unitario", deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    #[serde(default, alias = "descricao")]
    pub description: String,
    #[serde(default, alias = "id_categoria", deserialize_with = "lenient_i64")]
    pub category_id: i64,
    #[serde(default, alias = "disponivel", deserialize_with = "lenient_bool")]
    pub available: bool,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = ValidationError;

    fn try_from(req: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductUpdate {
            unit_price: parse_amount("unit_price", req.unit_price)?,
            description: req.description,
            category_id: req.category_id,
            available: req.available,
        })
    }
}

/// A product as the menu site renders it.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: f64,
    pub stock_id: i64,
    pub category_id: i64,
    pub category: String,
    pub available: bool,
    pub registered_at: DateTime<Utc>,
}

impl From<ProductDetails> for ProductResponse {
    fn from(p: ProductDetails) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            description: p.description,
            unit_price: cents(p.unit_price_cents),
            stock_id: p.stock_id,
            category_id: p.category_id,
            category: p.category,
            available: p.available,
            registered_at: p.registered_at,
        }
    }
}

/// Ids assigned by a product creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedProductResponse {
    pub product_id: i64,
    pub stock_id: i64,
}

impl From<CreatedProduct> for CreatedProductResponse {
    fn from(ids: CreatedProduct) -> Self {
        CreatedProductResponse {
            product_id: ids.product_id,
            stock_id: ids.stock_id,
        }
    }
}

// =============================================================================
// Categories
// =============================================================================

/// GET /api/categorias/{id}/produtos
#[derive(Debug, Clone, Serialize)]
pub struct CategoryProductsResponse {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<ProductResponse>,
}

// =============================================================================
// Stock
// =============================================================================

/// POST and PUT /api/estoques
#[derive(Debug, Clone, Deserialize)]
pub struct StockRequest {
    #[serde(default, alias = "descricao")]
    pub description: String,
    #[serde(default, alias = "id_categoria", deserialize_with = "lenient_i64")]
    pub category_id: i64,
    #[serde(default, alias = "disponivel", deserialize_with = "lenient_bool")]
    pub available: bool,
}

/// PUT /api/estoques/{id}/disponibilidade
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRequest {
    #[serde(default, alias = "disponivel", deserialize_with = "lenient_bool")]
    pub available: bool,
}

impl From<StockRequest> for StockInput {
    fn from(req: StockRequest) -> Self {
        StockInput {
            description: req.description,
            category_id: req.category_id,
            available: req.available,
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// One line of POST /api/pedidos.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    #[serde(default, alias = "id_produto", deserialize_with = "lenient_i64")]
    pub product_id: i64,
    #[serde(default, alias = "quantidade", deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default, alias = "preco_unitario", deserialize_with = "lenient_f64")]
    pub unit_price: f64,
}

/// POST /api/pedidos, sent by the menu site checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default, alias = "cliente")]
    pub customer_name: String,
    #[serde(default, alias = "telefone")]
    pub phone: String,
    #[serde(default, alias = "itens")]
    pub items: Vec<OrderItemRequest>,
    #[serde(default, alias = "valor_total", deserialize_with = "lenient_f64")]
    pub total: f64,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = ValidationError;

    fn try_from(req: CreateOrderRequest) -> Result<Self, Self::Error> {
        let items = req
            .items
            .into_iter()
            .map(|item| {
                Ok(NewOrderItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: parse_amount("unit_price", item.unit_price)?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(NewOrder {
            total: parse_amount("total", req.total)?,
            customer_name: req.customer_name,
            phone: req.phone,
            items,
        })
    }
}

/// PUT /api/pedidos/{id}/status
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub status: String,
}

/// A stored order, as returned right after checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedOrderResponse {
    pub order_id: i64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: f64,
    pub customer_id: Option<i64>,
}

impl From<Order> for CreatedOrderResponse {
    fn from(order: Order) -> Self {
        CreatedOrderResponse {
            order_id: order.id,
            created_at: order.created_at,
            status: order.status,
            total: decimal(order.total()),
            customer_id: order.customer_id,
        }
    }
}

/// Order row in the admin list and the kitchen queue.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: f64,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

impl From<OrderSummary> for OrderResponse {
    fn from(o: OrderSummary) -> Self {
        OrderResponse {
            id: o.id,
            created_at: o.created_at,
            status: o.status,
            total: cents(o.total_cents),
            customer_id: o.customer_id,
            customer_name: o.customer_name,
            customer_phone: o.customer_phone,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_description: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

impl From<OrderItemDetails> for OrderItemResponse {
    fn from(item: OrderItemDetails) -> Self {
        OrderItemResponse {
            id: item.id,
            product_id: item.product_id,
            product_name: item.product_name,
            product_description: item.product_description,
            quantity: item.quantity,
            unit_price: cents(item.unit_price_cents),
            line_total: cents(item.unit_price_cents.saturating_mul(item.quantity)),
        }
    }
}

/// GET /api/pedidos/{id}
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderWithItems> for OrderDetailResponse {
    fn from(full: OrderWithItems) -> Self {
        OrderDetailResponse {
            order: full.order.into(),
            items: full.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// GET /api/clientes/{id}/pedidos
#[derive(Debug, Clone, Serialize)]
pub struct CustomerOrderResponse {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: f64,
    pub item_count: i64,
}

impl From<CustomerOrder> for CustomerOrderResponse {
    fn from(o: CustomerOrder) -> Self {
        CustomerOrderResponse {
            id: o.id,
            created_at: o.created_at,
            status: o.status,
            total: cents(o.total_cents),
            item_count: o.item_count,
        }
    }
}

/// Dashboard figures for the trailing 24 hours.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub order_count: i64,
    pub revenue: f64,
    pub window_start: DateTime<Utc>,
    pub computed_at: DateTime<Utc>,
}

impl From<Statistics> for StatisticsResponse {
    fn from(s: Statistics) -> Self {
        StatisticsResponse {
            order_count: s.order_count,
            revenue: decimal(s.revenue),
            window_start: s.window_start,
            computed_at: s.computed_at,
        }
    }
}

// =============================================================================
// Auth
// =============================================================================

/// POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "usuario")]
    pub username: String,
    #[serde(default, alias = "senha")]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_request_accepts_legacy_names() {
        let req: CreateProductRequest = serde_json::from_value(json!({
            "nome": "Espeto de Frango",
            "preco_unitario": "10,50",
            "id_categoria": "1",
            "disponivel": "on"
        }))
        .unwrap();

        let product = NewProduct::try_from(req).unwrap();
        assert_eq!(product.name, "Espeto de Frango");
        assert_eq!(product.unit_price.cents(), 1050);
        assert_eq!(product.category_id, 1);
        assert!(product.available);
        assert!(product.description.is_none());
    }

    #[test]
    fn test_missing_flag_means_unavailable() {
        let req: CreateProductRequest = serde_json::from_value(json!({
            "name": "Farofa",
            "unit_price": 5,
            "category_id": 3
        }))
        .unwrap();
        assert!(!req.available);

        let req: StockRequest = serde_json::from_value(json!({
            "descricao": "Carvão",
            "id_categoria": 3,
            "disponivel": 0
        }))
        .unwrap();
        assert!(!req.available);
    }

    #[test]
    fn test_order_request_accepts_legacy_names() {
        let req: CreateOrderRequest = serde_json::from_value(json!({
            "cliente": "Ana",
            "telefone": "5561999999999",
            "itens": [{ "id_produto": 4, "quantidade": 2, "preco_unitario": 12.5 }],
            "valor_total": 25.0
        }))
        .unwrap();

        let order = NewOrder::try_from(req).unwrap();
        assert_eq!(order.customer_name, "Ana");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].unit_price.cents(), 1250);
        assert_eq!(order.total.cents(), 2500);
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let result: Result<CreateProductRequest, _> = serde_json::from_value(json!({
            "name": "Kafta",
            "unit_price": "doze"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_price_is_a_validation_error() {
        for raw in ["inf", "-inf", "NaN", "1e300"] {
            let req: CreateProductRequest = serde_json::from_value(json!({
                "nome": "Kafta",
                "preco_unitario": raw,
                "id_categoria": 1
            }))
            .unwrap();
            assert!(matches!(
                NewProduct::try_from(req),
                Err(ValidationError::InvalidAmount { .. })
            ));
        }

        let req: UpdateProductRequest = serde_json::from_value(json!({
            "preco_unitario": "inf",
            "descricao": "Kafta"
        }))
        .unwrap();
        assert!(ProductUpdate::try_from(req).is_err());

        let req: CreateOrderRequest = serde_json::from_value(json!({
            "cliente": "Ana",
            "telefone": "5561999999999",
            "itens": [{ "id_produto": 4, "quantidade": 1, "preco_unitario": 12.5 }],
            "valor_total": 1e300
        }))
        .unwrap();
        assert!(matches!(
            NewOrder::try_from(req),
            Err(ValidationError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_prices_render_as_decimals() {
        let item = OrderItemResponse::from(OrderItemDetails {
            id: 1,
            order_id: 1,
            product_id: 2,
            quantity: 3,
            unit_price_cents: 1210,
            product_name: "Espeto de Kafta".to_string(),
            product_description: None,
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["unit_price"], 12.1);
        assert_eq!(json["line_total"], 36.3);
    }
}
