use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crm_customers::{ContactInfo, Customer};
use crm_orders::{Order, OrderFilter, OrderStatus};
use crm_products::{Product, ProductCategory};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterAccountRequest {
    pub username: String,
    pub contact: Option<ContactInfo>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub contact: Option<ContactInfo>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: u64,
    pub category: ProductCategory,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    pub status: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: Option<String>,
    pub note: Option<String>,
    pub product_id: Option<String>,
}

/// Query parameters accepted by order-list views.
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilterQuery {
    pub status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl OrderFilterQuery {
    pub fn into_filter(self) -> Result<OrderFilter, axum::response::Response> {
        let status = match self.status {
            Some(raw) => Some(
                raw.parse::<OrderStatus>()
                    .map_err(errors::domain_error_to_response)?,
            ),
            None => None,
        };

        Ok(OrderFilter {
            status,
            placed_after: self.from,
            placed_before: self.to,
            note_contains: self.note,
        })
    }
}

// -------------------------
// JSON mapping
// -------------------------

pub fn customer_to_json(customer: &Customer) -> serde_json::Value {
    json!({
        "id": customer.id().to_string(),
        "user_id": customer.user_id().map(|id| id.to_string()),
        "name": customer.name(),
        "contact": customer.contact(),
        "created_at": customer.created_at(),
    })
}

pub fn product_to_json(product: &Product) -> serde_json::Value {
    json!({
        "id": product.id().to_string(),
        "name": product.name(),
        "price": product.price(),
        "category": product.category(),
        "description": product.description(),
        "tags": product.tags(),
        "created_at": product.created_at(),
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    json!({
        "id": order.id().to_string(),
        "customer_id": order.customer_id().map(|id| id.to_string()),
        "product_id": order.product_id().map(|id| id.to_string()),
        "status": order.status(),
        "note": order.note(),
        "placed_at": order.placed_at(),
    })
}
