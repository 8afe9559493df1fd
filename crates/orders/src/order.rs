use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_core::{CustomerId, DomainError, DomainResult, OrderId, ProductId};

/// Order fulfilment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    OutForDelivery,
    Delivered,
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OrderStatus::Pending => f.write_str("pending"),
            OrderStatus::OutForDelivery => f.write_str("out_for_delivery"),
            OrderStatus::Delivered => f.write_str("delivered"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "out_for_delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(DomainError::validation(format!(
                "unknown order status '{other}' (expected pending, out_for_delivery, or delivered)"
            ))),
        }
    }
}

/// An order placed for a customer.
///
/// Customer and product references are optional: deleting either record
/// clears the reference on surviving orders instead of deleting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: Option<CustomerId>,
    product_id: Option<ProductId>,
    status: OrderStatus,
    note: Option<String>,
    placed_at: DateTime<Utc>,
}

impl Order {
    pub fn place(
        id: OrderId,
        customer_id: Option<CustomerId>,
        product_id: Option<ProductId>,
        status: OrderStatus,
        note: Option<String>,
        placed_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if let Some(note) = &note {
            if note.trim().is_empty() {
                return Err(DomainError::validation("note cannot be blank"));
            }
        }

        Ok(Self {
            id,
            customer_id,
            product_id,
            status,
            note,
            placed_at,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// Update mutable fields; `None` keeps the existing value.
    pub fn update(
        &mut self,
        status: Option<OrderStatus>,
        note: Option<String>,
        product_id: Option<ProductId>,
    ) -> DomainResult<()> {
        if let Some(note) = &note {
            if note.trim().is_empty() {
                return Err(DomainError::validation("note cannot be blank"));
            }
        }

        if let Some(status) = status {
            self.status = status;
        }
        if let Some(note) = note {
            self.note = Some(note);
        }
        if let Some(product_id) = product_id {
            self.product_id = Some(product_id);
        }
        Ok(())
    }

    /// Detach the customer reference (customer record deleted).
    pub fn clear_customer(&mut self) {
        self.customer_id = None;
    }

    /// Detach the product reference (product record deleted).
    pub fn clear_product(&mut self) {
        self.product_id = None;
    }
}
