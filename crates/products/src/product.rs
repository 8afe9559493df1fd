use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_core::{DomainError, DomainResult, ProductId};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Indoor,
    OutDoor,
}

impl core::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProductCategory::Indoor => f.write_str("indoor"),
            ProductCategory::OutDoor => f.write_str("out_door"),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    /// Price in smallest currency unit (e.g., cents).
    price: u64,
    category: ProductCategory,
    description: Option<String>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn create(
        id: ProductId,
        name: impl Into<String>,
        price: u64,
        category: ProductCategory,
        description: Option<String>,
        tags: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            price,
            category,
            description,
            tags,
            created_at,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_keeps_provided_fields() {
        let id = ProductId::new();
        let p = Product::create(
            id,
            "Garden Hose",
            1999,
            ProductCategory::OutDoor,
            Some("50ft hose".to_string()),
            vec!["garden".to_string()],
            Utc::now(),
        )
        .unwrap();

        assert_eq!(p.id(), id);
        assert_eq!(p.name(), "Garden Hose");
        assert_eq!(p.price(), 1999);
        assert_eq!(p.category(), ProductCategory::OutDoor);
        assert_eq!(p.description(), Some("50ft hose"));
        assert_eq!(p.tags(), ["garden".to_string()]);
    }

    #[test]
    fn create_rejects_empty_name() {
        let err = Product::create(
            ProductId::new(),
            "  ",
            100,
            ProductCategory::Indoor,
            None,
            vec![],
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
