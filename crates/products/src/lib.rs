//! `crm-products` — the product catalog.

pub mod product;

pub use product::{Product, ProductCategory};
