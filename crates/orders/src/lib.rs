//! `crm-orders` — orders, their status lifecycle, and list filtering.

pub mod filter;
pub mod order;

pub use filter::{OrderFilter, OrderStats};
pub use order::{Order, OrderStatus};
