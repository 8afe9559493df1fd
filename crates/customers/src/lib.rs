//! `crm-customers` — customer records and contact details.

pub mod customer;

pub use customer::{ContactInfo, Customer};
