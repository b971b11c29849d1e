//! Core types for the CRM customer service.

pub mod customer;
pub mod id;

pub use customer::{Customer, CustomerPatch};
pub use id::*;
