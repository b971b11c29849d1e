//! Domain services.

pub mod customers;

pub use customers::{CustomerError, CustomerService};
