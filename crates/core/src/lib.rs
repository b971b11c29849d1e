//! CRM Core - Shared types library.
//!
//! This crate provides the domain types used across the CRM components:
//! - `server` - HTTP API and persistence adapters
//! - `integration-tests` - End-to-end API tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The `Customer` entity, its patch structure, and the
//!   type-safe `CustomerId` wrapper

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
