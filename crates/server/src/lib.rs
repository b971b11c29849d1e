//! CRM server library.
//!
//! This crate provides the customer API as a library, allowing the router
//! to be assembled in-process for tests and reused by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
