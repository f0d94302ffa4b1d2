//! Shared types and models for the Seed Production Management Platform
//!
//! This crate contains the domain models and pure business rules shared
//! between the backend and the browser (via WASM): identifier generation,
//! needs-vs-stock reconciliation and list filters.

pub mod balance;
pub mod codes;
pub mod insights;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
