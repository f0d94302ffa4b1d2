//! HTTP handlers

pub mod distribution;
pub mod evaluation;
pub mod health;
pub mod inventory;
pub mod lot;
pub mod needs;
pub mod provenance;
pub mod provider;
pub mod quality;
pub mod region;
pub mod reporting;
pub mod species;
pub mod station;
pub mod treatment;

pub use distribution::*;
pub use evaluation::*;
pub use health::*;
pub use inventory::*;
pub use lot::*;
pub use needs::*;
pub use provenance::*;
pub use provider::*;
pub use quality::*;
pub use region::*;
pub use reporting::*;
pub use species::*;
pub use station::*;
pub use treatment::*;
