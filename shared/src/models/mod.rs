//! Domain models for the Seed Production Management Platform

mod dataset;
mod evaluation;
mod inventory;
mod lot;
mod needs;
mod quality;
mod reference;
mod treatment;

pub use dataset::*;
pub use evaluation::*;
pub use inventory::*;
pub use lot::*;
pub use needs::*;
pub use quality::*;
pub use reference::*;
pub use treatment::*;
