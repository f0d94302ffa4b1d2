//! External service integrations

pub mod insights;

pub use insights::{InsightsSummary, MockInsightsClient};
