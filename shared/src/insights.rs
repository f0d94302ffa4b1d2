//! Insight text format
//!
//! Insights are free text made of blank-line separated sections. A section
//! written as `**Title** : body` carries a title.

use serde::{Deserialize, Serialize};

const TITLE_SEPARATOR: &str = "** : ";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsightSection {
    Titled { title: String, body: String },
    Plain { text: String },
}

/// Split insight text into sections
pub fn parse_insights(text: &str) -> Vec<InsightSection> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let parts: Vec<&str> = segment.split(TITLE_SEPARATOR).collect();
            match parts.as_slice() {
                [title, body] => InsightSection::Titled {
                    title: title.replace("**", "").trim().to_string(),
                    body: body.trim().to_string(),
                },
                _ => InsightSection::Plain {
                    text: segment.to_string(),
                },
            }
        })
        .collect()
}

/// Render a titled section in the insight text format
pub fn format_section(title: &str, body: &str) -> String {
    format!("**{}{}{}", title, TITLE_SEPARATOR, body)
}
