use serde::{Deserialize, Serialize};

/// Color family of a status badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusStyle {
    Blue,
    Green,
    Purple,
    /// Neutral style for new or unrecognized statuses.
    Gray,
}

impl StatusStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Gray => "gray",
        }
    }
}

/// Display-ready values for one project card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardSummary {
    pub id: String,
    pub name: String,
    /// Short tag shown next to the name (the business model).
    pub badge: String,
    pub description: String,
    pub status_label: String,
    pub status_style: StatusStyle,
    /// Caption above the progress bar, e.g. "Discovery".
    pub progress_label: String,
    pub progress_percent: u8,
    pub relative_date_label: String,
}

/// Aggregate counters shown above the project grid.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub discovery_count: usize,
    pub strategy_count: usize,
    /// Share of projects with progress of at least 75%, rounded.
    pub success_rate_percent: u8,
}
