//! Placeholder shown while there is no grid

use crate::html::escape_html;

const DEFAULT_LABEL: &str = "source";

/// Message shown before any data has been synced
#[must_use]
pub fn no_data_message(label: Option<&str>) -> String {
    let label = label.filter(|l| !l.trim().is_empty()).unwrap_or(DEFAULT_LABEL);
    format!("Once you connect your {label} data and run a sync job, data will appear here!")
}

/// Placeholder paragraph for HTML output
#[must_use]
pub fn no_data_html(label: Option<&str>) -> String {
    format!("<p>{}</p>\n", escape_html(&no_data_message(label)))
}
