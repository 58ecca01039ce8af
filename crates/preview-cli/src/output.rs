//! Writing previews in the requested format

use anyhow::Result;
use clap::ValueEnum;
use preview_render::{no_data_html, RenderOptions};
use preview_shell::{render_view, PreviewState, PreviewView};

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Text,
    /// HTML page with the grid markup
    Html,
    /// Preview state as JSON
    Json,
}

/// Format a preview state
///
/// `label` names the data source in the placeholder message.
///
/// # Errors
/// Fails only if JSON serialization fails
pub fn format_state(
    state: &PreviewState,
    format: OutputFormat,
    options: &RenderOptions,
    label: Option<&str>,
) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(state)? + "\n");
    }

    let out = match (render_view(state, options, label), format) {
        (PreviewView::Table(table), OutputFormat::Html) => table.to_html_page("Data preview"),
        (PreviewView::Table(table), _) => {
            let mut text = table.to_text();
            if table.hidden_rows() > 0 {
                text.push_str(&format!("({} more rows not shown)\n", table.hidden_rows()));
            }
            text
        }
        (PreviewView::Placeholder(_), OutputFormat::Html) => no_data_html(label),
        (PreviewView::Placeholder(message), _) => message + "\n",
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use preview_shell::NoDataReason;

    #[test]
    fn placeholder_text() {
        let state = PreviewState::NoData(NoDataReason::NotReady { status: Some(404) });
        let out = format_state(&state, OutputFormat::Text, &RenderOptions::default(), Some("Contacts")).unwrap();
        assert_eq!(
            out,
            "Once you connect your Contacts data and run a sync job, data will appear here!\n"
        );
    }

    #[test]
    fn placeholder_json_carries_reason() {
        let state = PreviewState::NoData(NoDataReason::EmptyRecordSet);
        let out = format_state(&state, OutputFormat::Json, &RenderOptions::default(), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["state"], "no_data");
        assert_eq!(value["reason"], "empty_record_set");
    }

    #[test]
    fn format_names() {
        assert_eq!(OutputFormat::from_str("html", true).unwrap(), OutputFormat::Html);
        assert!(OutputFormat::from_str("yaml", true).is_err());
    }
}
