//! Selection formatting.
//!
//! Pure functions: (Selection, OutputFormat) → String.
//! No I/O, no side effects.

use crate::types::{OutputFormat, Selection};

/// Format a selection for output.
pub fn format_selection(selection: &Selection, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(selection),
        OutputFormat::Json => format_json(selection),
    }
}

fn format_human(selection: &Selection) -> String {
    // One-based, the way options are numbered on screen
    format!(
        "You have selected option {}: {}.\n",
        selection.index + 1,
        selection.label
    )
}

fn format_json(selection: &Selection) -> String {
    match serde_json::to_string_pretty(selection) {
        Ok(json) => format!("{json}\n"),
        Err(e) => format!("{{\"error\": \"Failed to serialize selection: {e}\"}}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gamma() -> Selection {
        Selection {
            index: 2,
            label: "Gamma".into(),
        }
    }

    #[test]
    fn human_format_is_one_based() {
        assert_eq!(
            format_selection(&gamma(), OutputFormat::Human),
            "You have selected option 3: Gamma.\n"
        );
    }

    #[test]
    fn json_format_round_trips() {
        let out = format_selection(&gamma(), OutputFormat::Json);
        let parsed: Selection = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, gamma());
    }
}
