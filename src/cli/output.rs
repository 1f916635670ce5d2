use serde::Serialize;

use crate::model::ItemSnapshot;
use crate::ops::script::ScriptOutcome;
use crate::util::unicode::display_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ReplayJson<'a> {
    /// The visible list at each `list` intent
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listings: &'a Vec<Vec<ItemSnapshot>>,
    /// The visible list after the last intent
    pub items: &'a [ItemSnapshot],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WarningJson>,
}

#[derive(Serialize)]
pub struct WarningJson {
    pub line: usize,
    pub error: String,
}

pub fn replay_to_json<'a>(outcome: &'a ScriptOutcome, items: &'a [ItemSnapshot]) -> ReplayJson<'a> {
    ReplayJson {
        listings: &outcome.listings,
        items,
        warnings: outcome
            .warnings
            .iter()
            .map(|w| WarningJson {
                line: w.line,
                error: w.error.to_string(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One line per item: id, name, quantity, and an edit marker
pub fn format_items(items: &[ItemSnapshot]) -> String {
    if items.is_empty() {
        return "(no items)\n".to_string();
    }
    let name_w = items
        .iter()
        .map(|i| display_width(&i.name))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for item in items {
        let pad = " ".repeat(name_w - display_width(&item.name));
        out.push_str(&format!(
            "{:>3}  {}{}  Qty: {}",
            item.id, item.name, pad, item.quantity
        ));
        if item.is_editing {
            out.push_str("  [editing]");
        }
        out.push('\n');
    }
    out
}
