//! Line-oriented intent scripts.
//!
//! Each non-blank line that doesn't start with `#` is one intent:
//!
//! ```text
//! add Olive oil 2      # name is everything up to the last word
//! edit 1
//! save 1 Extra virgin olive oil 3
//! cancel
//! delete 1
//! sort quantity
//! list
//! ```

use std::fmt;

use crate::model::item::{ItemId, ItemSnapshot, ParseSortModeError, SortMode};
use crate::ops::controller::ShoppingListController;
use crate::ops::validate::ValidationError;

/// One user action, as forwarded to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add { name: String, quantity: String },
    Edit(ItemId),
    Save {
        id: ItemId,
        name: String,
        quantity: String,
    },
    Cancel,
    Delete(ItemId),
    Sort(SortMode),
    List,
}

/// Error type for script parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: {command} expects {expected}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },
    #[error("line {line}: invalid item id '{value}'")]
    InvalidId { line: usize, value: String },
    #[error("line {line}: {source}")]
    InvalidSortMode {
        line: usize,
        #[source]
        source: ParseSortModeError,
    },
}

/// Parse a single line. Blank lines and comments yield `None`.
pub fn parse_intent(line: usize, text: &str) -> Result<Option<Intent>, ScriptError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = match text.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (text, ""),
    };

    let intent = match command {
        "add" => {
            let (name, quantity) = split_name_quantity(rest).ok_or(ScriptError::MissingArgument {
                line,
                command: "add",
                expected: "<name> <quantity>",
            })?;
            Intent::Add { name, quantity }
        }
        "edit" => Intent::Edit(parse_id(line, "edit", rest)?),
        "save" => {
            let missing = ScriptError::MissingArgument {
                line,
                command: "save",
                expected: "<id> <name> <quantity>",
            };
            let (id_text, tail) = rest.split_once(char::is_whitespace).ok_or(missing.clone())?;
            let id = parse_id(line, "save", id_text)?;
            let (name, quantity) = split_name_quantity(tail.trim()).ok_or(missing)?;
            Intent::Save { id, name, quantity }
        }
        "cancel" => Intent::Cancel,
        "delete" => Intent::Delete(parse_id(line, "delete", rest)?),
        "sort" => {
            let mode = rest
                .parse::<SortMode>()
                .map_err(|source| ScriptError::InvalidSortMode { line, source })?;
            Intent::Sort(mode)
        }
        "list" => Intent::List,
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(Some(intent))
}

/// Parse a whole script, keeping the 1-based line number of each intent
pub fn parse_script(text: &str) -> Result<Vec<(usize, Intent)>, ScriptError> {
    let mut intents = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(intent) = parse_intent(i + 1, line)? {
            intents.push((i + 1, intent));
        }
    }
    Ok(intents)
}

/// Split "Olive oil 2" into ("Olive oil", "2")
fn split_name_quantity(s: &str) -> Option<(String, String)> {
    let (name, quantity) = s.rsplit_once(char::is_whitespace)?;
    Some((name.trim_end().to_string(), quantity.to_string()))
}

fn parse_id(line: usize, command: &'static str, s: &str) -> Result<ItemId, ScriptError> {
    if s.is_empty() {
        return Err(ScriptError::MissingArgument {
            line,
            command,
            expected: "<id>",
        });
    }
    s.parse().map_err(|_| ScriptError::InvalidId {
        line,
        value: s.to_string(),
    })
}

/// A rejected add or save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptWarning {
    pub line: usize,
    pub error: ValidationError,
}

impl fmt::Display for ScriptWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// What a script run produced
#[derive(Debug, Default)]
pub struct ScriptOutcome {
    /// One snapshot of the visible list per `list` intent
    pub listings: Vec<Vec<ItemSnapshot>>,
    pub warnings: Vec<ScriptWarning>,
}

/// Apply intents in order. Validation errors are collected, not fatal.
pub fn run_script(list: &mut ShoppingListController, intents: &[(usize, Intent)]) -> ScriptOutcome {
    let mut outcome = ScriptOutcome::default();
    for (line, intent) in intents {
        let result = match intent {
            Intent::Add { name, quantity } => list.add_item(name, quantity).map(|_| ()),
            Intent::Edit(id) => {
                list.begin_edit(*id);
                Ok(())
            }
            Intent::Save { id, name, quantity } => list.complete_edit(*id, name, quantity),
            Intent::Cancel => {
                list.cancel_edit();
                Ok(())
            }
            Intent::Delete(id) => {
                list.delete_item(*id);
                Ok(())
            }
            Intent::Sort(mode) => {
                list.set_sort_mode(*mode);
                Ok(())
            }
            Intent::List => {
                outcome.listings.push(snapshot(list));
                Ok(())
            }
        };
        if let Err(error) = result {
            tracing::debug!(line, %error, "intent rejected");
            outcome.warnings.push(ScriptWarning { line: *line, error });
        }
    }
    outcome
}

/// Owned copy of the current visible list
pub fn snapshot(list: &ShoppingListController) -> Vec<ItemSnapshot> {
    list.visible_items().iter().map(|v| v.to_snapshot()).collect()
}
