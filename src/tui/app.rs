use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::model::{ItemId, ItemView, ShoppingItem, UiConfig};
use crate::ops::{Change, ShoppingListController, ValidationError};
use crate::util::unicode;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// The "Add Shopping Item" dialog is open
    Add,
    /// An item is being edited in place
    Edit,
    SortMenu,
    /// Typing a name filter
    Search,
}

/// Which field of an item form has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Quantity,
}

/// Single-line text buffer with a byte-offset cursor on a grapheme boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    /// Buffer holding `text` with the cursor at the end
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        TextInput { text, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Name/quantity form used by both the add dialog and the inline editor
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub name: TextInput,
    pub quantity: TextInput,
    pub focus: FormField,
    /// Last rejection, shown under the fields
    pub error: Option<ValidationError>,
}

impl ItemForm {
    /// Form pre-filled from an existing item
    pub fn for_item(item: &ShoppingItem) -> Self {
        ItemForm {
            name: TextInput::new(item.name.clone()),
            quantity: TextInput::new(item.quantity.to_string()),
            focus: FormField::Name,
            error: None,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Quantity => &mut self.quantity,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::Quantity,
            FormField::Quantity => FormField::Name,
        };
    }

    pub fn reset(&mut self) {
        *self = ItemForm::default();
    }
}

/// Main application state
pub struct App {
    pub list: ShoppingListController,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_help: bool,
    pub show_key_hints: bool,
    /// Item under the cursor, tracked by id so it survives re-sorting
    pub selected: Option<ItemId>,
    /// First visible row of the list
    pub scroll_offset: usize,
    pub add_form: ItemForm,
    pub edit_form: ItemForm,
    /// Highlighted entry in the sort menu
    pub sort_cursor: usize,
    /// Filter being typed in Search mode
    pub search_input: TextInput,
    /// Applied name filter
    filter: Option<String>,
    /// Compiled form of whichever filter is active
    filter_re: Option<Regex>,
    /// One-line message for the status row, cleared on the next key
    pub status: Option<String>,
    pub needs_redraw: bool,
    changes: Rc<RefCell<Vec<Change>>>,
}

impl App {
    pub fn new(mut list: ShoppingListController, ui: &UiConfig) -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        list.subscribe(move |change| sink.borrow_mut().push(*change));

        let selected = list.visible_items().first().map(|v| v.id());

        App {
            list,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            show_help: false,
            show_key_hints: ui.show_key_hints,
            selected,
            scroll_offset: 0,
            add_form: ItemForm::default(),
            edit_form: ItemForm::default(),
            sort_cursor: 0,
            search_input: TextInput::default(),
            filter: None,
            filter_re: None,
            status: None,
            needs_redraw: true,
            changes,
        }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Apply a name filter; an empty pattern clears it
    pub fn set_filter(&mut self, pattern: Option<String>) {
        self.filter = pattern.filter(|p| !p.is_empty());
        self.refresh_filter_re();
    }

    /// Open the filter prompt, starting from the applied filter
    pub fn start_search(&mut self) {
        self.search_input = TextInput::new(self.filter.clone().unwrap_or_default());
        self.mode = Mode::Search;
        self.refresh_filter_re();
    }

    /// Close the filter prompt, applying what was typed if `apply`
    pub fn finish_search(&mut self, apply: bool) {
        let typed = std::mem::take(&mut self.search_input);
        self.mode = Mode::Navigate;
        if apply {
            self.set_filter(Some(typed.text));
        } else {
            self.refresh_filter_re();
        }
    }

    /// Recompile the active filter: the live input while searching,
    /// otherwise the applied filter
    pub fn refresh_filter_re(&mut self) {
        let pattern = match self.mode {
            Mode::Search => Some(self.search_input.as_str()).filter(|p| !p.is_empty()),
            _ => self.filter.as_deref(),
        };
        self.filter_re = pattern.and_then(compile_filter);
    }

    pub fn filter_re(&self) -> Option<&Regex> {
        self.filter_re.as_ref()
    }

    /// Visible rows, after sorting and filtering
    pub fn rows(&self) -> Vec<ItemView<'_>> {
        match &self.filter_re {
            Some(re) => self.list.visible_items_where(|item| re.is_match(&item.name)),
            None => self.list.visible_items(),
        }
    }

    pub fn row_ids(&self) -> Vec<ItemId> {
        self.rows().iter().map(|v| v.id()).collect()
    }

    /// Row index of the selected item, if it is visible
    pub fn cursor_index(&self) -> Option<usize> {
        let selected = self.selected?;
        self.rows().iter().position(|v| v.id() == selected)
    }

    /// Make sure the selection points at a visible row, preferring
    /// `fallback_index` when the selected item is gone
    pub fn clamp_selection(&mut self, fallback_index: usize) {
        let ids = self.row_ids();
        if self.selected.is_some_and(|id| ids.contains(&id)) {
            return;
        }
        self.selected = if ids.is_empty() {
            None
        } else {
            Some(ids[fallback_index.min(ids.len() - 1)])
        };
    }

    /// Drain controller notifications and update UI state to match.
    /// Returns true if anything changed.
    pub fn apply_changes(&mut self) -> bool {
        let changes: Vec<Change> = self.changes.borrow_mut().drain(..).collect();
        if changes.is_empty() {
            return false;
        }
        for change in &changes {
            match *change {
                Change::Added(id) => {
                    // Drop a filter that would hide the new item
                    let hidden = match (&self.filter_re, self.list.find(id)) {
                        (Some(re), Some(item)) => !re.is_match(&item.name),
                        _ => false,
                    };
                    if hidden {
                        self.set_filter(None);
                    }
                    self.selected = Some(id);
                    if let Some(item) = self.list.find(id) {
                        self.status = Some(format!("Added {} \u{00D7}{}", item.name, item.quantity));
                    }
                }
                Change::Deleted(_) => {
                    self.status = Some("Item deleted".to_string());
                }
                Change::EditFinished { id, applied: true } => {
                    self.selected = Some(id);
                    self.status = Some("Saved".to_string());
                }
                Change::EditStarted(_)
                | Change::EditFinished { applied: false, .. }
                | Change::EditCancelled(_)
                | Change::SortChanged(_) => {}
            }
        }
        // Leave edit mode if the controller did
        if self.mode == Mode::Edit && self.list.editing_id().is_none() {
            self.mode = Mode::Navigate;
        }
        self.needs_redraw = true;
        true
    }

    /// Keep the cursor row within a viewport of `height` rows
    pub fn adjust_scroll(&mut self, height: usize) {
        let Some(cursor) = self.cursor_index() else {
            self.scroll_offset = 0;
            return;
        };
        if height == 0 {
            return;
        }
        if cursor < self.scroll_offset {
            self.scroll_offset = cursor;
        } else if cursor >= self.scroll_offset + height {
            self.scroll_offset = cursor + 1 - height;
        }
        let rows = self.rows().len();
        if self.scroll_offset + height > rows {
            self.scroll_offset = rows.saturating_sub(height);
        }
    }
}

/// Case-insensitive name filter. Invalid regexes are matched literally.
fn compile_filter(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("(?i){}", pattern))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
        .ok()
}

/// Run the TUI application
pub fn run(list: ShoppingListController, ui: &UiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(list, ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    tracing::info!("tui started");
    let result = run_event_loop(&mut terminal, &mut app);
    tracing::info!(items = app.list.len(), "tui exiting");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if app.needs_redraw {
            terminal.draw(|frame| render::render(frame, app))?;
            app.needs_redraw = false;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Resize(_, _) => app.needs_redraw = true,
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
