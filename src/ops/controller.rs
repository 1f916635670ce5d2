use std::fmt;

use tracing::debug;

use crate::model::config::{ListConfig, QuantityPolicy};
use crate::model::item::{ItemId, ItemView, ShoppingItem, SortMode};
use crate::ops::validate::{
    ValidationError, parse_quantity, parse_quantity_or_default, validate_name,
};

/// A state change, delivered to listeners after it has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added(ItemId),
    EditStarted(ItemId),
    /// `applied` is false when the id was unknown or the input was rejected
    EditFinished { id: ItemId, applied: bool },
    EditCancelled(ItemId),
    Deleted(ItemId),
    SortChanged(SortMode),
}

type Listener = Box<dyn FnMut(&Change)>;

/// Owns the shopping list and enforces its rules.
///
/// Items are kept in insertion order; sorting only affects
/// [`visible_items`](Self::visible_items). At most one item is in edit mode,
/// tracked as a single id rather than a flag per item.
pub struct ShoppingListController {
    items: Vec<ShoppingItem>,
    sort_mode: SortMode,
    editing: Option<ItemId>,
    next_id: ItemId,
    quantity_policy: QuantityPolicy,
    listeners: Vec<Listener>,
}

impl Default for ShoppingListController {
    fn default() -> Self {
        ShoppingListController::new()
    }
}

impl fmt::Debug for ShoppingListController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShoppingListController")
            .field("items", &self.items)
            .field("sort_mode", &self.sort_mode)
            .field("editing", &self.editing)
            .field("next_id", &self.next_id)
            .field("quantity_policy", &self.quantity_policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ShoppingListController {
    pub fn new() -> Self {
        ShoppingListController {
            items: Vec::new(),
            sort_mode: SortMode::default(),
            editing: None,
            next_id: 1,
            quantity_policy: QuantityPolicy::default(),
            listeners: Vec::new(),
        }
    }

    /// Create a controller using the `[list]` section of the config
    pub fn from_config(config: &ListConfig) -> Self {
        ShoppingListController::new()
            .with_sort_mode(config.default_sort)
            .with_quantity_policy(config.edit_quantity)
    }

    pub fn with_sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self
    }

    pub fn with_quantity_policy(mut self, policy: QuantityPolicy) -> Self {
        self.quantity_policy = policy;
        self
    }

    /// Register a callback run after every state change
    pub fn subscribe(&mut self, listener: impl FnMut(&Change) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener(&change);
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Validate and append a new item. On error nothing changes.
    ///
    /// Fails with [`ValidationError::ListFull`] once every id has been used,
    /// since ids are never reused.
    pub fn add_item(&mut self, name: &str, quantity: &str) -> Result<ShoppingItem, ValidationError> {
        validate_name(name)?;
        let quantity = parse_quantity(quantity)?;

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(ValidationError::ListFull)?;

        let item = ShoppingItem::new(id, name, quantity);
        self.items.push(item.clone());
        debug!(id = item.id, name = %item.name, quantity, "item added");
        self.notify(Change::Added(item.id));
        Ok(item)
    }

    /// Put `id` into edit mode, taking edit mode away from any other item.
    /// Unknown ids are ignored.
    pub fn begin_edit(&mut self, id: ItemId) {
        if self.find(id).is_none() {
            debug!(id, "begin_edit: no such item");
            return;
        }
        self.editing = Some(id);
        debug!(id, "edit started");
        self.notify(Change::EditStarted(id));
    }

    /// Leave edit mode and write the new values into item `id`.
    ///
    /// Edit mode is cleared whatever the outcome. A blank name is rejected.
    /// A bad quantity becomes 1 under [`QuantityPolicy::Lenient`] and is
    /// rejected under [`QuantityPolicy::Strict`]. An unknown id only clears
    /// edit mode.
    pub fn complete_edit(
        &mut self,
        id: ItemId,
        name: &str,
        quantity: &str,
    ) -> Result<(), ValidationError> {
        self.editing = None;
        let result = self.apply_edit(id, name, quantity);
        let applied = matches!(result, Ok(true));
        match &result {
            Ok(true) => debug!(id, "edit applied"),
            Ok(false) => debug!(id, "complete_edit: no such item"),
            Err(e) => debug!(id, error = %e, "edit rejected"),
        }
        self.notify(Change::EditFinished { id, applied });
        result.map(|_| ())
    }

    fn apply_edit(&mut self, id: ItemId, name: &str, quantity: &str) -> Result<bool, ValidationError> {
        let policy = self.quantity_policy;
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };
        validate_name(name)?;
        let quantity = match policy {
            QuantityPolicy::Lenient => parse_quantity_or_default(quantity),
            QuantityPolicy::Strict => parse_quantity(quantity)?,
        };
        item.name = name.to_string();
        item.quantity = quantity;
        Ok(true)
    }

    /// Leave edit mode without changing anything
    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.editing.take() {
            debug!(id, "edit cancelled");
            self.notify(Change::EditCancelled(id));
        }
    }

    /// Remove item `id`. Unknown ids are ignored.
    pub fn delete_item(&mut self, id: ItemId) {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            debug!(id, "delete_item: no such item");
            return;
        };
        self.items.remove(pos);
        if self.editing == Some(id) {
            self.editing = None;
        }
        debug!(id, "item deleted");
        self.notify(Change::Deleted(id));
    }

    /// Change the display order. The stored order is untouched.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        if self.sort_mode == mode {
            return;
        }
        self.sort_mode = mode;
        debug!(mode = %mode, "sort mode changed");
        self.notify(Change::SortChanged(mode));
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Items in display order. Recomputed on every call; ties keep
    /// insertion order.
    pub fn visible_items(&self) -> Vec<ItemView<'_>> {
        self.visible_items_where(|_| true)
    }

    /// Like [`visible_items`](Self::visible_items), keeping only items that
    /// match `predicate`
    pub fn visible_items_where(
        &self,
        mut predicate: impl FnMut(&ShoppingItem) -> bool,
    ) -> Vec<ItemView<'_>> {
        let mut views: Vec<ItemView<'_>> = self
            .items
            .iter()
            .filter(|item| predicate(item))
            .map(|item| ItemView {
                item,
                is_editing: self.editing == Some(item.id),
            })
            .collect();
        match self.sort_mode {
            SortMode::Name => views.sort_by(|a, b| a.item.name.cmp(&b.item.name)),
            SortMode::Quantity => views.sort_by_key(|v| v.item.quantity),
        }
        views
    }

    pub fn find(&self, id: ItemId) -> Option<&ShoppingItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items in insertion order
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn editing_id(&self) -> Option<ItemId> {
        self.editing
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn quantity_policy(&self) -> QuantityPolicy {
        self.quantity_policy
    }
}
