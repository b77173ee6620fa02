// ============================================================================
// src/model/shopping_list.rs - Ordered collection of items
// ============================================================================
//
// Insertion order is the canonical order of a list. Display order is
// computed separately by `model::sort` and never written back.
//
// Filter-style operations (`filter`, `all_purchased`, `not_purchased`,
// `all_items`) return detached lists holding clones of the matching items,
// so mutating a result leaves the source untouched.
//
// ============================================================================

use std::fmt;

use crate::core::{Id, IdGenerator, Result, ShoppingError};

use super::item::Item;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    id: Id,
    title: String,
    items: Vec<Item>,
}

impl ShoppingList {
    pub fn new(title: impl Into<String>, ids: &IdGenerator) -> Self {
        Self::restore(ids.next(), title)
    }

    /// Empty list with a known id. Items are attached afterwards through
    /// [`ShoppingList::add`].
    pub fn restore(id: Id, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append an item to the end of the list.
    ///
    /// Rejects items that could not have come from an id generator (id 0)
    /// and items whose id is already present in this list.
    pub fn add(&mut self, item: Item) -> Result<()> {
        if item.id() == 0 {
            return Err(ShoppingError::invalid_item(format!(
                "item '{}' has no id",
                item.title()
            )));
        }
        if self.find_by_id(item.id()).is_some() {
            return Err(ShoppingError::invalid_item(format!(
                "item {} is already in list '{}'",
                item.id(),
                self.title
            )));
        }

        self.items.push(item);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Item> {
        self.validate_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Remove and return the first item.
    pub fn shift(&mut self) -> Option<Item> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Remove and return the last item.
    pub fn pop(&mut self) -> Option<Item> {
        self.items.pop()
    }

    pub fn mark_purchased_at(&mut self, index: usize) -> Result<()> {
        self.item_at_mut(index)?.mark_purchased();
        Ok(())
    }

    pub fn mark_not_purchased_at(&mut self, index: usize) -> Result<()> {
        self.item_at_mut(index)?.mark_not_purchased();
        Ok(())
    }

    /// Mark the first item titled `title` as purchased. Does nothing when no
    /// item has that title.
    pub fn mark_purchased(&mut self, title: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.title() == title) {
            item.mark_purchased();
        }
    }

    pub fn mark_all_purchased(&mut self) {
        self.items.iter_mut().for_each(Item::mark_purchased);
    }

    // ========================================================================
    // Access
    // ========================================================================

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A list is done when it has at least one item and all of them are
    /// purchased. Empty lists are never done.
    pub fn is_done(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(Item::is_purchased)
    }

    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    pub fn item_at(&self, index: usize) -> Result<&Item> {
        self.validate_index(index)?;
        Ok(&self.items[index])
    }

    pub fn item_at_mut(&mut self, index: usize) -> Result<&mut Item> {
        self.validate_index(index)?;
        Ok(&mut self.items[index])
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn for_each<F>(&self, callback: F)
    where
        F: FnMut(&Item),
    {
        self.items.iter().for_each(callback);
    }

    /// Owned copy of the items in insertion order.
    pub fn to_vec(&self) -> Vec<Item> {
        self.items.clone()
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn find_by_title(&self, title: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.title() == title)
    }

    pub fn find_by_id(&self, id: Id) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Position of the item sharing `item`'s id.
    pub fn find_index_of(&self, item: &Item) -> Option<usize> {
        self.items.iter().position(|candidate| candidate.id() == item.id())
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// New list with the same id and title holding copies of the items that
    /// match `predicate`, in their current relative order.
    pub fn filter<F>(&self, mut predicate: F) -> ShoppingList
    where
        F: FnMut(&Item) -> bool,
    {
        ShoppingList {
            id: self.id,
            title: self.title.clone(),
            items: self
                .items
                .iter()
                .filter(|&item| predicate(item))
                .cloned()
                .collect(),
        }
    }

    pub fn all_purchased(&self) -> ShoppingList {
        self.filter(Item::is_purchased)
    }

    pub fn not_purchased(&self) -> ShoppingList {
        self.filter(|item| !item.is_purchased())
    }

    pub fn all_items(&self) -> ShoppingList {
        self.filter(|_| true)
    }

    fn validate_index(&self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(ShoppingError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ShoppingList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "---- {} ----", self.title)?;
        for item in &self.items {
            write!(f, "\n{item}")?;
        }
        Ok(())
    }
}
