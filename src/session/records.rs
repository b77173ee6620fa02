//! Plain-data layout of a session's shopping lists.
//!
//! Sessions hold records, not live lists. Each request rehydrates the records
//! into [`ShoppingList`] values, works on those, and writes records back.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{Id, Result, ShoppingError};
use crate::model::{Item, ShoppingList};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub purchased: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListRecord {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id(),
            title: item.title().to_string(),
            purchased: item.is_purchased(),
        }
    }
}

impl ShoppingList {
    pub fn to_record(&self) -> ShoppingListRecord {
        ShoppingListRecord {
            id: self.id(),
            title: self.title().to_string(),
            items: self.iter().map(ItemRecord::from).collect(),
        }
    }

    /// Rebuild a live list, re-adding every item so the list's own checks
    /// run against the stored data.
    pub fn from_record(record: &ShoppingListRecord) -> Result<Self> {
        if record.id == 0 {
            return Err(ShoppingError::invalid_record(format!(
                "shopping list '{}' has no id",
                record.title
            )));
        }

        let mut list = ShoppingList::restore(record.id, record.title.clone());
        for item in &record.items {
            list.add(Item::restore(item.id, item.title.clone(), item.purchased))?;
        }
        Ok(list)
    }
}

pub fn rehydrate(records: &[ShoppingListRecord]) -> Result<Vec<ShoppingList>> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|record| {
            if !seen.insert(record.id) {
                return Err(ShoppingError::invalid_record(format!(
                    "duplicate shopping list id {}",
                    record.id
                )));
            }
            ShoppingList::from_record(record)
        })
        .collect()
}

pub fn dehydrate(lists: &[ShoppingList]) -> Vec<ShoppingListRecord> {
    lists.iter().map(ShoppingList::to_record).collect()
}
