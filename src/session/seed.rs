//! Initial shopping lists for new sessions.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{IdGenerator, Result};
use crate::model::{Item, MAX_TITLE_CHARS, ShoppingList};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid seed title: {0}")]
    InvalidTitle(String),
}

fn seed_title(raw: &str, kind: &str) -> std::result::Result<String, SeedError> {
    let title = raw.trim();
    let len = title.chars().count();
    if len == 0 || len > MAX_TITLE_CHARS {
        return Err(SeedError::InvalidTitle(format!(
            "{kind} title {raw:?} must be between 1 and {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(title.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedItem {
    pub title: String,
    #[serde(default)]
    pub purchased: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedList {
    pub title: String,
    #[serde(default)]
    pub items: Vec<SeedItem>,
}

/// Titles and purchase states only; ids are drawn from a generator each time
/// the seed is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seed {
    lists: Vec<SeedList>,
}

impl Seed {
    pub fn new(lists: Vec<SeedList>) -> Self {
        Self { lists }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Demo data every new session starts with.
    pub fn builtin() -> Self {
        fn list(title: &str, items: &[(&str, bool)]) -> SeedList {
            SeedList {
                title: title.to_string(),
                items: items
                    .iter()
                    .map(|(title, purchased)| SeedItem {
                        title: title.to_string(),
                        purchased: *purchased,
                    })
                    .collect(),
            }
        }

        Self::new(vec![
            list(
                "Work Items",
                &[("Coffee", true), ("Pens", true), ("Ipad", false)],
            ),
            list(
                "Home Items",
                &[
                    ("Cups", true),
                    ("Almond Milk", true),
                    ("Desk", true),
                    ("Chair", true),
                ],
            ),
            list("Additional Items", &[]),
            list("birthday party items", &[("party hat", false)]),
        ])
    }

    /// Parse a JSON array of `{ "title", "items": [{ "title", "purchased" }] }`.
    /// Titles get the same checks as submitted ones.
    pub fn from_json(raw: &str) -> std::result::Result<Self, SeedError> {
        Self::new(serde_json::from_str(raw)?).validate()
    }

    /// Trim every title, check its length and require unique list titles.
    pub fn validate(mut self) -> std::result::Result<Self, SeedError> {
        let mut seen = HashSet::new();
        for list in &mut self.lists {
            list.title = seed_title(&list.title, "list")?;
            if !seen.insert(list.title.clone()) {
                return Err(SeedError::InvalidTitle(format!(
                    "list title {:?} is used more than once",
                    list.title
                )));
            }
            for item in &mut list.items {
                item.title = seed_title(&item.title, "item")?;
            }
        }
        Ok(self)
    }

    pub fn from_path(path: impl AsRef<Path>) -> std::result::Result<Self, SeedError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn lists(&self) -> &[SeedList] {
        &self.lists
    }

    pub fn build(&self, ids: &IdGenerator) -> Result<Vec<ShoppingList>> {
        self.lists
            .iter()
            .map(|seed| {
                let mut list = ShoppingList::new(seed.title.clone(), ids);
                for seed_item in &seed.items {
                    let mut item = Item::new(seed_item.title.clone(), ids);
                    if seed_item.purchased {
                        item.mark_purchased();
                    }
                    list.add(item)?;
                }
                Ok(list)
            })
            .collect()
    }
}
