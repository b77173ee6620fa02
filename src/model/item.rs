use std::fmt;

use serde::Serialize;

use crate::core::{Id, IdGenerator};

/// A single entry on a shopping list.
///
/// Titles are stored verbatim; trimming and length checks happen before an
/// item is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: Id,
    title: String,
    purchased: bool,
}

impl Item {
    pub const PURCHASED_MARKER: &'static str = "X";
    pub const NOT_PURCHASED_MARKER: &'static str = " ";

    pub fn new(title: impl Into<String>, ids: &IdGenerator) -> Self {
        Self {
            id: ids.next(),
            title: title.into(),
            purchased: false,
        }
    }

    /// Rebuild an item that already has an id, e.g. from session records.
    pub fn restore(id: Id, title: impl Into<String>, purchased: bool) -> Self {
        Self {
            id,
            title: title.into(),
            purchased,
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

    pub fn mark_purchased(&mut self) {
        self.purchased = true;
    }

    pub fn mark_not_purchased(&mut self) {
        self.purchased = false;
    }

    pub fn is_purchased(&self) -> bool {
        self.purchased
    }

    fn marker(&self) -> &'static str {
        if self.purchased {
            Self::PURCHASED_MARKER
        } else {
            Self::NOT_PURCHASED_MARKER
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.marker(), self.title)
    }
}
