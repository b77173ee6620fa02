pub mod item;
pub mod shopping_list;
pub mod sort;

/// Upper bound on list and item titles, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

pub use item::Item;
pub use shopping_list::ShoppingList;
pub use sort::{Completable, compare_by_title, sort_items, sort_shopping_lists};
