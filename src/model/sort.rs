// ============================================================================
// src/model/sort.rs - Display ordering for lists and items
// ============================================================================
//
// Both orderings use the same two-phase policy:
// - partition into incomplete and complete entries
// - sort each partition by lower-cased title, ascending
// - incomplete entries come first
//
// Sorting is stable and never touches the input; results borrow from it.
//
// ============================================================================

use std::cmp::Ordering;

use super::item::Item;
use super::shopping_list::ShoppingList;

/// Something with a title and a completion state.
pub trait Completable {
    fn title(&self) -> &str;
    fn is_complete(&self) -> bool;
}

impl Completable for Item {
    fn title(&self) -> &str {
        Item::title(self)
    }

    fn is_complete(&self) -> bool {
        self.is_purchased()
    }
}

impl Completable for ShoppingList {
    fn title(&self) -> &str {
        ShoppingList::title(self)
    }

    fn is_complete(&self) -> bool {
        self.is_done()
    }
}

/// Case-insensitive title comparison.
pub fn compare_by_title<T: Completable>(a: &T, b: &T) -> Ordering {
    a.title().to_lowercase().cmp(&b.title().to_lowercase())
}

/// Order `entries` incomplete-first, each group alphabetical.
pub fn sort_by_completion<'a, T, I>(entries: I) -> Vec<&'a T>
where
    T: Completable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let (mut incomplete, mut complete): (Vec<&T>, Vec<&T>) = entries
        .into_iter()
        .partition(|entry| !entry.is_complete());

    incomplete.sort_by(|a, b| compare_by_title(*a, *b));
    complete.sort_by(|a, b| compare_by_title(*a, *b));

    incomplete.extend(complete);
    incomplete
}

/// Shopping lists in display order: lists with outstanding items (or no
/// items at all) before finished ones.
pub fn sort_shopping_lists(lists: &[ShoppingList]) -> Vec<&ShoppingList> {
    sort_by_completion(lists)
}

/// A list's items in display order: unpurchased before purchased.
pub fn sort_items(list: &ShoppingList) -> Vec<&Item> {
    sort_by_completion(list.items())
}
