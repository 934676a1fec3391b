// SPDX-License-Identifier: GPL-3.0-only

//! Pagination state shared by every list screen.
//!
//! The [`Paginator`] only owns the page size and the current page index, the
//! collection itself is borrowed on every call. Changing the slice between two
//! calls (new data, deleted rows...) re-derives everything on the next read.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEMS_PER_PAGE: NonZeroUsize = NonZeroUsize::new(50).unwrap();

/// Zero-based position of a page.
///
/// Views show one-based page numbers, convert through [`PageIndex::page_number`]
/// and [`PageIndex::from_page_number`] instead of adding or removing one by hand.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PageIndex(usize);

impl PageIndex {
    pub const FIRST: PageIndex = PageIndex(0);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index of the given one-based page number, `0` saturates to the first page
    pub const fn from_page_number(page_number: usize) -> Self {
        Self(page_number.saturating_sub(1))
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// One-based number, the way the page is shown to the user
    pub const fn page_number(self) -> usize {
        self.0.saturating_add(1)
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.page_number())
    }
}

//
// ARITHMETIC
//

/// Index of the last page. An empty collection still has one (empty) page.
pub fn last_page_index(len: usize, per_page: NonZeroUsize) -> PageIndex {
    PageIndex(len.div_ceil(per_page.get()).saturating_sub(1))
}

/// Amount of pages, always at least 1
pub fn total_pages(len: usize, per_page: NonZeroUsize) -> usize {
    last_page_index(len, per_page).page_number()
}

/// Saturates `candidate` into `[0, last_page_index]`
pub fn clamp_page_index(candidate: i64, len: usize, per_page: NonZeroUsize) -> PageIndex {
    let candidate = usize::try_from(candidate.max(0)).unwrap_or(usize::MAX);
    clamp(candidate, len, per_page)
}

pub fn next_page_index(current: PageIndex, len: usize, per_page: NonZeroUsize) -> PageIndex {
    clamp(current.0.saturating_add(1), len, per_page)
}

/// Clamped on both ends, a stale index above the last page comes back in range
pub fn previous_page_index(current: PageIndex, len: usize, per_page: NonZeroUsize) -> PageIndex {
    clamp(current.0.saturating_sub(1), len, per_page)
}

/// Item positions covered by the page at `index`, clipped to `len`
pub fn page_bounds(index: PageIndex, len: usize, per_page: NonZeroUsize) -> Range<usize> {
    let start = index.0.saturating_mul(per_page.get()).min(len);
    let end = start.saturating_add(per_page.get()).min(len);
    start..end
}

pub fn extract_page<T>(index: PageIndex, per_page: NonZeroUsize, items: &[T]) -> &[T] {
    &items[page_bounds(index, items.len(), per_page)]
}

fn clamp(candidate: usize, len: usize, per_page: NonZeroUsize) -> PageIndex {
    PageIndex(candidate.min(last_page_index(len, per_page).0))
}

//
// CONFIG & ACTIONS
//

/// Holds the pagination settings (generic, for various entities)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub items_per_page: NonZeroUsize,
    /// Zero-based page the paginator starts on
    #[serde(default)]
    pub initial_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            initial_page: 0,
        }
    }
}

/// Identifies a pagination action
#[derive(Debug, Clone, PartialEq)]
pub enum PaginationAction {
    First,
    Last,

    Back,
    Forward,

    /// Go to the given one-based page number
    Jump(i64),
}

//
// PAGE VIEW
//

/// Derived view of the current page, recomputed on every read
pub struct Page<'a, T> {
    /// One-based current page
    pub page: usize,
    /// One-based amount of pages, at least 1
    pub total_pages: usize,
    pub per_page: usize,
    /// Items visible on the current page
    pub paginated: &'a [T],
}

impl<T> Page<'_, T> {
    pub fn index(&self) -> PageIndex {
        PageIndex::from_page_number(self.page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Positions of the visible items inside the whole collection
    pub fn item_range(&self) -> Range<usize> {
        let start = self.index().get() * self.per_page;
        start..start + self.paginated.len()
    }
}

// Manual impls, deriving would require `T: Clone`
impl<T> Clone for Page<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Page<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("page", &self.page)
            .field("total_pages", &self.total_pages)
            .field("per_page", &self.per_page)
            .field("paginated", &self.paginated)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for Page<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.page == other.page
            && self.total_pages == other.total_pages
            && self.per_page == other.per_page
            && self.paginated == other.paginated
    }
}

//
// PAGINATOR
//

/// Handle returned by [`Paginator::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

type Subscriber = Box<dyn FnMut(PageIndex)>;

/// Current page of a collection plus the navigation over it
pub struct Paginator {
    items_per_page: NonZeroUsize,
    /// Last committed index, may be above the last page after the collection shrinks
    page_index: PageIndex,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::with_config(PaginationConfig::default())
    }
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("items_per_page", &self.items_per_page)
            .field("page_index", &self.page_index)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Paginator {
    /// Creates a paginator starting on the zero-based `initial_page`, negative values start on the first page.
    ///
    /// # Panics
    ///
    /// Panics if `items_per_page` is 0.
    pub fn new(items_per_page: usize, initial_page: i64) -> Self {
        let Some(items_per_page) = NonZeroUsize::new(items_per_page) else {
            panic!("a paginator needs at least one item per page");
        };

        Self {
            items_per_page,
            page_index: PageIndex(usize::try_from(initial_page.max(0)).unwrap_or(usize::MAX)),
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    pub fn with_config(config: PaginationConfig) -> Self {
        Self {
            items_per_page: config.items_per_page,
            page_index: PageIndex(config.initial_page),
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    pub fn per_page(&self) -> usize {
        self.items_per_page.get()
    }

    /// Stored index, not clamped against any collection
    pub fn raw_index(&self) -> PageIndex {
        self.page_index
    }

    /// Stored index clamped against `items`
    pub fn current_index<T>(&self, items: &[T]) -> PageIndex {
        clamp(self.page_index.0, items.len(), self.items_per_page)
    }

    /// One-based current page
    pub fn current_page<T>(&self, items: &[T]) -> usize {
        self.current_index(items).page_number()
    }

    pub fn total_pages<T>(&self, items: &[T]) -> usize {
        total_pages(items.len(), self.items_per_page)
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        extract_page(self.current_index(items), self.items_per_page, items)
    }

    pub fn paginate<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        let index = self.current_index(items);

        Page {
            page: index.page_number(),
            total_pages: self.total_pages(items),
            per_page: self.per_page(),
            paginated: extract_page(index, self.items_per_page, items),
        }
    }

    pub fn first_page<'a, T>(&mut self, items: &'a [T]) -> Page<'a, T> {
        self.commit(PageIndex::FIRST);
        self.paginate(items)
    }

    pub fn last_page<'a, T>(&mut self, items: &'a [T]) -> Page<'a, T> {
        self.commit(last_page_index(items.len(), self.items_per_page));
        self.paginate(items)
    }

    /// Saturates on the last page
    pub fn next_page<'a, T>(&mut self, items: &'a [T]) -> Page<'a, T> {
        let current = self.current_index(items);
        self.commit(next_page_index(current, items.len(), self.items_per_page));
        self.paginate(items)
    }

    /// Saturates on the first page
    pub fn previous_page<'a, T>(&mut self, items: &'a [T]) -> Page<'a, T> {
        let current = self.current_index(items);
        self.commit(previous_page_index(current, items.len(), self.items_per_page));
        self.paginate(items)
    }

    /// Jumps to the zero-based `index`, out of range values land on the nearest page
    pub fn set_page<'a, T>(&mut self, index: i64, items: &'a [T]) -> Page<'a, T> {
        self.commit(clamp_page_index(index, items.len(), self.items_per_page));
        self.paginate(items)
    }

    /// Same as [`Paginator::set_page`] but takes the one-based number a user typed
    pub fn set_page_number<'a, T>(&mut self, page_number: i64, items: &'a [T]) -> Page<'a, T> {
        self.set_page(page_number.saturating_sub(1), items)
    }

    pub fn apply<'a, T>(&mut self, action: PaginationAction, items: &'a [T]) -> Page<'a, T> {
        match action {
            PaginationAction::First => self.first_page(items),
            PaginationAction::Last => self.last_page(items),
            PaginationAction::Back => self.previous_page(items),
            PaginationAction::Forward => self.next_page(items),
            PaginationAction::Jump(page_number) => self.set_page_number(page_number, items),
        }
    }

    /// Registers a callback ran every time navigation changes the page index
    pub fn subscribe(&mut self, subscriber: impl FnMut(PageIndex) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the subscriber was already gone
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscriber_id, _)| *subscriber_id != id);
        self.subscribers.len() != before
    }

    fn commit(&mut self, index: PageIndex) {
        if self.page_index == index {
            return;
        }

        log::trace!("page index {} -> {}", self.page_index.get(), index.get());
        self.page_index = index;

        for (_, subscriber) in &mut self.subscribers {
            subscriber(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn per_page(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn page_number_boundary() {
        assert_eq!(PageIndex::from_page_number(0), PageIndex::FIRST);
        assert_eq!(PageIndex::from_page_number(1), PageIndex::FIRST);
        assert_eq!(PageIndex::from_page_number(3).get(), 2);
        assert_eq!(PageIndex::new(2).page_number(), 3);
        assert_eq!(PageIndex::new(4).to_string(), "5");
    }

    #[test]
    fn empty_collection_has_one_page() {
        // ceil(0 / n) - 1 would be -1, the last index saturates to 0
        assert_eq!(last_page_index(0, per_page(50)), PageIndex::FIRST);
        assert_eq!(total_pages(0, per_page(50)), 1);
        assert_eq!(page_bounds(PageIndex::FIRST, 0, per_page(50)), 0..0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(1, per_page(50)), 1);
        assert_eq!(total_pages(50, per_page(50)), 1);
        assert_eq!(total_pages(51, per_page(50)), 2);
        assert_eq!(total_pages(100, per_page(50)), 2);
        assert_eq!(total_pages(101, per_page(50)), 3);
        assert_eq!(total_pages(7, per_page(1)), 7);
    }

    #[test]
    fn clamp_saturates_both_ends() {
        assert_eq!(clamp_page_index(-5, 101, per_page(50)).get(), 0);
        assert_eq!(clamp_page_index(1, 101, per_page(50)).get(), 1);
        assert_eq!(clamp_page_index(i64::MAX, 101, per_page(50)).get(), 2);
        assert_eq!(clamp_page_index(3, 0, per_page(50)).get(), 0);
    }

    #[test]
    fn previous_reclamps_a_stale_index() {
        let stale = PageIndex::new(10);
        assert_eq!(previous_page_index(stale, 100, per_page(50)).get(), 1);
        assert_eq!(previous_page_index(PageIndex::FIRST, 100, per_page(50)).get(), 0);
    }

    #[test]
    fn bounds_past_the_end_are_empty() {
        assert_eq!(page_bounds(PageIndex::new(2), 101, per_page(50)), 100..101);
        assert_eq!(page_bounds(PageIndex::new(9), 101, per_page(50)), 101..101);
        assert_eq!(
            page_bounds(PageIndex::new(usize::MAX), 10, per_page(50)),
            10..10
        );
    }

    #[test]
    fn default_config() {
        let config = PaginationConfig::default();
        assert_eq!(config.items_per_page.get(), 50);
        assert_eq!(config.initial_page, 0);

        let paginator = Paginator::default();
        assert_eq!(paginator.per_page(), 50);
        assert_eq!(paginator.raw_index(), PageIndex::FIRST);
    }

    #[test]
    fn negative_initial_page_starts_on_first() {
        let paginator = Paginator::new(10, -3);
        assert_eq!(paginator.raw_index(), PageIndex::FIRST);
    }

    #[test]
    #[should_panic(expected = "at least one item per page")]
    fn zero_page_size_panics() {
        let _ = Paginator::new(0, 0);
    }

    #[test]
    fn subscribers_only_hear_changes() {
        let items: Vec<u32> = (0..100).collect();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let mut paginator = Paginator::new(50, 0);
        let sink = seen.clone();
        let id = paginator.subscribe(move |index| sink.borrow_mut().push(index.get()));

        paginator.first_page(&items);
        paginator.next_page(&items);
        paginator.next_page(&items);
        paginator.previous_page(&items);

        assert_eq!(*seen.borrow(), vec![1, 0]);

        assert!(paginator.unsubscribe(id));
        assert!(!paginator.unsubscribe(id));
        paginator.last_page(&items);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn apply_dispatches_actions() {
        let items: Vec<u32> = (0..230).collect();
        let mut paginator = Paginator::new(50, 0);

        assert_eq!(paginator.apply(PaginationAction::Last, &items).page, 5);
        assert_eq!(paginator.apply(PaginationAction::Back, &items).page, 4);
        assert_eq!(paginator.apply(PaginationAction::Jump(2), &items).page, 2);
        assert_eq!(paginator.apply(PaginationAction::Forward, &items).page, 3);
        assert_eq!(paginator.apply(PaginationAction::Jump(0), &items).page, 1);
        assert_eq!(paginator.apply(PaginationAction::Jump(99), &items).page, 5);
        assert_eq!(paginator.apply(PaginationAction::First, &items).page, 1);
    }

    #[test]
    fn page_helpers() {
        let items: Vec<u32> = (0..101).collect();
        let mut paginator = Paginator::new(50, 0);

        let page = paginator.paginate(&items);
        assert!(!page.has_previous());
        assert!(page.has_next());
        assert_eq!(page.item_range(), 0..50);

        let page = paginator.last_page(&items);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.index().get(), 2);
        assert_eq!(page.item_range(), 100..101);
    }
}
