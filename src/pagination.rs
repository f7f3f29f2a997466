use crate::catalog::BookRecord;
use std::ops::Range;

/// Books per page used when nothing else is configured.
pub const BOOKS_PER_PAGE: usize = 36;

/// The filtered result set and the pagination cursor over it.
///
/// `page` is 1-based and never zero. `matches` is only ever replaced as a
/// whole through [`ViewState::replace_matches`], which also rewinds `page`.
#[derive(Debug, Clone)]
pub struct ViewState {
    matches: Vec<BookRecord>,
    page: usize,
    page_size: usize,
}

impl ViewState {
    pub fn new(matches: Vec<BookRecord>, page_size: usize) -> Self {
        Self {
            matches,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn matches(&self) -> &[BookRecord] {
        &self.matches
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Swap in a new result set and go back to the first page.
    pub fn replace_matches(&mut self, matches: Vec<BookRecord>) {
        self.matches = matches;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Index range of the current page, clamped to the result set.
    pub fn range(&self) -> Range<usize> {
        let len = self.matches.len();
        let start = ((self.page - 1) * self.page_size).min(len);
        let end = (self.page * self.page_size).min(len);
        start..end
    }

    /// Books on the current page only.
    pub fn current_slice(&self) -> &[BookRecord] {
        &self.matches[self.range()]
    }

    /// Every book revealed so far: pages `1..=page` concatenated.
    pub fn visible(&self) -> &[BookRecord] {
        let end = (self.page * self.page_size).min(self.matches.len());
        &self.matches[..end]
    }

    /// Books not yet revealed.
    pub fn remaining_count(&self) -> usize {
        self.matches.len().saturating_sub(self.page * self.page_size)
    }

    /// Move to the next page. Returns `false` and stays put when nothing is left.
    pub fn advance(&mut self) -> bool {
        if self.page * self.page_size < self.matches.len() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn find(&self, book_id: &str) -> Option<&BookRecord> {
        self.matches.iter().find(|b| b.id == book_id)
    }
}
