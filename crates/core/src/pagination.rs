//! Page-number pagination with clamping.
//!
//! A requested page outside `1..=num_pages` resolves to the nearest valid
//! page instead of failing; a missing or non-numeric page is page 1. An
//! empty result set still has one (empty) page.

use std::num::IntErrorKind;

use serde::Serialize;

/// Parse the raw `?page=` value. A number too large for `i64` saturates so
/// it clamps to the last page; anything else unparseable is page 1.
pub fn parse_page_number(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 1;
    };
    match raw.trim().parse::<i64>() {
        Ok(number) => number,
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 1,
        },
    }
}

/// A resolved page position within a result set of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: i64,
    pub num_pages: i64,
    pub total: i64,
    pub per_page: i64,
}

impl PageWindow {
    /// Clamp `requested` into the valid page range for `total` rows.
    pub fn resolve(requested: i64, total: i64, per_page: i64) -> Self {
        let per_page = per_page.max(1);
        let total = total.max(0);
        let num_pages = ((total + per_page - 1) / per_page).max(1);
        Self {
            number: requested.clamp(1, num_pages),
            num_pages,
            total,
            per_page,
        }
    }

    /// SQL `OFFSET` for this page.
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// One page of results, as handed to list contexts.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub total: i64,
    pub per_page: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self {
            items,
            number: window.number,
            num_pages: window.num_pages,
            total: window.total,
            per_page: window.per_page,
            has_next: window.has_next(),
            has_previous: window.has_previous(),
        }
    }
}
