//! Cursor-walking pager for the item collection

use std::sync::Arc;

use catalog_lib::CatalogApi;
use catalog_lib::error::Error;
use catalog_lib::model::Cursor;
use catalog_lib::model::Item;
use catalog_lib::model::Page;

use crate::selection::Selection;

/// Walks the item collection one page at a time.
///
/// Exactly one page is held in memory; `previous` re-fetches through the
/// server's cursor rather than replaying local history. A failed fetch
/// leaves the previously loaded page, cursor, and selection untouched —
/// stale-but-present beats empty. The embedded [`Selection`] is keyed by
/// entity id and re-validated against every replacement page.
pub struct ItemPager {
    api: Arc<dyn CatalogApi>,
    /// `None` requests the client's first-page descriptor.
    cursor: Option<Cursor>,
    page: Page<Item>,
    selection: Selection,
}

impl ItemPager {
    /// Creates a pager positioned on the first-page descriptor. Nothing is
    /// fetched until [`refresh`](Self::refresh) runs.
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            cursor: None,
            page: Page::new(Vec::new()),
            selection: Selection::new(),
        }
    }

    /// Fetches the page behind the current cursor (the first page
    /// initially).
    pub async fn refresh(&mut self) -> Result<(), Error> {
        let cursor = self.cursor.clone();
        self.replace_with(cursor).await
    }

    /// Replaces the current page with the one behind `cursor`.
    pub async fn goto(&mut self, cursor: Cursor) -> Result<(), Error> {
        self.replace_with(Some(cursor)).await
    }

    /// Advances to the next page. No-op returning `false` when the server
    /// reported no next cursor — a disabled control, not an error.
    pub async fn next(&mut self) -> Result<bool, Error> {
        match self.page.next().cloned() {
            Some(cursor) => {
                self.goto(cursor).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Steps back to the previous page. No-op returning `false` when the
    /// server reported no previous cursor.
    pub async fn previous(&mut self) -> Result<bool, Error> {
        match self.page.previous().cloned() {
            Some(cursor) => {
                self.goto(cursor).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace_with(&mut self, cursor: Option<Cursor>) -> Result<(), Error> {
        let page = self.api.list_items(cursor.as_ref()).await?;
        self.selection
            .retain_within(page.results().iter().map(|item| item.id.as_str()));
        self.page = page;
        self.cursor = cursor;
        Ok(())
    }

    /// The records of the currently loaded page.
    pub fn items(&self) -> &[Item] {
        self.page.results()
    }

    pub fn has_next(&self) -> bool {
        self.page.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.page.has_previous()
    }

    /// Toggles the expansion of one row by entity id.
    pub fn toggle(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    /// The expanded entity id, if any.
    pub fn expanded(&self) -> Option<&str> {
        self.selection.expanded()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

/// Pagination-less presentation of pre-loaded rows (the category detail's
/// item list), sharing the pager's id-keyed expansion behavior.
#[derive(Debug, Default)]
pub struct LoadedItems {
    items: Vec<Item>,
    selection: Selection,
}

impl LoadedItems {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            selection: Selection::new(),
        }
    }

    /// Replaces the rows wholesale, re-validating the expansion against the
    /// new identifier set.
    pub fn replace(&mut self, items: Vec<Item>) {
        self.selection
            .retain_within(items.iter().map(|item| item.id.as_str()));
        self.items = items;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn toggle(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    pub fn expanded(&self) -> Option<&str> {
        self.selection.expanded()
    }
}
