//! Remote collection operations

mod http;

use async_trait::async_trait;

use crate::error::Error;
use crate::model::Category;
use crate::model::CategoryDraft;
use crate::model::Cursor;
use crate::model::Item;
use crate::model::ItemDraft;
use crate::model::Page;

/// Collection paths under the `/api` prefix.
pub(crate) mod collections {
    pub(crate) const ITEMS: &str = "/products/";
    pub(crate) const CATEGORIES: &str = "/categories/";
}

/// The remote resource seam the session layer talks through.
///
/// [`CatalogClient`](crate::CatalogClient) is the production implementation;
/// tests substitute an in-memory store. Every call is a single attempt — a
/// non-success status or transport fault surfaces as [`Error`] and is never
/// retried.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one page of the item collection.
    ///
    /// `None` requests the first-page descriptor with the configured page
    /// size; `Some` replays a server-issued cursor verbatim.
    async fn list_items(&self, cursor: Option<&Cursor>) -> Result<Page<Item>, Error>;

    /// Fetches a single item by id.
    async fn get_item(&self, id: &str) -> Result<Item, Error>;

    /// Creates an item from the submitted draft fields.
    async fn create_item(&self, draft: &ItemDraft) -> Result<Item, Error>;

    /// Full-replace update of the submitted fields.
    async fn update_item(&self, id: &str, draft: &ItemDraft) -> Result<Item, Error>;

    /// Deletes a single item.
    async fn delete_item(&self, id: &str) -> Result<(), Error>;

    /// Fetches the full, unpaginated category collection.
    async fn list_categories(&self) -> Result<Vec<Category>, Error>;

    /// Fetches a single category by id.
    async fn get_category(&self, id: &str) -> Result<Category, Error>;

    /// Creates a category from the submitted draft fields.
    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, Error>;

    /// Full-replace update of the submitted fields.
    async fn update_category(&self, id: &str, draft: &CategoryDraft) -> Result<Category, Error>;

    /// Deletes a single category.
    async fn delete_category(&self, id: &str) -> Result<(), Error>;

    /// Unpaginated listing of the items referencing one category.
    async fn category_items(&self, id: &str) -> Result<Vec<Item>, Error>;
}
