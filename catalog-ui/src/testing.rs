//! In-memory store backing the session tests

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use catalog_lib::CatalogApi;
use catalog_lib::error::ApiError;
use catalog_lib::error::Error;
use catalog_lib::error::ValidationErrors;
use catalog_lib::model::Category;
use catalog_lib::model::CategoryDraft;
use catalog_lib::model::Cursor;
use catalog_lib::model::Item;
use catalog_lib::model::ItemDraft;
use catalog_lib::model::Page;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Notify;

/// In-memory [`CatalogApi`] with canned paging and scriptable failures.
///
/// Records every issued call so tests can assert that declined or
/// short-circuited flows stay off the wire. Cursors are `page:N` tokens and
/// honor the next/previous stability the real server guarantees.
pub(crate) struct InMemoryCatalog {
    state: Mutex<State>,
    gate: Mutex<Option<(String, Arc<Notify>)>>,
}

struct State {
    items: Vec<Item>,
    categories: Vec<Category>,
    page_size: usize,
    next_id: usize,
    calls: Vec<String>,
    failing: BTreeSet<String>,
    reject_next_write: Option<ValidationErrors>,
}

pub(crate) fn item(id: &str, name: &str, category: &str) -> Item {
    Item {
        id: id.into(),
        name: name.into(),
        description: format!("{name} description"),
        category: category.into(),
        brand: "Acme".into(),
        price: Decimal::new(1999, 2),
        quantity: "3".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
        description: format!("{name} description"),
    }
}

impl InMemoryCatalog {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                items: Vec::new(),
                categories: Vec::new(),
                page_size: 2,
                next_id: 1,
                calls: Vec::new(),
                failing: BTreeSet::new(),
                reject_next_write: None,
            }),
            gate: Mutex::new(None),
        }
    }

    pub(crate) fn with_items(self, items: Vec<Item>) -> Self {
        self.state.lock().unwrap().items = items;
        self
    }

    pub(crate) fn with_categories(self, categories: Vec<Category>) -> Self {
        self.state.lock().unwrap().categories = categories;
        self
    }

    pub(crate) fn with_page_size(self, page_size: usize) -> Self {
        self.state.lock().unwrap().page_size = page_size;
        self
    }

    /// Makes every subsequent `method` call fail with an opaque 500.
    pub(crate) fn fail(&self, method: &str) {
        self.state.lock().unwrap().failing.insert(method.to_owned());
    }

    pub(crate) fn unfail(&self, method: &str) {
        self.state.lock().unwrap().failing.remove(method);
    }

    /// Rejects the next write with a 400 carrying `errors`.
    pub(crate) fn reject_next_write(&self, errors: ValidationErrors) {
        self.state.lock().unwrap().reject_next_write = Some(errors);
    }

    /// Parks the next `method` call until `notify` is released.
    pub(crate) fn gate_next(&self, method: &str, notify: Arc<Notify>) {
        *self.gate.lock().unwrap() = Some((method.to_owned(), notify));
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn call_count(&self, method: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.starts_with(method))
            .count()
    }

    pub(crate) fn has_item(&self, id: &str) -> bool {
        self.state.lock().unwrap().items.iter().any(|item| item.id == id)
    }

    pub(crate) fn has_category(&self, id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .categories
            .iter()
            .any(|category| category.id == id)
    }

    pub(crate) fn snapshot_items(&self) -> Vec<Item> {
        self.state.lock().unwrap().items.clone()
    }

    pub(crate) fn snapshot_categories(&self) -> Vec<Category> {
        self.state.lock().unwrap().categories.clone()
    }

    async fn enter(&self, call: String, method: &str) -> Result<(), Error> {
        let pending = {
            let mut slot = self.gate.lock().unwrap();
            if slot.as_ref().is_some_and(|(gated, _)| gated == method) {
                slot.take().map(|(_, notify)| notify)
            } else {
                None
            }
        };
        if let Some(notify) = pending {
            notify.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(method) {
            return Err(Error::Api(ApiError::http(500, "internal error")));
        }
        Ok(())
    }

    fn take_rejection(&self) -> Option<Error> {
        self.state
            .lock()
            .unwrap()
            .reject_next_write
            .take()
            .map(|errors| Error::Api(ApiError::http_with_errors(400, errors.summary(), errors)))
    }

    fn parse_price(draft: &ItemDraft) -> Result<Decimal, Error> {
        draft.price.parse::<Decimal>().map_err(|_| {
            let mut errors = ValidationErrors::new();
            errors.insert("price", "A valid number is required.");
            Error::Api(ApiError::http_with_errors(400, errors.summary(), errors))
        })
    }
}

fn page_number(cursor: Option<&Cursor>) -> Result<usize, Error> {
    let Some(cursor) = cursor else { return Ok(1) };
    cursor
        .as_str()
        .strip_prefix("page:")
        .and_then(|raw| raw.parse::<usize>().ok())
        .ok_or_else(|| Error::Api(ApiError::http(404, "Invalid page.")))
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn list_items(&self, cursor: Option<&Cursor>) -> Result<Page<Item>, Error> {
        let page_no = page_number(cursor)?;
        self.enter(format!("list_items page:{page_no}"), "list_items").await?;

        let state = self.state.lock().unwrap();
        let chunks: Vec<&[Item]> = state.items.chunks(state.page_size.max(1)).collect();
        let total_pages = chunks.len().max(1);
        if page_no > total_pages {
            return Err(Error::Api(ApiError::http(404, "Invalid page.")));
        }

        let results = chunks
            .get(page_no - 1)
            .map(|chunk| chunk.to_vec())
            .unwrap_or_default();
        let mut page = Page::new(results);
        if page_no < total_pages {
            page = page.with_next(Cursor::new(format!("page:{}", page_no + 1)));
        }
        if page_no > 1 {
            page = page.with_previous(Cursor::new(format!("page:{}", page_no - 1)));
        }
        Ok(page)
    }

    async fn get_item(&self, id: &str) -> Result<Item, Error> {
        self.enter(format!("get_item {id}"), "get_item").await?;
        let state = self.state.lock().unwrap();
        state
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| Error::Api(ApiError::http(404, "Product not found")))
    }

    async fn create_item(&self, draft: &ItemDraft) -> Result<Item, Error> {
        self.enter("create_item".to_string(), "create_item").await?;
        if let Some(error) = self.take_rejection() {
            return Err(error);
        }
        let price = Self::parse_price(draft)?;

        let mut state = self.state.lock().unwrap();
        let id = format!("item-{}", state.next_id);
        state.next_id += 1;
        let item = Item {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            brand: draft.brand.clone(),
            price,
            quantity: draft.quantity.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: &str, draft: &ItemDraft) -> Result<Item, Error> {
        self.enter(format!("update_item {id}"), "update_item").await?;
        if let Some(error) = self.take_rejection() {
            return Err(error);
        }
        let price = Self::parse_price(draft)?;

        let mut state = self.state.lock().unwrap();
        let item = state
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| Error::Api(ApiError::http(404, "Product not found")))?;
        item.name = draft.name.clone();
        item.description = draft.description.clone();
        item.category = draft.category.clone();
        item.brand = draft.brand.clone();
        item.price = price;
        item.quantity = draft.quantity.clone();
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn delete_item(&self, id: &str) -> Result<(), Error> {
        self.enter(format!("delete_item {id}"), "delete_item").await?;
        let mut state = self.state.lock().unwrap();
        let before = state.items.len();
        state.items.retain(|item| item.id != id);
        if state.items.len() == before {
            return Err(Error::Api(ApiError::http(404, "Product not found")));
        }
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.enter("list_categories".to_string(), "list_categories").await?;
        Ok(self.state.lock().unwrap().categories.clone())
    }

    async fn get_category(&self, id: &str) -> Result<Category, Error> {
        self.enter(format!("get_category {id}"), "get_category").await?;
        let state = self.state.lock().unwrap();
        state
            .categories
            .iter()
            .find(|category| category.id == id)
            .cloned()
            .ok_or_else(|| Error::Api(ApiError::http(404, "Category not found")))
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, Error> {
        self.enter("create_category".to_string(), "create_category").await?;
        if let Some(error) = self.take_rejection() {
            return Err(error);
        }

        let mut state = self.state.lock().unwrap();
        let id = format!("cat-{}", state.next_id);
        state.next_id += 1;
        let category = Category {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: &str, draft: &CategoryDraft) -> Result<Category, Error> {
        self.enter(format!("update_category {id}"), "update_category").await?;
        if let Some(error) = self.take_rejection() {
            return Err(error);
        }

        let mut state = self.state.lock().unwrap();
        let category = state
            .categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or_else(|| Error::Api(ApiError::http(404, "Category not found")))?;
        category.name = draft.name.clone();
        category.description = draft.description.clone();
        Ok(category.clone())
    }

    async fn delete_category(&self, id: &str) -> Result<(), Error> {
        self.enter(format!("delete_category {id}"), "delete_category").await?;
        let mut state = self.state.lock().unwrap();
        let before = state.categories.len();
        state.categories.retain(|category| category.id != id);
        if state.categories.len() == before {
            return Err(Error::Api(ApiError::http(404, "Category not found")));
        }
        Ok(())
    }

    async fn category_items(&self, id: &str) -> Result<Vec<Item>, Error> {
        self.enter(format!("category_items {id}"), "category_items").await?;
        let state = self.state.lock().unwrap();
        Ok(state
            .items
            .iter()
            .filter(|item| item.category == id)
            .cloned()
            .collect())
    }
}
