//! Route-driven prefetch bridge
//!
//! Runs before the external router commits a view transition: fetches the
//! target view's data dependencies, and reconciles fetches that resolve
//! after the route has already moved on.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use catalog_lib::CatalogApi;
use catalog_lib::error::Error;
use catalog_lib::model::Category;
use catalog_lib::model::Item;
use futures::join;
use log::debug;

use crate::nav::Route;

/// Issues the data fetches a route transition depends on.
///
/// Each transition gets a [`LoadTicket`]; the ticket is re-checked when a
/// fetch resolves, so a slow fetch for an abandoned route is discarded
/// instead of overwriting the newer view's data. Nothing here blocks beyond
/// the fetches themselves — a failed load mounts the view with error
/// content, it never hangs the transition.
pub struct LoaderBridge {
    api: Arc<dyn CatalogApi>,
    epoch: AtomicU64,
}

/// Witness for one route transition; stale once a later `navigate` happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
}

/// Result of a guarded load.
#[derive(Debug)]
pub enum LoaderOutcome<T> {
    /// The route is still current; the view applies the payload.
    Ready(T),
    /// The route changed while the fetch was in flight; discard the payload.
    Superseded,
}

impl<T> LoaderOutcome<T> {
    /// Returns the payload if the route was still current.
    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(payload) => Some(payload),
            Self::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

/// One independently loaded half of a view payload.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSlot<T> {
    Ready(T),
    /// The fetch failed; the view renders this half as unavailable.
    Unavailable(String),
}

impl<T> LoadSlot<T> {
    fn from_result(result: Result<T, Error>) -> Self {
        match result {
            Ok(payload) => Self::Ready(payload),
            Err(error) => Self::Unavailable(error.to_string()),
        }
    }

    /// Returns the payload if this half resolved.
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(payload) => Some(payload),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Payload for the category detail view: the category plus its items, each
/// half independently available.
#[derive(Debug)]
pub struct CategoryOverview {
    pub category: LoadSlot<Category>,
    pub items: LoadSlot<Vec<Item>>,
}

/// Payload for the item editor: the record under edit plus the category
/// list backing its reference field.
#[derive(Debug)]
pub struct ItemEditorPayload {
    pub item: LoadSlot<Item>,
    pub categories: LoadSlot<Vec<Category>>,
}

impl LoaderBridge {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            epoch: AtomicU64::new(0),
        }
    }

    /// Registers a route transition.
    ///
    /// Any load still in flight under an earlier ticket resolves as
    /// [`LoaderOutcome::Superseded`].
    pub fn navigate(&self, route: &Route) -> LoadTicket {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("loader: navigate {route} (epoch {epoch})");
        LoadTicket { epoch }
    }

    fn settle<T>(&self, ticket: &LoadTicket, payload: T) -> LoaderOutcome<T> {
        if self.epoch.load(Ordering::SeqCst) == ticket.epoch {
            LoaderOutcome::Ready(payload)
        } else {
            debug!("loader: discarding stale result (epoch {})", ticket.epoch);
            LoaderOutcome::Superseded
        }
    }

    /// Category list for the category index view.
    pub async fn categories(&self, ticket: &LoadTicket) -> LoaderOutcome<LoadSlot<Vec<Category>>> {
        let result = self.api.list_categories().await;
        self.settle(ticket, LoadSlot::from_result(result))
    }

    /// Category detail plus its item list, fetched concurrently.
    ///
    /// The two fetches have no ordering dependency and fail independently:
    /// the view renders whichever half resolved.
    pub async fn category_overview(
        &self,
        ticket: &LoadTicket,
        id: &str,
    ) -> LoaderOutcome<CategoryOverview> {
        let (category, items) = join!(self.api.get_category(id), self.api.category_items(id));
        self.settle(
            ticket,
            CategoryOverview {
                category: LoadSlot::from_result(category),
                items: LoadSlot::from_result(items),
            },
        )
    }

    /// Item under edit plus the category list, fetched concurrently.
    pub async fn item_editor(
        &self,
        ticket: &LoadTicket,
        id: &str,
    ) -> LoaderOutcome<ItemEditorPayload> {
        let (item, categories) = join!(self.api.get_item(id), self.api.list_categories());
        self.settle(
            ticket,
            ItemEditorPayload {
                item: LoadSlot::from_result(item),
                categories: LoadSlot::from_result(categories),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Notify;

    use super::*;
    use crate::testing::InMemoryCatalog;
    use crate::testing::category;
    use crate::testing::item;

    fn store() -> Arc<InMemoryCatalog> {
        Arc::new(
            InMemoryCatalog::new()
                .with_categories(vec![category("audio", "Audio"), category("video", "Video")])
                .with_items(vec![
                    item("1", "Amp", "audio"),
                    item("2", "Projector", "video"),
                ]),
        )
    }

    #[tokio::test]
    async fn test_current_ticket_applies() {
        let store = store();
        let bridge = LoaderBridge::new(store);

        let ticket = bridge.navigate(&Route::Categories);
        let outcome = bridge.categories(&ticket).await;
        let slot = outcome.into_ready().unwrap();
        assert_eq!(slot.as_ready().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_superseded_ticket_is_discarded() {
        let store = store();
        let bridge = LoaderBridge::new(store);

        let stale = bridge.navigate(&Route::Categories);
        let current = bridge.navigate(&Route::Category("audio".into()));

        assert!(bridge.categories(&stale).await.is_superseded());
        assert!(!bridge.category_overview(&current, "audio").await.is_superseded());
    }

    #[tokio::test]
    async fn test_slow_fetch_loses_to_later_navigation() {
        let store = store();
        let bridge = LoaderBridge::new(store.clone());

        let gate = Arc::new(Notify::new());
        store.gate_next("get_category", gate.clone());

        let slow_ticket = bridge.navigate(&Route::Category("audio".into()));
        let slow = bridge.category_overview(&slow_ticket, "audio");
        let rest = async {
            let ticket = bridge.navigate(&Route::Category("video".into()));
            gate.notify_one();
            bridge.category_overview(&ticket, "video").await
        };

        let (stale, fresh) = join!(slow, rest);
        assert!(stale.is_superseded());

        let fresh = fresh.into_ready().unwrap();
        assert_eq!(fresh.category.as_ready().unwrap().id, "video");
    }

    #[tokio::test]
    async fn test_composite_halves_fail_independently() {
        let store = store();
        store.fail("category_items");
        let bridge = LoaderBridge::new(store);

        let ticket = bridge.navigate(&Route::Category("audio".into()));
        let overview = bridge
            .category_overview(&ticket, "audio")
            .await
            .into_ready()
            .unwrap();

        assert_eq!(overview.category.as_ready().unwrap().name, "Audio");
        assert!(overview.items.is_unavailable());
    }

    #[tokio::test]
    async fn test_failed_single_load_mounts_with_error() {
        let store = store();
        store.fail("list_categories");
        let bridge = LoaderBridge::new(store);

        let ticket = bridge.navigate(&Route::Categories);
        let slot = bridge.categories(&ticket).await.into_ready().unwrap();
        assert!(slot.is_unavailable());
    }

    #[tokio::test]
    async fn test_item_editor_fetches_both_halves() {
        let store = store();
        let bridge = LoaderBridge::new(store.clone());

        let ticket = bridge.navigate(&Route::ItemEdit("1".into()));
        let payload = bridge.item_editor(&ticket, "1").await.into_ready().unwrap();

        assert_eq!(payload.item.as_ready().unwrap().name, "Amp");
        assert_eq!(payload.categories.as_ready().unwrap().len(), 2);
        assert_eq!(store.call_count("get_item"), 1);
        assert_eq!(store.call_count("list_categories"), 1);
    }
}
