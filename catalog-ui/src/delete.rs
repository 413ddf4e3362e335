//! Confirmation-gated deletion flow

use std::sync::Arc;

use catalog_lib::CatalogApi;
use log::debug;

use crate::nav::Route;

/// Yes/no gate asked before a deletion is issued.
///
/// The embedding UI presents a blocking confirm dialog; tests substitute a
/// canned answer. Closures over the prompt work directly.
pub trait ConfirmGate {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> ConfirmGate for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Outcome of a deletion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The gate declined; no request was issued and nothing changed.
    Declined,
    /// Deleted; the router should navigate to the owning list view.
    Deleted(Route),
    /// The delete call failed; nothing was removed anywhere.
    Failed(String),
}

/// Deletes one entity behind an explicit confirmation.
///
/// Never removes anything from in-memory lists optimistically — the owning
/// view re-fetches after the navigation the outcome carries.
pub struct DeleteFlow {
    api: Arc<dyn CatalogApi>,
}

impl DeleteFlow {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// Deletes an item after confirmation; success navigates to the item
    /// list.
    pub async fn delete_item(&self, id: &str, gate: &dyn ConfirmGate) -> DeleteOutcome {
        if !gate.confirm("Are you sure you want to delete this product?") {
            debug!("delete: declined for item {id}");
            return DeleteOutcome::Declined;
        }

        match self.api.delete_item(id).await {
            Ok(()) => DeleteOutcome::Deleted(Route::Items),
            Err(error) => DeleteOutcome::Failed(error.to_string()),
        }
    }

    /// Deletes a category after confirmation; success navigates to the
    /// category list.
    pub async fn delete_category(&self, id: &str, gate: &dyn ConfirmGate) -> DeleteOutcome {
        if !gate.confirm("Are you sure you want to delete this category?") {
            debug!("delete: declined for category {id}");
            return DeleteOutcome::Declined;
        }

        match self.api.delete_category(id).await {
            Ok(()) => DeleteOutcome::Deleted(Route::Categories),
            Err(error) => DeleteOutcome::Failed(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryCatalog;
    use crate::testing::category;
    use crate::testing::item;

    fn store() -> Arc<InMemoryCatalog> {
        Arc::new(
            InMemoryCatalog::new()
                .with_categories(vec![category("audio", "Audio")])
                .with_items(vec![item("42", "Amp", "audio")]),
        )
    }

    #[tokio::test]
    async fn test_declined_gate_issues_no_request() {
        let store = store();
        let flow = DeleteFlow::new(store.clone());

        let outcome = flow.delete_item("42", &|_: &str| false).await;

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert!(store.calls().is_empty());
        assert!(store.has_item("42"));
    }

    #[tokio::test]
    async fn test_confirmed_item_delete_navigates_to_list() {
        let store = store();
        let flow = DeleteFlow::new(store.clone());

        let outcome = flow.delete_item("42", &|_: &str| true).await;

        assert_eq!(outcome, DeleteOutcome::Deleted(Route::Items));
        assert!(!store.has_item("42"));
    }

    #[tokio::test]
    async fn test_confirmed_category_delete_navigates_to_list() {
        let store = store();
        let flow = DeleteFlow::new(store.clone());

        let outcome = flow.delete_category("audio", &|_: &str| true).await;

        assert_eq!(outcome, DeleteOutcome::Deleted(Route::Categories));
        assert!(!store.has_category("audio"));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_entity_in_place() {
        let store = store();
        store.fail("delete_category");
        let flow = DeleteFlow::new(store.clone());

        let outcome = flow.delete_category("audio", &|_: &str| true).await;

        assert!(matches!(outcome, DeleteOutcome::Failed(_)));
        assert!(store.has_category("audio"));
    }

    #[tokio::test]
    async fn test_prompt_reaches_the_gate() {
        let store = store();
        let flow = DeleteFlow::new(store);

        let gate = |prompt: &str| prompt.contains("category");
        assert_ne!(
            flow.delete_category("audio", &gate).await,
            DeleteOutcome::Declined
        );
    }
}
