//! HTTP execution of the collection operations

use async_trait::async_trait;
use reqwest::Method;

use super::CatalogApi;
use super::collections;
use crate::CatalogClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Category;
use crate::model::CategoryDraft;
use crate::model::Cursor;
use crate::model::Item;
use crate::model::ItemDraft;
use crate::model::Page;

impl CatalogClient {
    fn resource_url(&self, collection: &str, id: &str) -> String {
        format!("{}{}/", self.collection_url(collection), id)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_items(&self, cursor: Option<&Cursor>) -> Result<Page<Item>, Error> {
        let url = match cursor {
            Some(cursor) => cursor.as_str().to_owned(),
            None => self.first_page(collections::ITEMS).as_str().to_owned(),
        };

        let response = self.request(Method::GET, &url, None).await?;
        let page: Page<Item> = response.json().await.map_err(ApiError::from)?;
        Ok(page)
    }

    async fn get_item(&self, id: &str) -> Result<Item, Error> {
        let url = self.resource_url(collections::ITEMS, id);
        let response = self.request(Method::GET, &url, None).await?;
        let item: Item = response.json().await.map_err(ApiError::from)?;
        Ok(item)
    }

    async fn create_item(&self, draft: &ItemDraft) -> Result<Item, Error> {
        let url = self.collection_url(collections::ITEMS);
        let body = serde_json::to_string(draft)?;
        let response = self.request(Method::POST, &url, Some(body)).await?;
        let item: Item = response.json().await.map_err(ApiError::from)?;
        Ok(item)
    }

    async fn update_item(&self, id: &str, draft: &ItemDraft) -> Result<Item, Error> {
        let url = self.resource_url(collections::ITEMS, id);
        let body = serde_json::to_string(draft)?;
        let response = self.request(Method::PUT, &url, Some(body)).await?;
        let item: Item = response.json().await.map_err(ApiError::from)?;
        Ok(item)
    }

    async fn delete_item(&self, id: &str) -> Result<(), Error> {
        let url = self.resource_url(collections::ITEMS, id);
        self.request(Method::DELETE, &url, None).await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        let url = self.collection_url(collections::CATEGORIES);
        let response = self.request(Method::GET, &url, None).await?;
        let categories: Vec<Category> = response.json().await.map_err(ApiError::from)?;
        Ok(categories)
    }

    async fn get_category(&self, id: &str) -> Result<Category, Error> {
        let url = self.resource_url(collections::CATEGORIES, id);
        let response = self.request(Method::GET, &url, None).await?;
        let category: Category = response.json().await.map_err(ApiError::from)?;
        Ok(category)
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, Error> {
        let url = self.collection_url(collections::CATEGORIES);
        let body = serde_json::to_string(draft)?;
        let response = self.request(Method::POST, &url, Some(body)).await?;
        let category: Category = response.json().await.map_err(ApiError::from)?;
        Ok(category)
    }

    async fn update_category(&self, id: &str, draft: &CategoryDraft) -> Result<Category, Error> {
        let url = self.resource_url(collections::CATEGORIES, id);
        let body = serde_json::to_string(draft)?;
        let response = self.request(Method::PUT, &url, Some(body)).await?;
        let category: Category = response.json().await.map_err(ApiError::from)?;
        Ok(category)
    }

    async fn delete_category(&self, id: &str) -> Result<(), Error> {
        let url = self.resource_url(collections::CATEGORIES, id);
        self.request(Method::DELETE, &url, None).await?;
        Ok(())
    }

    async fn category_items(&self, id: &str) -> Result<Vec<Item>, Error> {
        let url = format!(
            "{}{}/products/",
            self.collection_url(collections::CATEGORIES),
            id
        );
        let response = self.request(Method::GET, &url, None).await?;
        let items: Vec<Item> = response.json().await.map_err(ApiError::from)?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::CatalogClient;
    use crate::api::collections;

    fn client() -> CatalogClient {
        CatalogClient::builder()
            .base_url("http://127.0.0.1:8000")
            .build()
            .unwrap()
    }

    #[test]
    fn test_resource_urls() {
        let client = client();
        assert_eq!(
            client.resource_url(collections::ITEMS, "42"),
            "http://127.0.0.1:8000/api/products/42/"
        );
        assert_eq!(
            client.resource_url(collections::CATEGORIES, "66f0e1d2"),
            "http://127.0.0.1:8000/api/categories/66f0e1d2/"
        );
    }
}
