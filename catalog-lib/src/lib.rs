//! Catalog API client library
//!
//! An async client for a remote item/category collection API: typed models,
//! a cursor pagination envelope, editable drafts, and a field-level
//! validation error taxonomy.

pub mod api;
pub mod error;
pub mod model;

mod client;

pub use api::CatalogApi;
pub use client::*;
