//! Route vocabulary shared with the external router

use std::fmt;

/// A view path the external router can commit.
///
/// Mutation outcomes carry the route the router should navigate to once the
/// mutation lands; the session layer never dispatches views itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Paginated item list.
    Items,
    /// Editor for one item.
    ItemEdit(String),
    /// Category list.
    Categories,
    /// Category detail with its item list.
    Category(String),
    /// Editor for one category.
    CategoryEdit(String),
    /// Category creation form.
    CategoryNew,
}

impl Route {
    /// Renders the view path for the router.
    pub fn path(&self) -> String {
        match self {
            Self::Items => "/product/".to_string(),
            Self::ItemEdit(id) => format!("/product/{id}/"),
            Self::Categories => "/category".to_string(),
            Self::Category(id) => format!("/category/{id}"),
            Self::CategoryEdit(id) => format!("/category/{id}/edit"),
            Self::CategoryNew => "/category/new".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Items.path(), "/product/");
        assert_eq!(Route::ItemEdit("42".into()).path(), "/product/42/");
        assert_eq!(Route::Categories.path(), "/category");
        assert_eq!(Route::Category("7".into()).path(), "/category/7");
        assert_eq!(Route::CategoryEdit("7".into()).path(), "/category/7/edit");
        assert_eq!(Route::CategoryNew.path(), "/category/new");
    }
}
