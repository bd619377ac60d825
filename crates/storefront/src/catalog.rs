//! Catalog store: the fetched product list plus pure filtering.

use mathmarket_core::{Category, ProductId};
use tracing::instrument;

use crate::api::CatalogClient;
use crate::api::types::Product;
use crate::notify::{Notice, Notifier};

/// Category selection for the catalog grid. `All` is the sentinel that
/// passes every product through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }
}

/// Holds the fetched product list and answers filtered views of it.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Fetch the catalog from the product collaborator.
    ///
    /// On any transport or parse error the store degrades to an empty list
    /// and the user gets a notice; there is no retry.
    #[instrument(skip_all)]
    pub async fn load(&mut self, client: &CatalogClient, notifier: &dyn Notifier) {
        match client.list().await {
            Ok(products) => {
                self.products = products.as_ref().clone();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load catalog");
                self.products.clear();
                notifier.notify(Notice::error("Failed to load the catalog"));
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products, unfiltered.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Filtered view: exact category match (with the `All` sentinel) ANDed
    /// with a case-insensitive substring search on the title only.
    ///
    /// Pure function of the current state; recomputed on every call.
    #[must_use]
    pub fn filter(&self, category: CategoryFilter, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| category.matches(p.category))
            .filter(|p| query.is_empty() || p.title.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::product;

    fn store() -> CatalogStore {
        let mut first = product(1, 299);
        first.title = "Fractions and Percentages".to_string();
        first.category = Category::Grade5;

        let mut second = product(2, 199);
        second.title = "Equations Trainer".to_string();
        second.category = Category::Grade6;

        let mut third = product(3, 499);
        third.title = "OGE preparation".to_string();
        third.category = Category::OgeExam;

        CatalogStore::with_products(vec![first, second, third])
    }

    #[test]
    fn test_all_sentinel_passes_everything() {
        let store = store();
        assert_eq!(store.filter(CategoryFilter::All, "").len(), 3);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let store = store();
        let filtered = store.filter(CategoryFilter::Only(Category::Grade6), "");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_i64(), 2);
    }

    #[test]
    fn test_query_is_case_insensitive_and_title_only() {
        let store = store();
        let filtered = store.filter(CategoryFilter::All, "tRaInEr");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_i64(), 2);

        // Descriptions are not searched.
        let none = store.filter(CategoryFilter::All, "properties");
        assert!(none.is_empty());
    }

    #[test]
    fn test_filters_compose_with_and() {
        let store = store();
        let filtered = store.filter(CategoryFilter::Only(Category::Grade5), "trainer");
        assert!(filtered.is_empty());

        let filtered = store.filter(CategoryFilter::Only(Category::Grade5), "fractions");
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_find() {
        let store = store();
        assert!(store.find(ProductId::new(3)).is_some());
        assert!(store.find(ProductId::new(99)).is_none());
    }
}
