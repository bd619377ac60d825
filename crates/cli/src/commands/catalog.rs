//! Catalog browsing.

use mathmarket_core::Category;
use mathmarket_storefront::catalog::CategoryFilter;
use mathmarket_storefront::gate::Presentation;
use mathmarket_storefront::state::Storefront;

/// Fetch the catalog and print it, one row per product, with a marker for
/// products already owned or already in the cart.
pub async fn browse(storefront: &mut Storefront, category: Option<Category>, search: Option<&str>) {
    storefront.load_catalog().await;

    let filter = category.map_or(CategoryFilter::All, CategoryFilter::Only);
    let query = search.unwrap_or("");
    let products: Vec<_> = storefront
        .filtered_products(filter, query)
        .into_iter()
        .map(|p| (p.id, p.title.clone(), p.price, p.category))
        .collect();

    if products.is_empty() {
        println!("No products match.");
        return;
    }

    for (id, title, price, category) in products {
        let marker = match storefront.presentation(id) {
            Presentation::Purchased => " [owned]",
            Presentation::InCart => " [in cart]",
            Presentation::Purchasable => "",
        };
        println!("{:>5}  {:<12}  {:>8}  {title}{marker}", id.as_i64(), category.as_str(), price.to_string());
    }
}

/// Print live catalog statistics.
pub async fn stats(storefront: &Storefront) -> Result<(), super::CliError> {
    let stats = storefront.catalog_stats().await?;
    println!("Products: {}", stats.total_products);
    println!("Files:    {}", stats.total_files);
    Ok(())
}
