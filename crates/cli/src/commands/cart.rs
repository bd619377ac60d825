//! Cart manipulation and display.

use mathmarket_core::ProductId;
use mathmarket_storefront::cart::DISCOUNT_THRESHOLD;
use mathmarket_storefront::state::Storefront;

/// Add a product to the cart. Needs the catalog loaded to resolve the ID;
/// duplicate and already-owned products are reported via notices.
pub async fn add(storefront: &mut Storefront, id: i64) {
    storefront.load_catalog().await;
    let _ = storefront.add_to_cart(ProductId::new(id));
}

/// Remove a product from the cart.
pub fn remove(storefront: &mut Storefront, id: i64) {
    storefront.remove_from_cart(ProductId::new(id));
}

/// Print the cart with subtotal, discount, and total.
pub fn show(storefront: &Storefront) {
    let cart = storefront.cart();
    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }

    for item in cart.items() {
        println!("{:>5}  {:>8}  {}", item.product.id.as_i64(), item.product.price.to_string(), item.product.title);
    }
    println!();
    println!("Subtotal: {}", cart.subtotal());

    let discount = cart.discount();
    if !discount.is_zero() {
        println!("Discount: -{discount}");
    } else {
        let missing = cart.progress_to_discount();
        println!("Add {missing} more item(s) to unlock the {DISCOUNT_THRESHOLD}-item discount.");
    }
    println!("Total:    {}", cart.total());
}
