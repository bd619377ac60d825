//! Checkout flows: both end in a payment URL printed to stdout.

use mathmarket_storefront::state::Storefront;

use super::CliError;

/// Guest checkout: email only, no account is created.
pub async fn guest(storefront: &mut Storefront, email: &str) -> Result<(), CliError> {
    let payment_url = storefront.checkout_guest(email).await?;
    println!("Open this URL to pay:");
    println!("{payment_url}");
    Ok(())
}

/// Registered checkout: creates the account first, then requests payment.
/// A payment failure after registration leaves the account signed in.
pub async fn register(
    storefront: &mut Storefront,
    email: &str,
    password: &str,
    full_name: Option<&str>,
) -> Result<(), CliError> {
    let payment_url = storefront.checkout_register(email, password, full_name).await?;
    println!("Account created. Open this URL to pay:");
    println!("{payment_url}");
    Ok(())
}

/// Confirm a completed payment: print the order that was pending and clear
/// the cart for the next one.
pub fn complete(storefront: &mut Storefront) {
    match storefront.reconcile_return() {
        Some(order) => {
            println!("Thank you! Your order ({} item(s)) goes to {}.", order.items.len(), order.email);
            for item in &order.items {
                println!("  {:>8}  {}", item.product.price.to_string(), item.product.title);
            }
        }
        None => println!("No pending order."),
    }
}
