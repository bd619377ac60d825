//! Account commands: login, logout, purchase history.

use mathmarket_storefront::state::Storefront;

use super::CliError;

pub async fn login(storefront: &mut Storefront, email: &str, password: &str) -> Result<(), CliError> {
    storefront.login(email, password).await?;
    Ok(())
}

pub fn logout(storefront: &mut Storefront) {
    storefront.logout();
}

/// Print the signed-in account's paid purchases with their download links.
pub async fn purchases(storefront: &Storefront) -> Result<(), CliError> {
    let records = storefront.my_purchases().await?;
    if records.is_empty() {
        println!("No purchases yet.");
        return Ok(());
    }

    for record in records {
        let date = record
            .created_at
            .map_or_else(String::new, |at| at.format(" (%Y-%m-%d)").to_string());
        println!("{:>5}  {:>8}  {}{date}", record.product_id.as_i64(), record.product_price.to_string(), record.product_title);
        if let Some(url) = &record.full_pdf_with_answers_url {
            println!("       with answers:    {url}");
        }
        if let Some(url) = &record.full_pdf_without_answers_url {
            println!("       without answers: {url}");
        }
    }
    Ok(())
}
