//! Wire types for the backend collaborators.
//!
//! These mirror the JSON the deployed endpoints actually send. Optional asset
//! links may arrive absent or as empty strings; both decode to `None`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use mathmarket_core::{Category, Email, Price, ProductId, ProductKind, PurchaseId, UserId};

// =============================================================================
// Catalog
// =============================================================================

/// A catalog product. Read-only in the storefront; created and edited only
/// through the admin collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Plain text description, newline-structured.
    pub description: String,
    /// Price in whole rubles.
    pub price: Price,
    /// Grade level or exam track.
    pub category: Category,
    /// Product format.
    #[serde(rename = "type")]
    pub kind: ProductKind,
    /// Downloadable sample PDF.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sample_pdf_url: Option<Url>,
    /// Full PDF with answer key.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub full_pdf_with_answers_url: Option<Url>,
    /// Full PDF without answer key.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub full_pdf_without_answers_url: Option<Url>,
    /// Free bonus trainer links.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub trainer1_url: Option<Url>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub trainer2_url: Option<Url>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub trainer3_url: Option<Url>,
    /// Whether the product is free of charge.
    #[serde(default)]
    pub is_free: bool,
    /// Preview image shown on the product card.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub preview_image_url: Option<Url>,
}

/// Catalog statistics from the `?stats=true` query variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Number of products in the catalog.
    pub total_products: u64,
    /// Number of attached PDF/trainer files.
    pub total_files: u64,
}

// =============================================================================
// Purchases
// =============================================================================

/// One paid order line for an identity, as returned by the purchase-lookup
/// collaborator. The storefront never creates these; it only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Order line ID.
    pub id: PurchaseId,
    /// The purchased product.
    pub product_id: ProductId,
    /// Title captured at purchase time.
    pub product_title: String,
    /// Price paid, in whole rubles.
    pub product_price: Price,
    /// Full PDF with answer key, if the product still exists.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub full_pdf_with_answers_url: Option<Url>,
    /// Full PDF without answer key.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub full_pdf_without_answers_url: Option<Url>,
    /// When the order was placed.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub created_at: Option<NaiveDateTime>,
}

/// Response envelope of the purchase-lookup collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseList {
    pub purchases: Vec<PurchaseRecord>,
}

// =============================================================================
// Auth
// =============================================================================

/// Request body of the customer auth collaborator.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    /// `"register"` or `"login"`.
    pub action: &'static str,
    pub email: &'a Email,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'a str>,
}

/// Success body of the customer auth collaborator. `token` is checked for
/// presence by the client before anything is persisted.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub email: Email,
    pub user_id: UserId,
    #[serde(default)]
    pub full_name: Option<String>,
}

// =============================================================================
// Deserialization helpers
// =============================================================================

/// Deserialize an optional field where the collaborator sends `""` (or omits
/// the key entirely) to mean "not set".
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_minimal_payload() {
        let json = r#"{
            "id": 3,
            "title": "Geometry worksheet",
            "description": "Basic shapes and their properties",
            "price": 149,
            "category": "grade-7",
            "type": "worksheet"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Price::new(149));
        assert_eq!(product.category, Category::Grade7);
        assert_eq!(product.kind, ProductKind::Worksheet);
        assert!(!product.is_free);
        assert!(product.sample_pdf_url.is_none());
    }

    #[test]
    fn test_product_rejects_bad_category() {
        let json = r#"{
            "id": 3,
            "title": "x",
            "description": "y",
            "price": 149,
            "category": "grade-13",
            "type": "worksheet"
        }"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_purchase_record_empty_urls_decode_to_none() {
        let json = r#"{
            "id": 11,
            "product_id": 7,
            "product_title": "Trigonometry guide",
            "product_price": 399,
            "full_pdf_with_answers_url": "",
            "full_pdf_without_answers_url": "https://cdn.example/trig.pdf",
            "created_at": "2024-06-01T10:30:00"
        }"#;
        let record: PurchaseRecord = serde_json::from_str(json).unwrap();
        assert!(record.full_pdf_with_answers_url.is_none());
        assert_eq!(
            record.full_pdf_without_answers_url.unwrap().as_str(),
            "https://cdn.example/trig.pdf"
        );
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_purchase_record_empty_created_at() {
        let json = r#"{
            "id": 11,
            "product_id": 7,
            "product_title": "x",
            "product_price": 399,
            "created_at": ""
        }"#;
        let record: PurchaseRecord = serde_json::from_str(json).unwrap();
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_auth_request_omits_absent_name() {
        let email = Email::parse("user@example.com").unwrap();
        let request = AuthRequest {
            action: "login",
            email: &email,
            password: "hunter2aa",
            full_name: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("full_name"));
        assert!(json.contains("\"action\":\"login\""));
    }
}
