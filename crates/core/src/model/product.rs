//! Product domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, OwnedImported, ProductId};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Whether the product is owned or imported; decides which affiliation
    /// field is set.
    pub owned_imported: OwnedImported,
    /// Producing company, set when `owned_imported` is `Owned`.
    pub company_name: Option<String>,
    /// Sourcing shop, set when `owned_imported` is `Imported`.
    pub shop_name: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub stock_quantity: i32,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether exactly the affiliation field matching `owned_imported` is set.
    #[must_use]
    pub const fn affiliation_is_consistent(&self) -> bool {
        match self.owned_imported {
            OwnedImported::Owned => self.company_name.is_some() && self.shop_name.is_none(),
            OwnedImported::Imported => self.shop_name.is_some() && self.company_name.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(flag: OwnedImported, company: Option<&str>, shop: Option<&str>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Widget".to_string(),
            category_id: CategoryId::new(1),
            owned_imported: flag,
            company_name: company.map(String::from),
            shop_name: shop.map(String::from),
            price: Decimal::new(999, 2),
            stock_quantity: 10,
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_affiliation_consistency() {
        assert!(product(OwnedImported::Owned, Some("Acme"), None).affiliation_is_consistent());
        assert!(product(OwnedImported::Imported, None, Some("Bazaar")).affiliation_is_consistent());
        assert!(!product(OwnedImported::Owned, None, Some("Bazaar")).affiliation_is_consistent());
        assert!(!product(OwnedImported::Imported, Some("Acme"), Some("Bazaar"))
            .affiliation_is_consistent());
    }
}
