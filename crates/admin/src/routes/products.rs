//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use orderdeck_core::model::Product;
use orderdeck_core::types::{CategoryId, OwnedImported, ProductId};

use crate::{
    db::{ProductRepository, products::{NewProduct, ProductPatch}},
    error::AppError,
    middleware::RequireAdmin,
    state::AppState,
};

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    /// All products, newest first.
    pub products: Vec<Product>,
}

/// Input for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub category_id: i32,
    /// "owned" or "imported".
    pub owned_imported: String,
    pub company_name: Option<String>,
    pub shop_name: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    #[serde(default)]
    pub description: String,
}

/// Input for updating a product.
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub description: Option<String>,
}

impl CreateProductInput {
    /// Validate and convert into repository input.
    ///
    /// Enforces the affiliation invariant: an owned product names its
    /// company, an imported product names its shop, never both.
    fn into_new_product(self) -> Result<NewProduct, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".to_string()));
        }
        let owned_imported: OwnedImported = self
            .owned_imported
            .parse()
            .map_err(AppError::BadRequest)?;
        if self.price < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "price must not be negative".to_string(),
            ));
        }
        if self.stock_quantity < 0 {
            return Err(AppError::BadRequest(
                "stock_quantity must not be negative".to_string(),
            ));
        }

        let company_name = self.company_name.filter(|s| !s.trim().is_empty());
        let shop_name = self.shop_name.filter(|s| !s.trim().is_empty());
        match owned_imported {
            OwnedImported::Owned if company_name.is_none() || shop_name.is_some() => {
                return Err(AppError::BadRequest(
                    "an owned product needs company_name and no shop_name".to_string(),
                ));
            }
            OwnedImported::Imported if shop_name.is_none() || company_name.is_some() => {
                return Err(AppError::BadRequest(
                    "an imported product needs shop_name and no company_name".to_string(),
                ));
            }
            _ => {}
        }

        Ok(NewProduct {
            name: self.name.trim().to_string(),
            category_id: CategoryId::new(self.category_id),
            owned_imported,
            company_name,
            shop_name,
            price: self.price,
            stock_quantity: self.stock_quantity,
            description: self.description,
        })
    }
}

impl UpdateProductInput {
    fn into_patch(self) -> Result<ProductPatch, AppError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::BadRequest("name must not be empty".to_string()));
            }
        }
        if self.price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(AppError::BadRequest(
                "price must not be negative".to_string(),
            ));
        }
        if self.stock_quantity.is_some_and(|q| q < 0) {
            return Err(AppError::BadRequest(
                "stock_quantity must not be negative".to_string(),
            ));
        }

        Ok(ProductPatch {
            name: self.name.map(|n| n.trim().to_string()),
            category_id: self.category_id.map(CategoryId::new),
            price: self.price,
            stock_quantity: self.stock_quantity,
            description: self.description,
        })
    }
}

/// Product listing handler.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(ProductsResponse { products }))
}

/// Product detail handler.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, AppError> {
    ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Product creation handler.
#[instrument(skip(_admin, state, input))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let new_product = input.into_new_product()?;
    let product = ProductRepository::new(state.pool())
        .insert(&new_product)
        .await?;
    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Product update handler.
#[instrument(skip(_admin, state, input))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<Product>, AppError> {
    let patch = input.into_patch()?;
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &patch)
        .await?;
    tracing::info!(product_id = %product.id, "Product updated");
    Ok(Json(product))
}

/// Product deletion handler.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let removed = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;
    if removed {
        tracing::info!(product_id = %id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("product {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CreateProductInput {
        CreateProductInput {
            name: "Steel Bottle".to_string(),
            category_id: 1,
            owned_imported: "owned".to_string(),
            company_name: Some("Acme".to_string()),
            shop_name: None,
            price: Decimal::new(1999, 2),
            stock_quantity: 25,
            description: String::new(),
        }
    }

    #[test]
    fn test_valid_owned_product_accepted() {
        let product = input().into_new_product().expect("valid input");
        assert_eq!(product.owned_imported, OwnedImported::Owned);
        assert_eq!(product.company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_owned_product_without_company_rejected() {
        let mut bad = input();
        bad.company_name = None;
        assert!(matches!(
            bad.into_new_product(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_imported_product_with_company_rejected() {
        let mut bad = input();
        bad.owned_imported = "imported".to_string();
        bad.shop_name = Some("Bazaar".to_string());
        // company_name still set from the fixture
        assert!(matches!(
            bad.into_new_product(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut bad = input();
        bad.price = Decimal::new(-100, 2);
        assert!(matches!(
            bad.into_new_product(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_negative_stock_patch_rejected() {
        let patch = UpdateProductInput {
            name: None,
            category_id: None,
            price: None,
            stock_quantity: Some(-1),
            description: None,
        };
        assert!(matches!(patch.into_patch(), Err(AppError::BadRequest(_))));
    }
}
