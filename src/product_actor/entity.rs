//! [`ActorEntity`] implementation for [`Product`].
//!
//! The service applies the same presence rule as the client, so a write that slipped past
//! the client (or came from elsewhere) is refused with a [`ProductError`] instead of stored.

use super::error::ProductError;
use crate::model::{Product, ProductFields, ProductId};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn check(fields: &ProductFields) -> Result<(), ProductError> {
    if fields.name.is_empty() {
        return Err(ProductError::EmptyName);
    }
    if !fields.price.is_present() {
        return Err(ProductError::MissingPrice(fields.price.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductFields;
    type Update = ProductFields;
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductFields) -> Result<Self, Self::Error> {
        Ok(Product::with_id(id, params))
    }

    async fn on_create(&mut self) -> Result<(), Self::Error> {
        check(&self.fields())
    }

    /// Replaces name and price wholesale; the id never changes.
    async fn on_update(&mut self, update: ProductFields) -> Result<(), Self::Error> {
        check(&update)?;
        self.name = update.name;
        self.price = update.price;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_on_create_refuses_empty_name() {
        let mut product =
            Product::from_create_params(ProductId::from(1u32), ProductFields::new("", 3.0)).unwrap();
        assert_eq!(product.on_create().await, Err(ProductError::EmptyName));
    }

    #[tokio::test]
    async fn test_on_update_keeps_id() {
        let mut product = Product::new("product_1", "Pen", 2.0);
        product
            .on_update(ProductFields::new("Pencil", 1.5))
            .await
            .unwrap();
        assert_eq!(product, Product::new("product_1", "Pencil", 1.5));
    }

    #[tokio::test]
    async fn test_on_update_refuses_missing_price() {
        let mut product = Product::new("product_1", "Pen", 2.0);
        let result = product.on_update(ProductFields::new("Pen", "")).await;
        assert!(matches!(result, Err(ProductError::MissingPrice(_))));
        assert_eq!(product.price, crate::model::Price::Number(2.0));
    }
}
