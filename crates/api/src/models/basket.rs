//! Basket aggregate and its pure item mutations.
//!
//! `add_item`/`remove_item` operate in memory; persistence replaces the whole
//! item set afterwards (see `db::baskets::BasketRepository::save_items`).
//! Quantities stay strictly positive: an entry whose quantity would reach
//! zero is pruned instead.

use serde::Serialize;
use sqlx::FromRow;

use driftwood_core::{BasketId, BuyerToken, Price, ProductId};

use super::product::Product;

/// A shopping basket keyed by buyer token.
#[derive(Debug, Clone)]
pub struct Basket {
    pub id: BasketId,
    pub buyer_token: BuyerToken,
    pub items: Vec<BasketItem>,
}

/// One basket line: product reference, quantity, and a denormalized product
/// snapshot for pricing and display.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub picture_url: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub quantity: i32,
}

impl BasketItem {
    fn snapshot(product: &Product, quantity: i32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            picture_url: product.picture_url.clone(),
            brand: product.brand.clone(),
            product_type: product.product_type.clone(),
            quantity,
        }
    }
}

impl Basket {
    /// Add `quantity` of a product, appending a snapshot entry for products
    /// not yet in the basket.
    pub fn add_item(&mut self, product: &Product, quantity: i32) {
        if quantity <= 0 {
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            item.quantity += quantity;
        } else {
            self.items.push(BasketItem::snapshot(product, quantity));
        }
    }

    /// Remove `quantity` of a product. The entry is pruned once its quantity
    /// reaches zero or below.
    ///
    /// Returns `false` when the product has no entry in the basket or the
    /// quantity is not positive; removal only ever decrements.
    pub fn remove_item(&mut self, product_id: ProductId, quantity: i32) -> bool {
        if quantity <= 0 {
            return false;
        }
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.product_id == product_id)
        else {
            return false;
        };

        // Positions from iter().position() are always in bounds.
        #[allow(clippy::indexing_slicing)]
        let item = &mut self.items[index];
        item.quantity -= quantity;
        if item.quantity <= 0 {
            self.items.remove(index);
        }
        true
    }

    /// Map to the display-safe wire shape.
    #[must_use]
    pub fn to_dto(&self) -> BasketDto {
        BasketDto {
            buyer_id: self.buyer_token.clone(),
            items: self.items.clone(),
        }
    }
}

/// Display-safe basket representation: no internal row ids.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketDto {
    pub buyer_id: BuyerToken,
    pub items: Vec<BasketItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftwood_core::Price;

    fn product(id: i32, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price: Price::from_cents(10_000),
            picture_url: format!("/images/{name}.png"),
            brand: "Driftwood".to_owned(),
            product_type: "Boards".to_owned(),
            quantity_in_stock: 100,
        }
    }

    fn basket() -> Basket {
        Basket {
            id: BasketId::new(1),
            buyer_token: BuyerToken::anonymous(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_add_new_item_appends_snapshot() {
        let mut basket = basket();
        let board = product(5, "longboard");
        basket.add_item(&board, 2);

        assert_eq!(basket.items.len(), 1);
        let item = basket.items.first().expect("one item");
        assert_eq!(item.product_id, ProductId::new(5));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.name, "longboard");
    }

    #[test]
    fn test_add_existing_item_increments_quantity() {
        let mut basket = basket();
        let board = product(5, "longboard");
        basket.add_item(&board, 2);
        basket.add_item(&board, 3);

        assert_eq!(basket.items.len(), 1);
        assert_eq!(basket.items.first().expect("item").quantity, 5);
    }

    #[test]
    fn test_remove_full_quantity_prunes_entry() {
        // Basket holds {productId: 5, quantity: 2}; removing 2 drops the line.
        let mut basket = basket();
        basket.add_item(&product(5, "longboard"), 2);

        assert!(basket.remove_item(ProductId::new(5), 2));
        assert!(
            !basket
                .items
                .iter()
                .any(|item| item.product_id == ProductId::new(5))
        );
    }

    #[test]
    fn test_remove_partial_quantity() {
        let mut basket = basket();
        basket.add_item(&product(5, "longboard"), 3);

        assert!(basket.remove_item(ProductId::new(5), 1));
        assert_eq!(basket.items.first().expect("item").quantity, 2);
    }

    #[test]
    fn test_remove_unknown_product_signals_not_found() {
        let mut basket = basket();
        assert!(!basket.remove_item(ProductId::new(9), 1));
    }

    #[test]
    fn test_add_then_remove_equal_quantities_is_identity() {
        let mut basket = basket();
        basket.add_item(&product(1, "deck"), 1);
        let before: Vec<_> = basket
            .items
            .iter()
            .map(|i| (i.product_id, i.quantity))
            .collect();

        basket.add_item(&product(2, "wheels"), 4);
        basket.remove_item(ProductId::new(2), 4);

        let after: Vec<_> = basket
            .items
            .iter()
            .map(|i| (i.product_id, i.quantity))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_add_non_positive_quantity_is_noop() {
        let mut basket = basket();
        basket.add_item(&product(1, "deck"), 0);
        basket.add_item(&product(1, "deck"), -2);
        assert!(basket.items.is_empty());
    }

    #[test]
    fn test_remove_non_positive_quantity_is_rejected() {
        // A negative removal must not increment the line.
        let mut basket = basket();
        basket.add_item(&product(5, "longboard"), 2);

        assert!(!basket.remove_item(ProductId::new(5), -3));
        assert!(!basket.remove_item(ProductId::new(5), 0));
        assert_eq!(basket.items.first().expect("item").quantity, 2);
    }

    #[test]
    fn test_dto_hides_row_id() {
        let mut basket = basket();
        basket.add_item(&product(1, "deck"), 1);
        let dto = basket.to_dto();

        let json = serde_json::to_value(&dto).expect("serialize");
        assert!(json.get("id").is_none());
        assert_eq!(json["items"][0]["productId"], 1);
        assert_eq!(json["items"][0]["type"], "Boards");
    }
}
