//! Cart domain types.

use serde::Serialize;

use bazaar_core::{CartId, ProductId, UserId};

use super::catalog::Product;

/// A cart line item with its product resolved against the current catalog.
///
/// `product` is `None` when the referenced product no longer exists (or
/// never did; cart additions do not validate product references).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCartItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub product: Option<Product>,
}

/// A user's cart with all line items resolved.
///
/// An absent cart and an empty cart look the same to callers: both have no
/// items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    pub user_id: UserId,
    pub items: Vec<ResolvedCartItem>,
}

impl ResolvedCart {
    /// The cart a user has before ever adding anything.
    #[must_use]
    pub const fn empty(user_id: UserId) -> Self {
        Self {
            id: None,
            user_id,
            items: Vec::new(),
        }
    }
}
