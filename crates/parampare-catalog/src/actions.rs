//! Cart and wishlist actions issued from product cards.
//!
//! The cart and wishlist themselves live outside this crate; callers hand in
//! whatever implements [`CartService`] / [`WishlistService`]. This module only
//! validates the request and shapes the payload.

use parampare_core::{NormalizedProduct, VariantRecord};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ActionError;

/// Label used when neither the chosen nor the first variant has a weight.
pub const DEFAULT_VARIANT_LABEL: &str = "Default";

/// Receives lines added from the storefront.
pub trait CartService {
    fn add(&mut self, line: CartLine);
}

/// Wishlist keyed by product id.
pub trait WishlistService {
    fn contains(&self, product_id: i64) -> bool;
    fn add(&mut self, entry: WishlistEntry);
    fn remove(&mut self, product_id: i64);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub name: String,
    pub image: String,
    pub price: Decimal,
    pub original_price: Decimal,
    /// Pack size shown in the cart, e.g. `"500ml"`.
    pub variant: String,
    pub category: String,
    pub brand: String,
    pub weight_value: Option<Decimal>,
    pub weight_unit: Option<String>,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub stock_quantity: Option<i64>,
    pub in_stock: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    Added,
    Removed,
}

/// Builds the cart line for `quantity` units of `product`.
///
/// Without an explicit `variant` the product's first variant supplies the
/// variant id, weight, and label. Only an explicitly chosen variant overrides
/// the product's prices, and only with non-zero values.
///
/// # Errors
///
/// [`ActionError::MissingProductId`] if the product has no id,
/// [`ActionError::ZeroQuantity`] if `quantity` is 0.
pub fn cart_line(
    product: &NormalizedProduct,
    variant: Option<&VariantRecord>,
    quantity: u32,
) -> Result<CartLine, ActionError> {
    let product_id = product.id.ok_or(ActionError::MissingProductId {
        action: "add to cart",
    })?;
    if quantity == 0 {
        return Err(ActionError::ZeroQuantity);
    }

    let chosen = variant.or_else(|| product.first_variant());
    let label = chosen
        .and_then(VariantRecord::weight_label)
        .unwrap_or_else(|| DEFAULT_VARIANT_LABEL.to_string());
    let price = variant
        .and_then(|v| v.price)
        .filter(|p| !p.is_zero())
        .unwrap_or(product.price);
    let original_price = variant
        .and_then(|v| v.original_price)
        .filter(|p| !p.is_zero())
        .unwrap_or(product.original_price);

    Ok(CartLine {
        product_id,
        variant_id: chosen.and_then(|v| v.id),
        name: product.name.clone(),
        image: product.image.clone(),
        price,
        original_price,
        variant: label,
        category: product.category.clone(),
        brand: product.brand.clone(),
        weight_value: chosen.and_then(|v| v.weight_value).filter(|w| !w.is_zero()),
        weight_unit: chosen.and_then(|v| v.weight_unit.clone()),
        quantity,
    })
}

/// Validates and hands a line to `cart`.
///
/// # Errors
///
/// Same as [`cart_line`]; nothing reaches the cart on error.
pub fn add_to_cart<C>(
    cart: &mut C,
    product: &NormalizedProduct,
    variant: Option<&VariantRecord>,
    quantity: u32,
) -> Result<CartLine, ActionError>
where
    C: CartService + ?Sized,
{
    let line = cart_line(product, variant, quantity)?;
    tracing::info!(
        product_id = line.product_id,
        variant_id = ?line.variant_id,
        quantity,
        "added to cart"
    );
    cart.add(line.clone());
    Ok(line)
}

/// Removes `product` from the wishlist if present, otherwise adds it.
///
/// # Errors
///
/// [`ActionError::MissingProductId`] if the product has no id.
pub fn toggle_wishlist<W>(
    wishlist: &mut W,
    product: &NormalizedProduct,
) -> Result<WishlistToggle, ActionError>
where
    W: WishlistService + ?Sized,
{
    let id = product.id.ok_or(ActionError::MissingProductId {
        action: "update wishlist",
    })?;
    if wishlist.contains(id) {
        wishlist.remove(id);
        return Ok(WishlistToggle::Removed);
    }
    wishlist.add(WishlistEntry {
        id,
        name: product.name.clone(),
        image: product.image.clone(),
        price: product.price,
        original_price: product.original_price,
        stock_quantity: product.stock_quantity,
        in_stock: product.in_stock,
    });
    Ok(WishlistToggle::Added)
}
