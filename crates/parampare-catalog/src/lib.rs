pub mod actions;
pub mod client;
pub mod error;
pub mod fields;
pub mod filter;
pub mod image;
pub mod loader;
pub mod normalize;
pub mod reconcile;
pub mod sort;
pub mod suggest;
pub mod types;
pub mod view;

mod rate_limit;

pub use actions::{
    add_to_cart, cart_line, toggle_wishlist, CartLine, CartService, WishlistEntry,
    WishlistService, WishlistToggle,
};
pub use client::{CatalogClient, CatalogProvider};
pub use error::{ActionError, CatalogError};
pub use filter::{apply_dimension, filter_products};
pub use image::{ImageUrlResolver, PLACEHOLDER_IMAGE};
pub use loader::load_catalog;
pub use normalize::{normalize_product, normalize_products};
pub use reconcile::category_matches;
pub use sort::sort_products;
pub use suggest::{GenerationGate, SuggestOutcome, Suggester, Suggestion, Ticket};
pub use types::RawProductRecord;
pub use view::{project, CatalogView};
