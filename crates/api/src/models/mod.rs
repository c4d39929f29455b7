//! Domain types for the API.
//!
//! These types represent validated domain objects separate from database
//! row types. They serialize with camelCase field names, matching the wire
//! format clients already speak.

pub mod cart;
pub mod catalog;
pub mod feedback;
pub mod order;
pub mod user;

pub use cart::{ResolvedCart, ResolvedCartItem};
pub use catalog::{Category, CategoryRef, Product, ProductWithCategory};
pub use feedback::FeedbackSurvey;
pub use order::{Order, PlacedOrder, ResolvedOrder, ResolvedOrderItem};
pub use user::{User, UserProfile};
