//! Business logic services.
//!
//! Routes stay thin; anything touching more than one table or carrying a
//! precondition lives here.

pub mod auth;
pub mod orders;

pub use auth::{AuthError, AuthService};
pub use orders::{OrderError, OrderService};
