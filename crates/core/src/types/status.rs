//! Order status type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// New orders start as `Placed`. No state machine is enforced here: the
/// fulfillment process writes status values directly to the store, so this
/// type preserves whatever string it finds rather than rejecting unknown
/// states at read time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type), sqlx(transparent))]
pub struct OrderStatus(String);

impl OrderStatus {
    /// The initial status assigned at order placement.
    #[must_use]
    pub fn placed() -> Self {
        Self("Placed".to_owned())
    }

    /// Get the status as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this order is still in its initial state.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.0 == "Placed"
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::placed()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_are_placed() {
        let status = OrderStatus::default();
        assert!(status.is_placed());
        assert_eq!(status.as_str(), "Placed");
    }

    #[test]
    fn preserves_external_status_values() {
        let status = OrderStatus::from("Out for delivery".to_owned());
        assert!(!status.is_placed());
        assert_eq!(status.to_string(), "Out for delivery");
    }
}
