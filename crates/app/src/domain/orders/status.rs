//! Order status chain.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Fulfilment status of an order. Orders only ever move forward through
/// the variants in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderStatus {
    Processing,
    InTransit,
    OutForDelivery,
    Delivered,
}

/// Statuses of orders that have not reached the customer yet.
pub const ACTIVE_STATUSES: [OrderStatus; 3] = [
    OrderStatus::Processing,
    OrderStatus::InTransit,
    OrderStatus::OutForDelivery,
];

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::InTransit => "in_transit",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
        }
    }

    /// Whether an order in this status may be set to `next`. Re-applying the
    /// current status is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        next >= self
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "processing" => Ok(Self::Processing),
            "in_transit" => Ok(Self::InTransit),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}
