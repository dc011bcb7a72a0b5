//! Order Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{Timestamp, civil::Date};
use thiserror::Error;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Lifecycle state of an order.
///
/// Only `Confirmed` and `PickedUp` orders hold stock against availability;
/// quotes, returns, and cancellations never block a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Quote,
    Confirmed,
    PickedUp,
    Returned,
    Cancelled,
}

impl OrderStatus {
    /// Statuses that count as active reservations.
    pub const ACTIVE: [Self; 2] = [Self::Confirmed, Self::PickedUp];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Confirmed => "confirmed",
            Self::PickedUp => "pickedup",
            Self::Returned => "returned",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether orders in this status consume stock.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Confirmed | Self::PickedUp)
    }
}

#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "quote" => Ok(Self::Quote),
            "confirmed" => Ok(Self::Confirmed),
            "pickedup" => Ok(Self::PickedUp),
            "returned" => Ok(Self::Returned),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Order Record
///
/// The order-level `start_date`/`end_date` are the fallback rental window
/// for items that do not carry their own dates.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_uuid: UserUuid,
    pub status: OrderStatus,
    pub start_date: Date,
    pub end_date: Date,
    pub total_amount: u64,
    pub shipping_address: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price_at_booking: u64,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}
