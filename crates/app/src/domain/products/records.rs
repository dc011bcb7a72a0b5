//! Product Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Billing granularity for a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalPeriod {
    Hourly,
    Daily,
    Weekly,
}

impl RentalPeriod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown rental period: {0}")]
pub struct ParseRentalPeriodError(String);

impl FromStr for RentalPeriod {
    type Err = ParseRentalPeriodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            other => Err(ParseRentalPeriodError(other.to_string())),
        }
    }
}

impl Display for RentalPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Product Record
///
/// `total_stock` is the maximum number of physical units ownable at once.
/// It is mutated only by vendor edits; placing an order does not decrement
/// it — availability is derived on demand from active orders.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub vendor_uuid: UserUuid,
    pub name: String,
    pub category: String,
    pub base_price: u64,
    pub rental_period: RentalPeriod,
    pub total_stock: u32,
    pub is_rentable: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
