//! Invoice Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{Timestamp, civil::Date};
use thiserror::Error;

use crate::{
    domain::{orders::records::OrderUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Invoice UUID
pub type InvoiceUuid = TypedUuid<InvoiceRecord>;

/// Invoice Line UUID
pub type InvoiceLineUuid = TypedUuid<InvoiceLineRecord>;

/// Settlement state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown invoice status: {0}")]
pub struct ParseInvoiceStatusError(String);

impl FromStr for InvoiceStatus {
    type Err = ParseInvoiceStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(ParseInvoiceStatusError(other.to_string())),
        }
    }
}

impl Display for InvoiceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Invoice Record
///
/// One invoice per (order, vendor) pair, aggregating that vendor's items.
#[derive(Debug, Clone)]
pub struct InvoiceRecord {
    pub uuid: InvoiceUuid,
    pub invoice_number: String,
    pub order_uuid: OrderUuid,
    pub vendor_uuid: UserUuid,
    pub customer_uuid: UserUuid,
    pub amount: u64,
    pub status: InvoiceStatus,
    pub issued_at: Timestamp,
    pub due_date: Date,
    pub lines: Vec<InvoiceLineRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Invoice Line Record
#[derive(Debug, Clone)]
pub struct InvoiceLineRecord {
    pub uuid: InvoiceLineUuid,
    pub invoice_uuid: InvoiceUuid,
    pub description: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total: u64,
}
