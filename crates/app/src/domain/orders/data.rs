//! Orders Data

use jiff::civil::Date;

use crate::domain::{products::records::ProductUuid, users::records::UserUuid};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_uuid: UserUuid,
    pub items: Vec<NewOrderItem>,
    pub total_amount: u64,
    pub shipping_address: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
}

/// New Order Item Data
///
/// Item dates are optional; items without them inherit the order-level
/// window derived at placement time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price_at_booking: u64,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}
