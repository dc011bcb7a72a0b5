//! Products Data

use crate::domain::products::records::{ProductUuid, RentalPeriod};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: String,
    pub base_price: u64,
    pub rental_period: RentalPeriod,
    pub total_stock: u32,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub category: String,
    pub base_price: u64,
    pub rental_period: RentalPeriod,
    pub total_stock: u32,
    pub is_rentable: bool,
}
