//! Get Product Handler

use std::sync::Arc;

use hireline_app::domain::products::records::ProductRecord;
use salvo::{oapi::{ToSchema, extract::PathParam}, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The vendor owning the product
    pub vendor_uuid: Uuid,

    /// Display name
    pub name: String,

    /// Browsing category
    pub category: String,

    /// Price per rental period in minor currency units
    pub base_price: u64,

    /// Billing granularity: hourly, daily, or weekly
    pub rental_period: String,

    /// Maximum number of physical units ownable at once
    pub total_stock: u32,

    /// Whether the product is currently offered for rent
    pub is_rentable: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            vendor_uuid: product.vendor_uuid.into(),
            name: product.name,
            category: product.category,
            base_price: product.base_price,
            rental_period: product.rental_period.to_string(),
            total_stock: product.total_stock,
            is_rentable: product.is_rentable,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
