//! Update Product Handler

use std::sync::Arc;

use hireline_app::domain::products::{data::ProductUpdate, records::RentalPeriod};
use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: String,
    pub category: String,
    pub base_price: u64,
    /// Billing granularity: hourly, daily, or weekly
    pub rental_period: String,
    pub total_stock: u32,
    pub is_rentable: bool,
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.vendor_or_admin_or_403()?;
    let request = json.into_inner();

    let rental_period = request
        .rental_period
        .parse::<RentalPeriod>()
        .or_400("unknown \"rental_period\" value")?;

    let updated = state
        .app
        .products
        .update_product(
            product.into_inner().into(),
            ProductUpdate {
                name: request.name,
                category: request.category,
                base_price: request.base_price,
                rental_period,
                total_stock: request.total_stock,
                is_rentable: request.is_rentable,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
