//! Availability Check Handler

use std::sync::Arc;

use hireline_app::domain::{
    availability::records::Availability, orders::reservation::DateRange,
};
use jiff::civil::Date;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{availability::errors::into_status_error, extensions::*, state::State};

/// Availability Check Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailabilityRequest {
    pub product_uuid: Uuid,

    /// Inclusive start of the requested window, ISO-8601 date
    pub start_date: String,

    /// Inclusive end of the requested window, ISO-8601 date
    pub end_date: String,

    /// Units requested; must be positive
    pub quantity: u32,
}

/// Availability Check Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailabilityResponse {
    /// Whether the requested quantity is free over the window
    pub available: bool,

    /// Units already committed by overlapping active orders
    pub reserved: u32,

    /// Total physical stock of the product
    pub total: u32,
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        AvailabilityResponse {
            available: availability.available,
            reserved: availability.reserved,
            total: availability.total,
        }
    }
}

/// Availability Check Handler
///
/// Answers how many units of a product are already reserved over a date
/// window and whether the requested quantity fits. Advisory only: nothing
/// is locked by this call.
#[endpoint(
    tags("availability"),
    summary = "Check Availability",
    responses(
        (status_code = StatusCode::OK, description = "Availability computed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AvailabilityRequest>,
    depot: &mut Depot,
) -> Result<Json<AvailabilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let start = request
        .start_date
        .parse::<Date>()
        .or_400("could not parse \"start_date\"")?;

    let end = request
        .end_date
        .parse::<Date>()
        .or_400("could not parse \"end_date\"")?;

    let availability = state
        .app
        .availability
        .check_availability(
            request.product_uuid.into(),
            DateRange::new(start, end),
            request.quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(availability.into()))
}
