//! Create Order Handler

use std::sync::Arc;

use hireline_app::domain::orders::data::{NewOrder, NewOrderItem};
use jiff::civil::Date;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    pub product_uuid: Uuid,

    /// Units requested; must be positive
    pub quantity: u32,

    /// Unit price agreed at booking time, minor currency units
    pub price_at_booking: u64,

    /// Item-level rental start, ISO-8601 date
    pub start_date: Option<String>,

    /// Item-level rental end, ISO-8601 date
    pub end_date: Option<String>,
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub total_amount: u64,
    pub shipping_address: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    /// Created order UUID
    pub uuid: Uuid,
}

fn parse_item(item: OrderItemRequest) -> Result<NewOrderItem, StatusError> {
    let start_date = item
        .start_date
        .map(|value| value.parse::<Date>())
        .transpose()
        .or_400("could not parse item \"start_date\"")?;

    let end_date = item
        .end_date
        .map(|value| value.parse::<Date>())
        .transpose()
        .or_400("could not parse item \"end_date\"")?;

    Ok(NewOrderItem {
        product_uuid: item.product_uuid.into(),
        quantity: item.quantity,
        price_at_booking: item.price_at_booking,
        start_date,
        end_date,
    })
}

/// Create Order Handler
///
/// Places an order for the calling customer. Availability is not
/// re-checked here; callers are expected to have consulted the
/// availability endpoint first.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let request = json.into_inner();

    let items = request
        .items
        .into_iter()
        .map(parse_item)
        .collect::<Result<Vec<_>, _>>()?;

    let order = state
        .app
        .orders
        .place_order(NewOrder {
            customer_uuid: user.uuid,
            items,
            total_amount: request.total_amount,
            shipping_address: request.shipping_address,
            contact_phone: request.contact_phone,
            notes: request.notes,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(OrderPlacedResponse {
        uuid: order.uuid.into(),
    }))
}
