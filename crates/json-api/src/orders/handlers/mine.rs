//! My Orders Handler

use std::sync::Arc;

use hireline_app::domain::orders::records::{OrderItemRecord, OrderRecord};
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, state::State};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u32,

    /// Unit price agreed at booking time, minor currency units
    pub price_at_booking: u64,

    /// Item-level rental start, ISO-8601 date; absent on legacy items
    pub start_date: Option<String>,

    /// Item-level rental end, ISO-8601 date; absent on legacy items
    pub end_date: Option<String>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            price_at_booking: item.price_at_booking,
            start_date: item.start_date.map(|d| d.to_string()),
            end_date: item.end_date.map(|d| d.to_string()),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,
    pub status: String,

    /// Order-level rental start, the fallback window for legacy items
    pub start_date: String,

    /// Order-level rental end
    pub end_date: String,

    pub total_amount: u64,
    pub shipping_address: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            customer_uuid: order.customer_uuid.into(),
            status: order.status.to_string(),
            start_date: order.start_date.to_string(),
            end_date: order.end_date.to_string(),
            total_amount: order.total_amount,
            shipping_address: order.shipping_address,
            contact_phone: order.contact_phone,
            notes: order.notes,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The list of orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// My Orders Handler
///
/// Returns the calling customer's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders_for_customer(user.uuid)
        .await
        .or_500("failed to fetch orders")?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
