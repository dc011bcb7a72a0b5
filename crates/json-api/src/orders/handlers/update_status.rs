//! Update Order Status Handler

use std::sync::Arc;

use hireline_app::domain::orders::records::OrderStatus;
use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, mine::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// One of: quote, confirmed, pickedup, returned, cancelled
    pub status: String,
}

/// Update Order Status Handler
///
/// Moves an order to a new lifecycle status. Confirming an order also
/// generates invoices for the vendors involved; invoice failures are
/// logged without failing the status update.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.vendor_or_admin_or_403()?;

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("unknown \"status\" value")?;

    let updated = state
        .app
        .orders
        .update_status(order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    if status == OrderStatus::Confirmed {
        // Best effort: the confirmation stands even when invoicing fails.
        if let Err(source) = state.app.invoices.generate_for_order(updated.uuid).await {
            error!(
                "failed to generate invoices for order {order}: {source}",
                order = updated.uuid,
            );
        }
    }

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use hireline_app::domain::{
        invoices::MockInvoicesService,
        orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
        users::records::UserUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_CUSTOMER, TEST_VENDOR, service_with_user, state_with_orders_and_invoices,
    };

    use super::{super::tests::make_order, *};

    fn make_service(orders: MockOrdersService, invoices: MockInvoicesService) -> Service {
        service_with_user(
            Router::with_path("orders/{order}/status").patch(handler),
            state_with_orders_and_invoices(orders, invoices),
            TEST_VENDOR,
        )
    }

    #[tokio::test]
    async fn test_confirming_updates_and_generates_invoices() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |o, status| *o == uuid && *status == OrderStatus::Confirmed)
            .return_once(|o, status| {
                let mut order = make_order(o, UserUuid::new());
                order.status = status;
                Ok(order)
            });

        let mut invoices = MockInvoicesService::new();

        invoices
            .expect_generate_for_order()
            .once()
            .withf(move |o| *o == uuid)
            .return_once(|_| Ok(vec![]));

        let mut res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "confirmed" }))
            .send(&make_service(orders, invoices))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "confirmed");

        Ok(())
    }

    #[tokio::test]
    async fn test_other_transitions_do_not_invoice() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |o, status| *o == uuid && *status == OrderStatus::PickedUp)
            .return_once(|o, status| {
                let mut order = make_order(o, UserUuid::new());
                order.status = status;
                Ok(order)
            });

        let mut invoices = MockInvoicesService::new();

        invoices.expect_generate_for_order().never();

        let res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "pickedup" }))
            .send(&make_service(orders, invoices))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let mut invoices = MockInvoicesService::new();

        invoices.expect_generate_for_order().never();

        let res = TestClient::patch(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "misplaced" }))
        .send(&make_service(orders, invoices))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let mut invoices = MockInvoicesService::new();

        invoices.expect_generate_for_order().never();

        let res = TestClient::patch(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "confirmed" }))
        .send(&make_service(orders, invoices))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_update_status() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let mut invoices = MockInvoicesService::new();

        invoices.expect_generate_for_order().never();

        let res = TestClient::patch(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "confirmed" }))
        .send(&service_with_user(
            Router::with_path("orders/{order}/status").patch(handler),
            state_with_orders_and_invoices(orders, invoices),
            TEST_CUSTOMER,
        ))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_invoice_failure_does_not_fail_the_confirmation() -> TestResult {
        use hireline_app::domain::invoices::InvoicesServiceError;

        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .return_once(|o, status| {
                let mut order = make_order(o, UserUuid::new());
                order.status = status;
                Ok(order)
            });

        let mut invoices = MockInvoicesService::new();

        invoices
            .expect_generate_for_order()
            .once()
            .return_once(|_| Err(InvoicesServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "confirmed" }))
            .send(&make_service(orders, invoices))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
