//! Update Invoice Status Handler

use std::sync::Arc;

use hireline_app::domain::invoices::records::InvoiceStatus;
use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    invoices::{errors::into_status_error, get::InvoiceResponse},
    state::State,
};

/// Update Invoice Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateInvoiceStatusRequest {
    /// One of: pending, paid
    pub status: String,
}

/// Update Invoice Status Handler
#[endpoint(
    tags("invoices"),
    summary = "Update Invoice Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status"),
        (status_code = StatusCode::NOT_FOUND, description = "Invoice not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    invoice: PathParam<Uuid>,
    json: JsonBody<UpdateInvoiceStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<InvoiceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.vendor_or_admin_or_403()?;

    let status = json
        .into_inner()
        .status
        .parse::<InvoiceStatus>()
        .or_400("unknown \"status\" value")?;

    let updated = state
        .app
        .invoices
        .update_status(invoice.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use hireline_app::domain::{
        invoices::{InvoicesServiceError, MockInvoicesService, records::InvoiceUuid},
        users::records::UserUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER, TEST_VENDOR, service_with_user, state_with_invoices};

    use super::{super::tests::make_invoice, *};

    fn make_service(
        invoices: MockInvoicesService,
        user: hireline_app::auth::AuthenticatedUser,
    ) -> Service {
        service_with_user(
            Router::with_path("invoices/{invoice}/status").patch(handler),
            state_with_invoices(invoices),
            user,
        )
    }

    #[tokio::test]
    async fn test_marking_an_invoice_paid() -> TestResult {
        let uuid = InvoiceUuid::new();

        let mut invoices = MockInvoicesService::new();

        invoices
            .expect_update_status()
            .once()
            .withf(move |i, status| *i == uuid && *status == InvoiceStatus::Paid)
            .return_once(|i, status| {
                let mut invoice = make_invoice(i, UserUuid::new(), UserUuid::new());
                invoice.status = status;
                Ok(invoice)
            });

        let mut res = TestClient::patch(format!("http://example.com/invoices/{uuid}/status"))
            .json(&json!({ "status": "paid" }))
            .send(&make_service(invoices, TEST_VENDOR))
            .await;

        let body: InvoiceResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_value_returns_400() -> TestResult {
        let mut invoices = MockInvoicesService::new();

        invoices.expect_update_status().never();

        let res = TestClient::patch(format!(
            "http://example.com/invoices/{}/status",
            InvoiceUuid::new()
        ))
        .json(&json!({ "status": "voided" }))
        .send(&make_service(invoices, TEST_VENDOR))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_invoice_returns_404() -> TestResult {
        let mut invoices = MockInvoicesService::new();

        invoices
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(InvoicesServiceError::NotFound));

        let res = TestClient::patch(format!(
            "http://example.com/invoices/{}/status",
            InvoiceUuid::new()
        ))
        .json(&json!({ "status": "paid" }))
        .send(&make_service(invoices, TEST_VENDOR))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_update_invoice_status() -> TestResult {
        let mut invoices = MockInvoicesService::new();

        invoices.expect_update_status().never();

        let res = TestClient::patch(format!(
            "http://example.com/invoices/{}/status",
            InvoiceUuid::new()
        ))
        .json(&json!({ "status": "paid" }))
        .send(&make_service(invoices, TEST_CUSTOMER))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
