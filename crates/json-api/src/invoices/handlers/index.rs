//! Invoice Index Handler

use std::sync::Arc;

use hireline_app::domain::users::records::Role;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, invoices::get::InvoiceResponse, state::State};

/// Invoices Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvoicesResponse {
    /// The list of invoices, newest first
    pub invoices: Vec<InvoiceResponse>,
}

/// Invoice Index Handler
///
/// Vendors see invoices addressed to them; everyone else sees invoices
/// billed to them.
#[endpoint(
    tags("invoices"),
    summary = "List Invoices",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<InvoicesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let invoices = if user.role == Role::Vendor {
        state.app.invoices.list_invoices_for_vendor(user.uuid).await
    } else {
        state
            .app
            .invoices
            .list_invoices_for_customer(user.uuid)
            .await
    }
    .or_500("failed to fetch invoices")?;

    Ok(Json(InvoicesResponse {
        invoices: invoices.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use hireline_app::domain::{
        invoices::{MockInvoicesService, records::InvoiceUuid},
        users::records::UserUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER, TEST_VENDOR, service_with_user, state_with_invoices};

    use super::{super::tests::make_invoice, *};

    #[tokio::test]
    async fn test_index_as_vendor_lists_received_invoices() -> TestResult {
        let mut invoices = MockInvoicesService::new();

        invoices
            .expect_list_invoices_for_vendor()
            .once()
            .withf(|vendor| *vendor == TEST_VENDOR.uuid)
            .return_once(|vendor| {
                Ok(vec![make_invoice(InvoiceUuid::new(), vendor, UserUuid::new())])
            });

        invoices.expect_list_invoices_for_customer().never();

        let mut res = TestClient::get("http://example.com/invoices")
            .send(&service_with_user(
                Router::with_path("invoices").get(handler),
                state_with_invoices(invoices),
                TEST_VENDOR,
            ))
            .await;

        let body: InvoicesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.invoices.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_as_customer_lists_billed_invoices() -> TestResult {
        let mut invoices = MockInvoicesService::new();

        invoices
            .expect_list_invoices_for_customer()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER.uuid)
            .return_once(|customer| {
                Ok(vec![make_invoice(InvoiceUuid::new(), UserUuid::new(), customer)])
            });

        invoices.expect_list_invoices_for_vendor().never();

        let mut res = TestClient::get("http://example.com/invoices")
            .send(&service_with_user(
                Router::with_path("invoices").get(handler),
                state_with_invoices(invoices),
                TEST_CUSTOMER,
            ))
            .await;

        let body: InvoicesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.invoices.len(), 1);

        Ok(())
    }
}
