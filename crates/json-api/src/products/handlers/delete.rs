//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.vendor_or_admin_or_403()?;

    state
        .app
        .products
        .delete_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use hireline_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER, TEST_VENDOR, service_with_user, state_with_products};

    use super::*;

    fn make_service(
        products: MockProductsService,
        user: hireline_app::auth::AuthenticatedUser,
    ) -> Service {
        service_with_user(
            Router::with_path("products/{product}").delete(handler),
            state_with_products(products),
            user,
        )
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .withf(move |p| *p == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products, TEST_VENDOR))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/products/{}",
            ProductUuid::new()
        ))
        .send(&make_service(products, TEST_VENDOR))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_as_customer_returns_403() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_delete_product().never();

        let res = TestClient::delete(format!(
            "http://example.com/products/{}",
            ProductUuid::new()
        ))
        .send(&make_service(products, TEST_CUSTOMER))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
