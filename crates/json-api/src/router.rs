//! App Router

use salvo::Router;

use crate::{auth, availability, invoices, orders, products, vendor};

/// Routes reachable without a session token: login, the public catalog,
/// and the availability check.
pub(crate) fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("auth/login").post(auth::login::handler))
        .push(Router::with_path("availability").post(availability::check::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}

/// Routes behind the bearer-token middleware.
pub(crate) fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("auth/me").get(auth::me::handler))
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(Router::with_path("mine").get(orders::mine::handler))
                .push(
                    Router::with_path("{order}/status").patch(orders::update_status::handler),
                ),
        )
        .push(
            Router::with_path("vendor")
                .push(Router::with_path("orders").get(vendor::orders::handler))
                .push(Router::with_path("stats").get(vendor::stats::handler)),
        )
        .push(
            Router::with_path("invoices")
                .get(invoices::index::handler)
                .push(
                    Router::with_path("{invoice}")
                        .get(invoices::get::handler)
                        .push(
                            Router::with_path("status")
                                .patch(invoices::update_status::handler),
                        ),
                ),
        )
}
