//! App Router

use salvo::Router;

use crate::{auth, discount_codes, healthcheck, observability, orders, pricing};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("discount-codes")
                .push(Router::with_path("active").get(discount_codes::active::handler))
                .push(Router::with_path("check").post(discount_codes::check::handler))
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .get(discount_codes::index::handler)
                        .post(discount_codes::create::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .get(discount_codes::get::handler)
                                .put(discount_codes::update::handler)
                                .delete(discount_codes::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(Router::with_path("{payment_code}").get(orders::track::handler))
                .push(
                    Router::with_path("{uuid}/status")
                        .hoop(auth::middleware::handler)
                        .patch(orders::status::handler),
                ),
        )
        .push(
            Router::with_path("pricing")
                .push(Router::with_path("quote").post(pricing::quote::handler))
                .push(Router::with_path("badges").post(pricing::badges::handler)),
        )
}
