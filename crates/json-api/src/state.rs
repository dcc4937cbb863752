//! State

use std::sync::Arc;

use pricebook_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) admin_token: Option<String>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin_token: Option<String>) -> Self {
        Self { app, admin_token }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, admin_token: Option<String>) -> Arc<Self> {
        Arc::new(Self::new(app, admin_token))
    }
}
