mod admin;
mod middleware;
mod public;

pub use admin::session::SESSION_COOKIE;

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    application::{
        admin::AdminContentService, auth::AdminAuthService, cache::PortfolioCache,
        error::ErrorReport, store::StoreError,
    },
    infra::uploads::UploadStorage,
};

use self::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub cache: PortfolioCache,
    pub admin: AdminContentService,
    pub auth: Arc<AdminAuthService>,
    pub upload_storage: Arc<UploadStorage>,
}

pub fn build_router(state: HttpState, upload_body_limit: usize) -> Router {
    public::build_public_router()
        .merge(admin::build_admin_router(state.clone(), upload_body_limit))
        .with_state(state)
        .layer(axum::middleware::from_fn(log_responses))
        .layer(axum::middleware::from_fn(set_request_context))
}

fn db_health_response(result: Result<(), StoreError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
