mod forms;
mod handlers;
pub mod session;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use super::HttpState;

pub fn build_admin_router(state: HttpState, upload_body_limit: usize) -> Router<HttpState> {
    let protected = Router::new()
        .route("/admin/dashboard", get(handlers::dashboard))
        .route("/admin/logout", post(handlers::logout))
        .route("/admin/hero", post(handlers::save_hero))
        .route("/admin/about", post(handlers::save_about))
        .route("/admin/skills", post(handlers::create_skill))
        .route("/admin/skills/{id}", post(handlers::update_skill))
        .route("/admin/experiences", post(handlers::create_experience))
        .route("/admin/experiences/{id}", post(handlers::update_experience))
        .route("/admin/projects", post(handlers::create_project))
        .route("/admin/projects/{id}", post(handlers::update_project))
        .route("/admin/certificates", post(handlers::create_certificate))
        .route(
            "/admin/certificates/{id}",
            post(handlers::update_certificate),
        )
        .route("/admin/achievements", post(handlers::create_achievement))
        .route(
            "/admin/achievements/{id}",
            post(handlers::update_achievement),
        )
        .route("/admin/{collection}/{id}/delete", post(handlers::delete_entry))
        .route("/admin/refresh/{collection}", post(handlers::refresh))
        .route(
            "/admin/uploads",
            post(handlers::store_upload).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .layer(middleware::from_fn_with_state(
            state,
            session::require_admin,
        ));

    Router::new()
        .route(
            "/admin/login",
            get(handlers::login_page).post(handlers::login),
        )
        .merge(protected)
}
