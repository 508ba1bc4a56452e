//! Cookie-based admin sessions and the guard middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::presentation::admin::FlashView;

use super::super::HttpState;

pub const SESSION_COOKIE: &str = "vetrina_session";
pub const FLASH_COOKIE: &str = "vetrina_flash";

/// Redirects unauthenticated requests to the login page. Applied to every
/// admin route except login itself.
pub async fn require_admin(
    State(state): State<HttpState>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    match jar.get(SESSION_COOKIE) {
        Some(cookie) if state.auth.authenticate(cookie.value()).is_ok() => {
            next.run(request).await
        }
        _ => Redirect::to("/admin/login").into_response(),
    }
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .removal()
        .build()
}

/// Flash messages ride a short-lived cookie across the redirect back to the
/// dashboard, encoded as `kind:message`.
pub fn flash_cookie(flash: &FlashView) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, format!("{}:{}", flash.kind, flash.message)))
        .path("/admin")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<FlashView>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = match cookie.value().split_once(':') {
        Some(("success", message)) => Some(FlashView::success(message.to_string())),
        Some((_, message)) => Some(FlashView::error(message.to_string())),
        None => None,
    };
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/admin").build());
    (jar, flash)
}
