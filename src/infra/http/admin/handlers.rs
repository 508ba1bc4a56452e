use axum::{
    extract::{Form, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{
    application::admin::AdminContentError,
    domain::collections::Collection,
    presentation::{
        admin::{AdminDashboardTemplate, AdminLoginTemplate, FlashView},
        views::render_template_response,
    },
};

use super::super::HttpState;
use super::forms::{
    AboutForm, AchievementForm, CertificateForm, ExperienceForm, HeroForm, LoginForm, ProjectForm,
    SkillForm,
};
use super::session::{
    SESSION_COOKIE, clear_session_cookie, flash_cookie, session_cookie, take_flash,
};

pub async fn login_page(State(state): State<HttpState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE)
        && state.auth.authenticate(cookie.value()).is_ok()
    {
        return Redirect::to("/admin/dashboard").into_response();
    }
    render_template_response(AdminLoginTemplate { error: None }, StatusCode::OK)
}

pub async fn login(
    State(state): State<HttpState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth.login(&form.email, &form.password) {
        Ok(token) => (
            jar.add(session_cookie(token)),
            Redirect::to("/admin/dashboard"),
        )
            .into_response(),
        Err(_) => render_template_response(
            AdminLoginTemplate {
                error: Some("Invalid email or password.".to_string()),
            },
            StatusCode::UNAUTHORIZED,
        ),
    }
}

pub async fn logout(State(state): State<HttpState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.auth.logout(cookie.value());
    }
    (
        jar.add(clear_session_cookie()),
        Redirect::to("/admin/login"),
    )
        .into_response()
}

pub async fn dashboard(State(state): State<HttpState>, jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(jar);
    let template = AdminDashboardTemplate::from_cache(&state.cache, flash).await;
    (jar, render_template_response(template, StatusCode::OK)).into_response()
}

fn saved(jar: CookieJar, result: Result<(), AdminContentError>, section: &str) -> Response {
    let flash = match result {
        Ok(()) => FlashView::success(format!("{section} saved.")),
        Err(err) => FlashView::error(err.to_string()),
    };
    (
        jar.add(flash_cookie(&flash)),
        Redirect::to("/admin/dashboard"),
    )
        .into_response()
}

pub async fn save_hero(
    State(state): State<HttpState>,
    jar: CookieJar,
    Form(form): Form<HeroForm>,
) -> Response {
    saved(jar, state.admin.save_hero(form.into()).await, "Hero section")
}

pub async fn save_about(
    State(state): State<HttpState>,
    jar: CookieJar,
    Form(form): Form<AboutForm>,
) -> Response {
    saved(
        jar,
        state.admin.save_about(form.into()).await,
        "About section",
    )
}

pub async fn create_skill(
    State(state): State<HttpState>,
    jar: CookieJar,
    Form(form): Form<SkillForm>,
) -> Response {
    saved(
        jar,
        state.admin.add_skill(form.into()).await.map(|_| ()),
        "Skill",
    )
}

pub async fn update_skill(
    State(state): State<HttpState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Form(form): Form<SkillForm>,
) -> Response {
    saved(
        jar,
        state.admin.update_skill(id, form.into()).await.map(|_| ()),
        "Skill",
    )
}

pub async fn create_experience(
    State(state): State<HttpState>,
    jar: CookieJar,
    Form(form): Form<ExperienceForm>,
) -> Response {
    saved(
        jar,
        state.admin.add_experience(form.into()).await.map(|_| ()),
        "Experience",
    )
}

pub async fn update_experience(
    State(state): State<HttpState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Form(form): Form<ExperienceForm>,
) -> Response {
    saved(
        jar,
        state
            .admin
            .update_experience(id, form.into())
            .await
            .map(|_| ()),
        "Experience",
    )
}

pub async fn create_project(
    State(state): State<HttpState>,
    jar: CookieJar,
    Form(form): Form<ProjectForm>,
) -> Response {
    saved(
        jar,
        state.admin.add_project(form.into()).await.map(|_| ()),
        "Project",
    )
}

pub async fn update_project(
    State(state): State<HttpState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Form(form): Form<ProjectForm>,
) -> Response {
    saved(
        jar,
        state.admin.update_project(id, form.into()).await.map(|_| ()),
        "Project",
    )
}

pub async fn create_certificate(
    State(state): State<HttpState>,
    jar: CookieJar,
    Form(form): Form<CertificateForm>,
) -> Response {
    saved(
        jar,
        state.admin.add_certificate(form.into()).await.map(|_| ()),
        "Certificate",
    )
}

pub async fn update_certificate(
    State(state): State<HttpState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Form(form): Form<CertificateForm>,
) -> Response {
    saved(
        jar,
        state
            .admin
            .update_certificate(id, form.into())
            .await
            .map(|_| ()),
        "Certificate",
    )
}

pub async fn create_achievement(
    State(state): State<HttpState>,
    jar: CookieJar,
    Form(form): Form<AchievementForm>,
) -> Response {
    saved(
        jar,
        state.admin.add_achievement(form.into()).await.map(|_| ()),
        "Achievement",
    )
}

pub async fn update_achievement(
    State(state): State<HttpState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Form(form): Form<AchievementForm>,
) -> Response {
    saved(
        jar,
        state
            .admin
            .update_achievement(id, form.into())
            .await
            .map(|_| ()),
        "Achievement",
    )
}

pub async fn delete_entry(
    State(state): State<HttpState>,
    jar: CookieJar,
    Path((collection, id)): Path<(String, Uuid)>,
) -> Response {
    let Some(collection) = Collection::parse(&collection) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    saved(jar, state.admin.delete(collection, id).await, "Entry")
}

pub async fn refresh(
    State(state): State<HttpState>,
    jar: CookieJar,
    Path(collection): Path<String>,
) -> Response {
    let Some(collection) = Collection::parse(&collection) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    state.admin.refresh(collection).await;
    let flash = FlashView::success(format!("Reloaded {collection} from the store."));
    (
        jar.add(flash_cookie(&flash)),
        Redirect::to("/admin/dashboard"),
    )
        .into_response()
}

pub async fn store_upload(
    State(state): State<HttpState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Response {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                let flash = FlashView::error("No file was attached.".to_string());
                return (
                    jar.add(flash_cookie(&flash)),
                    Redirect::to("/admin/dashboard"),
                )
                    .into_response();
            }
            Err(err) => {
                let flash = FlashView::error(format!("Upload failed: {err}"));
                return (
                    jar.add(flash_cookie(&flash)),
                    Redirect::to("/admin/dashboard"),
                )
                    .into_response();
            }
        }
    };

    let original_name = field
        .file_name()
        .map(str::to_string)
        .unwrap_or_else(|| "upload".to_string());

    let flash = match field.bytes().await {
        Ok(data) => match state.upload_storage.store(&original_name, data).await {
            Ok(stored) => {
                metrics::counter!("vetrina_uploads_total").increment(1);
                FlashView::success(format!("Uploaded. Available at {}", stored.public_url()))
            }
            Err(err) => FlashView::error(format!("Upload failed: {err}")),
        },
        Err(err) => FlashView::error(format!("Upload failed: {err}")),
    };

    (
        jar.add(flash_cookie(&flash)),
        Redirect::to("/admin/dashboard"),
    )
        .into_response()
}
