use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;

pub mod auth;
mod banners;
mod blogs;
mod contacts;
mod error;
mod hero_slides;
mod job_positions;
mod newsletter;
mod recruitments;
mod testimonials;
mod types;
mod uploads;
mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub config: Config,
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(Arc::new(AppState { store, config }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let uploads_path = state.config.uploads.path.clone();
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/blogs", get(blogs::list_blogs))
        .route("/blogs/{id}", get(blogs::get_blog))
        .route("/blogs/slug/{slug}", get(blogs::get_blog_by_slug))
        .route("/contact", post(contacts::submit_contact))
        .route("/job-positions", get(job_positions::list_positions))
        .route("/job-positions/{id}", get(job_positions::get_position))
        .route("/recruitments", post(recruitments::submit_application))
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route("/newsletter/unsubscribe", post(newsletter::unsubscribe))
        .route("/newsletter/status", get(newsletter::subscription_status))
        .route("/hero-slides/active", get(hero_slides::list_active_slides))
        .route(
            "/testimonials/active",
            get(testimonials::list_active_testimonials),
        )
        .route("/banners/active", get(banners::list_active_banners))
        // The default 2MB body cap is below the documented upload maximums
        // (10MB images, 5MB CVs); uploads are buffered fully in memory, so
        // this is also the effective input bound.
        .layer(axum::extract::DefaultBodyLimit::max(12 * 1024 * 1024))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(uploads_path),
        )
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/blogs", post(blogs::create_blog))
        .route("/blogs/{id}", put(blogs::update_blog))
        .route("/blogs/{id}", delete(blogs::delete_blog))
        .route("/contacts", get(contacts::list_contacts))
        .route("/contacts/{id}", get(contacts::get_contact))
        .route("/contacts/{id}/status", put(contacts::update_status))
        .route("/contacts/{id}", delete(contacts::delete_contact))
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users/password", put(users::change_password))
        .route("/users/{id}", delete(users::delete_user))
        .route("/job-positions", post(job_positions::create_position))
        .route("/job-positions/{id}", put(job_positions::update_position))
        .route(
            "/job-positions/{id}/toggle-active",
            patch(job_positions::toggle_active),
        )
        .route(
            "/job-positions/{id}/toggle-featured",
            patch(job_positions::toggle_featured),
        )
        .route("/job-positions/{id}", delete(job_positions::delete_position))
        .route("/recruitments", get(recruitments::list_applications))
        .route("/recruitments/{id}", get(recruitments::get_application))
        .route(
            "/recruitments/{id}/status",
            put(recruitments::update_status),
        )
        .route("/recruitments/{id}", delete(recruitments::delete_application))
        .route("/newsletter", get(newsletter::list_subscriptions))
        .route("/newsletter/stats", get(newsletter::subscription_stats))
        .route("/newsletter/{id}", delete(newsletter::delete_subscription))
        .route("/hero-slides", get(hero_slides::list_slides))
        .route("/hero-slides/{id}", get(hero_slides::get_slide))
        .route("/hero-slides", post(hero_slides::handle_admin_form))
        .route("/testimonials", get(testimonials::list_testimonials))
        .route("/testimonials/{id}", get(testimonials::get_testimonial))
        .route("/testimonials", post(testimonials::handle_admin_form))
        .route("/banners", get(banners::list_banners))
        .route("/banners/{id}", get(banners::get_banner))
        .route("/banners", post(banners::create_banner))
        .route("/banners/{id}", put(banners::update_banner))
        .route("/banners/{id}", delete(banners::delete_banner))
        .route("/uploads/image", post(uploads::upload_image))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
