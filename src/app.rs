// region:    --- Imports
use crate::config::Config;
use crate::database::DatabaseManager;
use crate::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
// endregion: --- Imports

/// 핸들러 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseManager>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseManager>, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// 라우터 설정
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/logout", get(handlers::logout))
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register),
        )
        .route(
            "/add/listing",
            get(handlers::create_listing_form).post(handlers::create_listing),
        )
        .route("/listing/:id", get(handlers::view_listing))
        .route("/listing/:id/:notice", get(handlers::view_listing_with_notice))
        .route("/add/comment/:id", post(handlers::add_comment))
        .route("/add/bid/:id", post(handlers::add_bid))
        .route("/close/auction/:id", post(handlers::close_auction))
        .route("/notifications/show", get(handlers::show_notifications))
        .route("/display/watchlist", get(handlers::display_watchlist))
        .route("/add/watchlist/:id", post(handlers::toggle_watchlist))
        .route(
            "/display/category",
            get(handlers::display_category).post(handlers::display_category_form),
        )
        .route("/mark/read/:id", post(handlers::mark_read))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
