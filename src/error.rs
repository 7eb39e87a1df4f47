// region:    --- Imports
use crate::auction::rules::BidRejection;
use crate::views::{ErrorTemplate, Nav};
use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::error;
// endregion: --- Imports

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Login required")]
    LoginRequired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Bid(#[from] BidRejection),

    #[error("Password hashing error: {0}")]
    Password(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(sqlx::Error::RowNotFound) | AppError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::LoginRequired => StatusCode::SEE_OTHER,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) | AppError::Bid(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Database(_)
            | AppError::Template(_)
            | AppError::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// axum 응답 변환 (HTML 에러 페이지)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::LoginRequired = self {
            return Redirect::to("/login").into_response();
        }

        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{:<12} --> 요청 처리 실패: {}", "Error", self);
            "Something went wrong. Please try again later.".to_string()
        } else if status == StatusCode::NOT_FOUND {
            "The page you requested does not exist.".to_string()
        } else {
            self.to_string()
        };

        let page = ErrorTemplate {
            nav: Nav::neutral(),
            status: status.as_u16(),
            message,
        };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                error!("{:<12} --> 에러 페이지 렌더링 실패: {:?}", "Error", e);
                (status, status.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn missing_row_maps_to_not_found() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn login_required_redirects_to_login() {
        let response = AppError::LoginRequired.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
    }

    #[test]
    fn forbidden_keeps_its_status() {
        let response = AppError::Forbidden("only the owner can close".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
