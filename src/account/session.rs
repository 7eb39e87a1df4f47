// region:    --- Imports
use crate::app::AppState;
use crate::auction::model::User;
use crate::database::DatabaseManager;
use crate::error::AppError;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;
// endregion: --- Imports

/// 세션 쿠키 이름
pub const SESSION_COOKIE: &str = "auction_session";

// region:    --- Session Repository
pub struct SessionRepository;

impl SessionRepository {
    /// 세션 생성 후 토큰 반환
    pub async fn create(
        db_manager: &DatabaseManager,
        user_id: i64,
        expiry_hours: i64,
    ) -> Result<String, AppError> {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = expiry_from(Utc::now(), expiry_hours)?;

        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(&token)
            .bind(user_id)
            .bind(expires_at)
            .execute(db_manager.pool())
            .await?;

        Ok(token)
    }

    /// 만료되지 않은 세션의 사용자 조회
    pub async fn get_user(
        db_manager: &DatabaseManager,
        token: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
SELECT u.id, u.username, u.email, u.password_hash, u.created_at
FROM sessions s
JOIN users u ON u.id = s.user_id
WHERE s.token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(db_manager.pool())
        .await?;

        Ok(user)
    }

    pub async fn delete(db_manager: &DatabaseManager, token: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(db_manager.pool())
            .await?;

        Ok(())
    }

    /// 만료된 세션 정리, 삭제된 행 수 반환
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
// endregion: --- Session Repository

/// 세션 만료 시각 계산, 범위를 벗어나면 설정 오류
fn expiry_from(now: DateTime<Utc>, expiry_hours: i64) -> Result<DateTime<Utc>, AppError> {
    Duration::try_hours(expiry_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::Config(format!(
                "SESSION_EXPIRY_HOURS out of range: {}",
                expiry_hours
            ))
        })
}

// region:    --- Cookies
/// 세션 쿠키 생성
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// 세션 쿠키 삭제용 쿠키
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

fn session_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}
// endregion: --- Cookies

// region:    --- Extractors
/// 로그인한 사용자. 없으면 /login 으로 리다이렉트
pub struct CurrentUser(pub User);

/// 로그인 여부와 관계없이 사용자 조회
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match session_token(parts) {
            Some(token) => Ok(MaybeUser(
                SessionRepository::get_user(&state.db, &token).await?,
            )),
            None => Ok(MaybeUser(None)),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state).await?;
        user.map(CurrentUser).ok_or(AppError::LoginRequired)
    }
}
// endregion: --- Extractors

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, Request};

    fn parts_with_cookie(cookie: &str) -> Parts {
        let (parts, _) = Request::builder()
            .uri("/")
            .header(COOKIE, cookie)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn session_token_is_read_from_cookie_header() {
        let parts = parts_with_cookie("theme=dark; auction_session=abc123");
        assert_eq!(session_token(&parts), Some("abc123".to_string()));
    }

    #[test]
    fn empty_session_cookie_is_ignored() {
        let parts = parts_with_cookie("auction_session=");
        assert_eq!(session_token(&parts), None);
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("abc123".to_string(), true);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn session_expiry_adds_configured_hours() {
        let now = Utc::now();
        assert_eq!(expiry_from(now, 24).unwrap(), now + Duration::hours(24));
    }

    #[test]
    fn session_expiry_out_of_range_is_a_config_error() {
        let err = expiry_from(Utc::now(), 10_000_000_000_000).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(expiry_from(Utc::now(), i64::MAX).is_err());
    }
}
