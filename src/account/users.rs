use crate::auction::model::User;
use crate::database::DatabaseManager;
use crate::error::AppError;
use tracing::info;

// users 테이블 컬럼 길이
pub const MAX_USERNAME_CHARS: usize = 150;
pub const MAX_EMAIL_CHARS: usize = 254;

pub struct UserRepository;

impl UserRepository {
    /// 사용자 생성. 중복 사용자 이름은 검증 오류로 반환
    pub async fn create(
        db_manager: &DatabaseManager,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(
            r#"
INSERT INTO users (username, email, password_hash)
VALUES ($1, $2, $3)
RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db_manager.pool())
        .await;

        match result {
            Ok(user) => {
                info!("{:<12} --> 사용자 생성: {}", "Account", user.username);
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Validation("Username already taken.".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_by_username(
        db_manager: &DatabaseManager,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db_manager.pool())
        .await?;

        Ok(user)
    }
}
