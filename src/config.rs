// region:    --- Imports
use crate::error::AppError;
use std::str::FromStr;
// endregion: --- Imports

// 세션 유효 기간 상한 (10년)
pub const MAX_SESSION_EXPIRY_HOURS: i64 = 24 * 365 * 10;

// region:    --- Config
/// 서버 설정 (환경 변수 및 .env 파일)
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub session_expiry_hours: i64,
    pub session_sweep_secs: u64,
    pub page_size: i64,
    pub reset_database: bool,
    pub cookie_secure: bool,
}

impl Config {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL must be set".to_string()))?;

        let config = Config {
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env_or("SERVER_PORT", 3000)?,
            database_url,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            session_expiry_hours: env_or("SESSION_EXPIRY_HOURS", 24 * 14)?,
            session_sweep_secs: env_or("SESSION_SWEEP_SECS", 300)?,
            page_size: env_or("PAGE_SIZE", 10)?,
            reset_database: env_or("RESET_DATABASE", false)?,
            cookie_secure: env_or("COOKIE_SECURE", false)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// 테스트 및 시드 도구용 기본 설정
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            database_url: database_url.into(),
            db_max_connections: 5,
            session_expiry_hours: 24 * 14,
            session_sweep_secs: 300,
            page_size: 10,
            reset_database: false,
            cookie_secure: false,
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.page_size < 1 {
            return Err(AppError::Config("PAGE_SIZE must be at least 1".to_string()));
        }
        if !(1..=MAX_SESSION_EXPIRY_HOURS).contains(&self.session_expiry_hours) {
            return Err(AppError::Config(format!(
                "SESSION_EXPIRY_HOURS must be between 1 and {}",
                MAX_SESSION_EXPIRY_HOURS
            )));
        }
        if self.db_max_connections == 0 {
            return Err(AppError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
// endregion: --- Config

/// 환경 변수가 없으면 기본값, 있으면 파싱
fn env_or<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_accepts_trimmed_numbers_and_bools() {
        let port: u16 = parse_value("SERVER_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
        let reset: bool = parse_value("RESET_DATABASE", "true").unwrap();
        assert!(reset);
    }

    #[test]
    fn parse_value_reports_the_key() {
        let err = parse_value::<u16>("SERVER_PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::with_database_url("postgres://localhost/auctions");
        assert!(config.validate().is_ok());
        config.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_bounds_session_expiry() {
        let mut config = Config::with_database_url("postgres://localhost/auctions");
        config.session_expiry_hours = MAX_SESSION_EXPIRY_HOURS;
        assert!(config.validate().is_ok());
        config.session_expiry_hours = MAX_SESSION_EXPIRY_HOURS + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SESSION_EXPIRY_HOURS"));
        config.session_expiry_hours = 10_000_000_000_000;
        assert!(config.validate().is_err());
        config.session_expiry_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let config = Config::with_database_url("postgres://localhost/auctions");
        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }
}
