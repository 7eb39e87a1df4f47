pub mod seed;

use crate::config::Config;
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::info;

// 스키마 초기화 직렬화용 advisory lock 키
const SCHEMA_LOCK_KEY: i64 = 0x6175_6374_696f_6e;

pub struct DatabaseManager {
    pub pool: Arc<PgPool>,
}

impl DatabaseManager {
    /// 데이터베이스 매니저 생성
    pub async fn new(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// 첫 사용 시점에 연결하는 매니저 생성
    pub fn lazy(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_lazy(&config.database_url)?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// 데이터베이스 풀 가져오기
    pub fn get_pool(&self) -> Arc<PgPool> {
        Arc::clone(&self.pool)
    }

    /// 트랜잭션 실행
    pub async fn transaction<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: for<'c> FnOnce(
            &'c mut sqlx::Transaction<'_, sqlx::Postgres>,
        ) -> Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'c>>,
        E: From<sqlx::Error>,
    {
        let mut tx = self.pool.begin().await?;
        let result = f(&mut tx).await;
        match result {
            Ok(r) => {
                tx.commit().await?;
                Ok(r)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    /// 데이터베이스 초기화
    /// reset 이면 기존 테이블을 모두 삭제한 뒤 스키마를 다시 만든다.
    pub async fn initialize_database(&self, reset: bool) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;

        // 여러 인스턴스가 동시에 스키마를 만들지 않도록 잠금
        sqlx::query("SELECT pg_advisory_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *conn)
            .await?;

        let result = Self::apply_schema(&mut *conn, reset).await;

        sqlx::query("SELECT pg_advisory_unlock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *conn)
            .await?;

        result
    }

    async fn apply_schema(conn: &mut PgConnection, reset: bool) -> Result<(), sqlx::Error> {
        if reset {
            // 00-recreate-db.sql 실행
            let recreate_db_sql = include_str!("../sql/00-recreate-db.sql");
            Self::execute_multi_query(conn, recreate_db_sql).await?;
            info!("{:<12} --> 기존 테이블 삭제 완료", "Database");
        }

        // 01-create-schema.sql 실행
        let create_schema_sql = include_str!("../sql/01-create-schema.sql");
        Self::execute_multi_query(conn, create_schema_sql).await?;

        Ok(())
    }

    /// 여러 쿼리 실행
    async fn execute_multi_query(conn: &mut PgConnection, sql: &str) -> Result<(), sqlx::Error> {
        for query in sql.split(';') {
            let query = query.trim();
            if !query.is_empty() {
                sqlx::query(query).execute(&mut *conn).await?;
            }
        }
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
