/// 만료 세션 정리 스케줄러
/// 만료된 세션은 조회 시 이미 무시되므로, 테이블이 계속 커지지 않도록 주기적으로 삭제만 한다.
// region:    --- Imports
use crate::account::SessionRepository;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info};

// endregion: --- Imports

// region:    --- Session Sweeper
/// 만료 세션 정리 스케줄러
pub struct SessionSweeper {
    pool: Arc<PgPool>,
    period: Duration,
}

/// 만료 세션 정리 스케줄러 생성
impl SessionSweeper {
    pub fn new(pool: Arc<PgPool>, period_secs: u64) -> Self {
        Self {
            pool,
            period: Duration::from_secs(period_secs.max(1)),
        }
    }

    /// 만료 세션 정리 스케줄러 시작
    pub fn start(&self) -> JoinHandle<()> {
        let pool = Arc::clone(&self.pool);
        let period = self.period;
        info!(
            "{:<12} --> 세션 정리 주기: {}초",
            "Scheduler",
            period.as_secs()
        );
        tokio::spawn(async move {
            let mut interval = interval(period);
            loop {
                interval.tick().await;
                if let Err(e) = Self::sweep(&pool).await {
                    error!(
                        "{:<12} --> 만료 세션 정리 중 오류 발생: {:?}",
                        "Scheduler", e
                    );
                }
            }
        })
    }

    /// 만료 세션 삭제
    async fn sweep(pool: &PgPool) -> Result<(), sqlx::Error> {
        let removed = SessionRepository::cleanup_expired(pool).await?;
        debug!(
            "{:<12} --> 만료 세션 {}건 삭제",
            "Scheduler", removed
        );
        Ok(())
    }
}
// endregion: --- Session Sweeper
