/// 알림 커맨드
/// 1. 알림 기록 (입찰, 낙찰 이벤트)
/// 2. 읽음 처리
// region:    --- Imports
use crate::auction::events::AuctionEvent;
use crate::database::DatabaseManager;
use crate::error::AppError;
use sqlx::PgConnection;
use tracing::info;
// endregion: --- Imports

/// 1. 알림 기록 (진행 중인 트랜잭션 안에서 호출)
pub async fn record(
    conn: &mut PgConnection,
    recipient_id: i64,
    event: &AuctionEvent,
) -> Result<i64, sqlx::Error> {
    info!(
        "{:<12} --> 알림 기록 user: {}, event: {:?}",
        "Notify", recipient_id, event
    );
    sqlx::query_scalar(
        "INSERT INTO notifications (user_id, message, listing_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(recipient_id)
    .bind(event.message())
    .bind(event.listing_id())
    .fetch_one(conn)
    .await
}

/// 2. 읽음 처리. 다른 사용자의 알림은 찾을 수 없음으로 처리
pub async fn mark_read(
    db_manager: &DatabaseManager,
    notification_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
        .bind(notification_id)
        .bind(user_id)
        .execute(db_manager.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Notification".to_string()));
    }
    info!(
        "{:<12} --> 알림 읽음 처리 id: {}",
        "Notify", notification_id
    );
    Ok(())
}
