// region:    --- Imports
use super::pagination::{Page, Paginated};
use super::queries;
use crate::auction::model::{Category, Comment, Listing, Notification};
use crate::database::DatabaseManager;
use sqlx::Error as SqlxError;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 상품 조회
pub async fn get_listing(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Listing, SqlxError> {
    info!("{:<12} --> 상품 조회 id: {}", "Query", listing_id);
    sqlx::query_as::<_, Listing>(queries::GET_LISTING)
        .bind(listing_id)
        .fetch_one(db_manager.pool())
        .await
}

/// 진행 중인 상품 페이지 조회
pub async fn get_active_listings(
    db_manager: &DatabaseManager,
    page: Page,
) -> Result<Paginated<Listing>, SqlxError> {
    info!(
        "{:<12} --> 진행 중인 상품 조회 page: {}",
        "Query", page.number
    );
    let total: i64 = sqlx::query_scalar(queries::COUNT_ACTIVE_LISTINGS)
        .fetch_one(db_manager.pool())
        .await?;
    let page = page.clamp(total);

    let listings = sqlx::query_as::<_, Listing>(queries::GET_ACTIVE_LISTINGS_PAGE)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(db_manager.pool())
        .await?;

    Ok(Paginated::new(listings, page, total))
}

/// 카테고리별 진행 중인 상품 조회
pub async fn get_active_listings_by_category(
    db_manager: &DatabaseManager,
    category_id: i64,
) -> Result<Vec<Listing>, SqlxError> {
    info!(
        "{:<12} --> 카테고리별 상품 조회 category: {}",
        "Query", category_id
    );
    sqlx::query_as::<_, Listing>(queries::GET_ACTIVE_LISTINGS_BY_CATEGORY)
        .bind(category_id)
        .fetch_all(db_manager.pool())
        .await
}

/// 관심 목록 조회
pub async fn get_watchlist(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> 관심 목록 조회 user: {}", "Query", user_id);
    sqlx::query_as::<_, Listing>(queries::GET_WATCHLIST)
        .bind(user_id)
        .fetch_all(db_manager.pool())
        .await
}

/// 관심 등록 여부 조회
pub async fn is_watching(
    db_manager: &DatabaseManager,
    listing_id: i64,
    user_id: i64,
) -> Result<bool, SqlxError> {
    sqlx::query_scalar(queries::IS_WATCHING)
        .bind(listing_id)
        .bind(user_id)
        .fetch_one(db_manager.pool())
        .await
}

/// 모든 카테고리 조회
pub async fn get_all_categories(db_manager: &DatabaseManager) -> Result<Vec<Category>, SqlxError> {
    sqlx::query_as::<_, Category>(queries::GET_ALL_CATEGORIES)
        .fetch_all(db_manager.pool())
        .await
}

/// 이름으로 카테고리 조회
pub async fn find_category(
    db_manager: &DatabaseManager,
    name: &str,
) -> Result<Option<Category>, SqlxError> {
    sqlx::query_as::<_, Category>(queries::GET_CATEGORY_BY_NAME)
        .bind(name.trim())
        .fetch_optional(db_manager.pool())
        .await
}

/// 상품 댓글 조회
pub async fn get_listing_comments(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Vec<Comment>, SqlxError> {
    sqlx::query_as::<_, Comment>(queries::GET_LISTING_COMMENTS)
        .bind(listing_id)
        .fetch_all(db_manager.pool())
        .await
}

/// 상품 입찰 수 조회
pub async fn count_listing_bids(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<i64, SqlxError> {
    sqlx::query_scalar(queries::COUNT_LISTING_BIDS)
        .bind(listing_id)
        .fetch_one(db_manager.pool())
        .await
}

/// 사용자 알림 조회
pub async fn get_notifications(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<Notification>, SqlxError> {
    info!("{:<12} --> 알림 조회 user: {}", "Query", user_id);
    sqlx::query_as::<_, Notification>(queries::GET_USER_NOTIFICATIONS)
        .bind(user_id)
        .fetch_all(db_manager.pool())
        .await
}

/// 읽지 않은 알림 수 조회
pub async fn count_unread_notifications(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<i64, SqlxError> {
    sqlx::query_scalar(queries::COUNT_UNREAD_NOTIFICATIONS)
        .bind(user_id)
        .fetch_one(db_manager.pool())
        .await
}

// endregion: --- Query Handlers
