use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::rules;

// 사용자 모델
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// 카테고리 모델
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// 경매 상품 모델
/// 소유자, 낙찰자, 카테고리 이름까지 조인된 형태로 조회한다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub starting_bid: Decimal,
    pub current_price: Decimal,
    pub active: bool,
    pub image_url: String,
    pub owner_id: i64,
    pub owner_name: String,
    pub winner_id: Option<i64>,
    pub winner_name: Option<String>,
    pub category_id: i64,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// 다음 입찰 최소 금액
    pub fn min_next_bid(&self) -> Decimal {
        rules::min_next_bid(self.current_price)
    }
}

// 입찰 모델
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub amount: Decimal,
    pub bidder_id: i64,
    pub listing_id: i64,
    pub created_at: DateTime<Utc>,
}

// 댓글 모델 (작성자 이름 포함)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
    pub author_name: String,
    pub listing_id: i64,
    pub created_at: DateTime<Utc>,
}

// 알림 모델
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub listing_id: Option<i64>,
}
