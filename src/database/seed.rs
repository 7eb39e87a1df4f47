/// 데모 데이터 생성
/// 사용자, 카테고리, 상품, 입찰, 댓글을 각각 30건씩 만든다.
// region:    --- Imports
use super::DatabaseManager;
use crate::account::password::hash_password;
use crate::error::AppError;
use rust_decimal::Decimal;
use tracing::info;
// endregion: --- Imports

const SEED_COUNT: usize = 30;
const SEED_PASSWORD: &str = "password123";
const SEED_IMAGE_URL: &str = "https://images.pexels.com/photos/1006293/pexels-photo-1006293.jpeg";

/// 생성 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub categories: usize,
    pub listings: usize,
    pub bids: usize,
    pub comments: usize,
}

/// i 번째 상품의 시작가
fn starting_price(i: usize) -> Decimal {
    Decimal::from(100 + 50 * i as i64)
}

/// i 번째 상품에 들어가는 입찰 금액
fn seed_bid_amount(i: usize) -> Decimal {
    starting_price(i) + Decimal::from(10 * i as i64 + 50)
}

/// 사용자가 하나도 없을 때만 데모 데이터 생성
pub async fn seed_demo_data(db_manager: &DatabaseManager) -> Result<Option<SeedReport>, AppError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db_manager.pool())
        .await?;
    if existing > 0 {
        info!(
            "{:<12} --> 사용자 {}명이 이미 있어 데모 데이터를 건너뜀",
            "Seed", existing
        );
        return Ok(None);
    }

    // 모든 데모 사용자가 같은 비밀번호를 쓴다
    let password_hash = hash_password(SEED_PASSWORD)?;

    let report = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let mut report = SeedReport::default();

                let mut users = Vec::with_capacity(SEED_COUNT);
                for i in 1..=SEED_COUNT {
                    let id: i64 = sqlx::query_scalar(
                        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
                    )
                    .bind(format!("user{}", i))
                    .bind(format!("user{}@example.com", i))
                    .bind(&password_hash)
                    .fetch_one(&mut **tx)
                    .await?;
                    users.push(id);
                }
                report.users = users.len();

                let mut categories = Vec::with_capacity(SEED_COUNT);
                for i in 1..=SEED_COUNT {
                    let id: i64 =
                        sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
                            .bind(format!("Category {}", i))
                            .fetch_one(&mut **tx)
                            .await?;
                    categories.push(id);
                }
                report.categories = categories.len();

                for i in 0..SEED_COUNT {
                    let listing_id: i64 = sqlx::query_scalar(
                        "INSERT INTO listings (title, description, starting_bid, current_price, image_url, owner_id, category_id)
                         VALUES ($1, $2, $3, $4, $5, $6, $7)
                         RETURNING id",
                    )
                    .bind(format!("Laptop {}", i + 1))
                    .bind(format!("Description for laptop {}", i + 1))
                    .bind(starting_price(i))
                    .bind(seed_bid_amount(i))
                    .bind(SEED_IMAGE_URL)
                    .bind(users[i % users.len()])
                    .bind(categories[i % categories.len()])
                    .fetch_one(&mut **tx)
                    .await?;
                    report.listings += 1;

                    sqlx::query("INSERT INTO bids (amount, bidder_id, listing_id) VALUES ($1, $2, $3)")
                        .bind(seed_bid_amount(i))
                        .bind(users[(i + 5) % users.len()])
                        .bind(listing_id)
                        .execute(&mut **tx)
                        .await?;
                    report.bids += 1;

                    sqlx::query(
                        "INSERT INTO comments (content, author_id, listing_id) VALUES ($1, $2, $3)",
                    )
                    .bind(format!("This is the best laptop: {}.", i + 1))
                    .bind(users[(i + 10) % users.len()])
                    .bind(listing_id)
                    .execute(&mut **tx)
                    .await?;
                    report.comments += 1;
                }

                Ok::<_, AppError>(report)
            })
        })
        .await?;

    info!("{:<12} --> 데모 데이터 생성 완료: {:?}", "Seed", report);
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn seeded_prices_follow_listing_index() {
        assert_eq!(starting_price(0), dec!(100));
        assert_eq!(starting_price(3), dec!(250));
        assert_eq!(seed_bid_amount(0), dec!(150));
        assert_eq!(seed_bid_amount(3), dec!(330));
    }

    #[test]
    fn seeded_bid_beats_starting_price() {
        for i in 0..SEED_COUNT {
            assert!(seed_bid_amount(i) > starting_price(i));
        }
    }
}
