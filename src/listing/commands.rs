/// 상품 관련 커맨드 처리
/// 1. 상품 등록
/// 2. 댓글 작성
/// 3. 관심 목록 토글
// region:    --- Imports
use crate::auction::rules;
use crate::database::DatabaseManager;
use crate::error::AppError;
use crate::query::handlers as query;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use url::Url;
// endregion: --- Imports

const MAX_TITLE_CHARS: usize = 50;
const MAX_DESCRIPTION_CHARS: usize = 300;

// region:    --- Forms
/// 상품 등록 폼
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewListingForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub starting_bid: String,
    #[serde(default)]
    pub category: String,
}

/// 검증된 상품 등록 요청
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub starting_bid: Decimal,
    pub category: String,
}

impl NewListingForm {
    /// 폼 검증. 실패 시 사용자에게 보여줄 메시지 반환
    pub fn validate(&self) -> Result<NewListing, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("A title is required.".to_string());
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(format!(
                "The title must be at most {} characters.",
                MAX_TITLE_CHARS
            ));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err("A description is required.".to_string());
        }
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(format!(
                "The description must be at most {} characters.",
                MAX_DESCRIPTION_CHARS
            ));
        }

        let starting_bid = rules::parse_amount(&self.starting_bid).map_err(|_| {
            "The starting bid must be a positive amount with at most two decimal places."
                .to_string()
        })?;

        let image_url = self.image_url.trim();
        match Url::parse(image_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => return Err("Enter a valid http(s) image URL.".to_string()),
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err("Choose a category.".to_string());
        }

        Ok(NewListing {
            title: title.to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
            starting_bid,
            category: category.to_string(),
        })
    }
}
// endregion: --- Forms

// region:    --- Commands
/// 1. 상품 등록. 현재 가격은 시작가로 초기화
pub async fn handle_create_listing(
    listing: NewListing,
    owner_id: i64,
    db_manager: &DatabaseManager,
) -> Result<i64, AppError> {
    info!(
        "{:<12} --> 상품 등록 요청: {} (owner: {})",
        "Command", listing.title, owner_id
    );
    let category = query::find_category(db_manager, &listing.category)
        .await?
        .ok_or_else(|| AppError::Validation("Choose a valid category.".to_string()))?;

    let listing_id: i64 = sqlx::query_scalar(
        "INSERT INTO listings (title, description, starting_bid, current_price, image_url, owner_id, category_id)
         VALUES ($1, $2, $3, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(&listing.title)
    .bind(&listing.description)
    .bind(listing.starting_bid)
    .bind(&listing.image_url)
    .bind(owner_id)
    .bind(category.id)
    .fetch_one(db_manager.pool())
    .await?;

    info!("{:<12} --> 상품 등록 완료 id: {}", "Command", listing_id);
    Ok(listing_id)
}

/// 2. 댓글 작성
pub async fn handle_add_comment(
    listing_id: i64,
    author_id: i64,
    content: &str,
    db_manager: &DatabaseManager,
) -> Result<i64, AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Comment cannot be empty.".to_string()));
    }
    ensure_listing_exists(db_manager, listing_id).await?;

    let comment_id: i64 = sqlx::query_scalar(
        "INSERT INTO comments (content, author_id, listing_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(content)
    .bind(author_id)
    .bind(listing_id)
    .fetch_one(db_manager.pool())
    .await?;

    info!(
        "{:<12} --> 댓글 작성 listing: {}, comment: {}",
        "Command", listing_id, comment_id
    );
    Ok(comment_id)
}

/// 3. 관심 목록 토글. 토글 후 관심 등록 상태 반환
pub async fn handle_toggle_watchlist(
    listing_id: i64,
    user_id: i64,
    db_manager: &DatabaseManager,
) -> Result<bool, AppError> {
    ensure_listing_exists(db_manager, listing_id).await?;

    let watching = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let removed = sqlx::query(
                    "DELETE FROM watchers WHERE listing_id = $1 AND user_id = $2",
                )
                .bind(listing_id)
                .bind(user_id)
                .execute(&mut **tx)
                .await?
                .rows_affected();

                if removed > 0 {
                    return Ok(false);
                }

                sqlx::query(
                    "INSERT INTO watchers (listing_id, user_id) VALUES ($1, $2)
                     ON CONFLICT DO NOTHING",
                )
                .bind(listing_id)
                .bind(user_id)
                .execute(&mut **tx)
                .await?;
                Ok::<_, AppError>(true)
            })
        })
        .await?;

    info!(
        "{:<12} --> 관심 목록 토글 listing: {}, user: {}, watching: {}",
        "Command", listing_id, user_id, watching
    );
    Ok(watching)
}

async fn ensure_listing_exists(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<(), AppError> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM listings WHERE id = $1")
        .bind(listing_id)
        .fetch_optional(db_manager.pool())
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("Listing".to_string()))
}
// endregion: --- Commands

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_form() -> NewListingForm {
        NewListingForm {
            title: "  Laptop 1 ".to_string(),
            description: "Description for laptop 1".to_string(),
            image_url: "https://images.pexels.com/photos/1006293/pexels-photo-1006293.jpeg"
                .to_string(),
            starting_bid: "100.00".to_string(),
            category: "Category 1".to_string(),
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_parsed() {
        let listing = valid_form().validate().unwrap();
        assert_eq!(listing.title, "Laptop 1");
        assert_eq!(listing.starting_bid, dec!(100));
        assert_eq!(listing.category, "Category 1");
    }

    #[test]
    fn missing_title_is_rejected() {
        let form = NewListingForm {
            title: "   ".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap_err(), "A title is required.");
    }

    #[test]
    fn long_title_is_rejected() {
        let form = NewListingForm {
            title: "x".repeat(51),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().contains("at most 50"));
    }

    #[test]
    fn bad_starting_bid_is_rejected() {
        for bid in ["", "free", "0", "-1", "10.999"] {
            let form = NewListingForm {
                starting_bid: bid.to_string(),
                ..valid_form()
            };
            assert!(form.validate().is_err(), "accepted starting bid {:?}", bid);
        }
    }

    #[test]
    fn non_http_image_url_is_rejected() {
        for image_url in ["", "not a url", "ftp://example.com/a.png"] {
            let form = NewListingForm {
                image_url: image_url.to_string(),
                ..valid_form()
            };
            assert_eq!(
                form.validate().unwrap_err(),
                "Enter a valid http(s) image URL."
            );
        }
    }

    #[test]
    fn missing_category_is_rejected() {
        let form = NewListingForm {
            category: String::new(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap_err(), "Choose a category.");
    }
}
