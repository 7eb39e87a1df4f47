// region:    --- Imports
use crate::auction::model::{Category, Comment, Listing, Notification};
use crate::auction::rules::BidRejection;
use crate::listing::commands::NewListingForm;
use crate::query::pagination::Paginated;
use askama::Template;
// endregion: --- Imports

// region:    --- Layout
/// 상단 내비게이션 정보
/// show_account 가 false 면 로그인 상태와 계정 링크를 숨긴다.
#[derive(Debug, Clone)]
pub struct Nav {
    pub username: String,
    pub logged_in: bool,
    pub unread: i64,
    pub show_account: bool,
}

impl Nav {
    pub fn anonymous() -> Self {
        Self {
            username: String::new(),
            logged_in: false,
            unread: 0,
            show_account: true,
        }
    }

    pub fn signed_in(username: &str, unread: i64) -> Self {
        Self {
            username: username.to_string(),
            logged_in: true,
            unread,
            show_account: true,
        }
    }

    /// 요청 사용자를 모르는 에러 페이지용
    pub fn neutral() -> Self {
        Self {
            show_account: false,
            ..Self::anonymous()
        }
    }
}

/// 페이지 이동 링크
#[derive(Debug, Clone, Default)]
pub struct PageLinks {
    pub number: i64,
    pub total_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page: i64,
    pub next_page: i64,
}

impl<T> From<&Paginated<T>> for PageLinks {
    fn from(page: &Paginated<T>) -> Self {
        Self {
            number: page.number,
            total_pages: page.total_pages,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            previous_page: page.previous_page(),
            next_page: page.next_page(),
        }
    }
}
// endregion: --- Layout

// region:    --- Listing Notices
/// 상품 페이지 상단 안내 메시지 (URL 의 override 세그먼트)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingNotice {
    BidPlaced,
    BidTooLow,
    InvalidBid,
    AuctionInactive,
    AuctionClosed,
    CommentAdded,
    EmptyComment,
    Watching,
    Unwatched,
}

impl ListingNotice {
    const ALL: [ListingNotice; 9] = [
        ListingNotice::BidPlaced,
        ListingNotice::BidTooLow,
        ListingNotice::InvalidBid,
        ListingNotice::AuctionInactive,
        ListingNotice::AuctionClosed,
        ListingNotice::CommentAdded,
        ListingNotice::EmptyComment,
        ListingNotice::Watching,
        ListingNotice::Unwatched,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ListingNotice::BidPlaced => "bid_placed",
            ListingNotice::BidTooLow => "bid_too_low",
            ListingNotice::InvalidBid => "invalid_bid",
            ListingNotice::AuctionInactive => "auction_inactive",
            ListingNotice::AuctionClosed => "auction_closed",
            ListingNotice::CommentAdded => "comment_added",
            ListingNotice::EmptyComment => "empty_comment",
            ListingNotice::Watching => "watching",
            ListingNotice::Unwatched => "unwatched",
        }
    }

    /// 알 수 없는 값은 무시
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|notice| notice.slug() == slug)
    }

    pub fn message(self) -> &'static str {
        match self {
            ListingNotice::BidPlaced => "Bid updated successfully",
            ListingNotice::BidTooLow => "Bid not high enough",
            ListingNotice::InvalidBid => "Enter a valid bid amount.",
            ListingNotice::AuctionInactive => "This auction is no longer active.",
            ListingNotice::AuctionClosed => "Auction closed",
            ListingNotice::CommentAdded => "Comment added.",
            ListingNotice::EmptyComment => "Comment cannot be empty.",
            ListingNotice::Watching => "Added to your watchlist.",
            ListingNotice::Unwatched => "Removed from your watchlist.",
        }
    }

    pub fn is_success(self) -> bool {
        !matches!(
            self,
            ListingNotice::BidTooLow
                | ListingNotice::InvalidBid
                | ListingNotice::AuctionInactive
                | ListingNotice::EmptyComment
        )
    }

    /// 안내 메시지를 포함한 상품 페이지 주소
    pub fn listing_url(self, listing_id: i64) -> String {
        format!("/listing/{}/{}", listing_id, self.slug())
    }
}

impl From<&BidRejection> for ListingNotice {
    fn from(rejection: &BidRejection) -> Self {
        match rejection {
            BidRejection::InvalidAmount => ListingNotice::InvalidBid,
            BidRejection::TooLow { .. } => ListingNotice::BidTooLow,
            BidRejection::AuctionInactive => ListingNotice::AuctionInactive,
        }
    }
}
// endregion: --- Listing Notices

// region:    --- Templates
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub nav: Nav,
    pub heading: String,
    pub listings: Vec<Listing>,
    pub categories: Vec<Category>,
    pub selected_category: String,
    pub show_pages: bool,
    pub pages: PageLinks,
}

#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingTemplate {
    pub nav: Nav,
    pub listing: Listing,
    pub comments: Vec<Comment>,
    pub bid_count: i64,
    pub is_owner: bool,
    pub is_watching: bool,
    pub is_winner: bool,
    pub message: String,
    pub message_ok: bool,
}

#[derive(Template)]
#[template(path = "create.html")]
pub struct CreateListingTemplate {
    pub nav: Nav,
    pub categories: Vec<Category>,
    pub form: NewListingForm,
    pub message: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub message: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub nav: Nav,
    pub message: String,
    pub username: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "watchlist.html")]
pub struct WatchlistTemplate {
    pub nav: Nav,
    pub listings: Vec<Listing>,
}

#[derive(Template)]
#[template(path = "notifications.html")]
pub struct NotificationsTemplate {
    pub nav: Nav,
    pub notifications: Vec<Notification>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub nav: Nav,
    pub status: u16,
    pub message: String,
}
// endregion: --- Templates

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn notice_slugs_round_trip() {
        for notice in ListingNotice::ALL {
            assert_eq!(ListingNotice::from_slug(notice.slug()), Some(notice));
        }
        assert_eq!(ListingNotice::from_slug("whatever"), None);
    }

    #[test]
    fn bid_rejections_map_to_failure_notices() {
        let too_low = BidRejection::TooLow {
            amount: dec!(10),
            current_price: dec!(20),
        };
        let notice = ListingNotice::from(&too_low);
        assert_eq!(notice, ListingNotice::BidTooLow);
        assert!(!notice.is_success());
        assert_eq!(notice.listing_url(4), "/listing/4/bid_too_low");
    }

    #[test]
    fn malformed_bid_maps_to_invalid_bid_notice() {
        let rejection = crate::auction::rules::parse_amount("12.345").unwrap_err();
        assert_eq!(ListingNotice::from(&rejection), ListingNotice::InvalidBid);
    }

    #[test]
    fn error_page_escapes_message() {
        let page = ErrorTemplate {
            nav: Nav::anonymous(),
            status: 400,
            message: "<script>".to_string(),
        };
        let html = page.render().unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn error_page_does_not_claim_a_sign_in_state() {
        let page = ErrorTemplate {
            nav: Nav::neutral(),
            status: 404,
            message: "The page you requested does not exist.".to_string(),
        };
        let html = page.render().unwrap();
        assert!(html.contains("Error 404"));
        assert!(!html.contains("Not signed in."));
        assert!(!html.contains("href=\"/login\""));
        assert!(html.contains("href=\"/\""));
    }

    #[test]
    fn login_page_shows_message_for_anonymous_user() {
        let page = LoginTemplate {
            nav: Nav::anonymous(),
            message: "Invalid username and/or password.".to_string(),
        };
        let html = page.render().unwrap();
        assert!(html.contains("Invalid username and/or password."));
        assert!(html.contains("href=\"/register\""));
    }
}
