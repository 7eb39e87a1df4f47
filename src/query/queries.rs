// 상품 조회 공통 SELECT (소유자, 낙찰자, 카테고리 조인)
macro_rules! listing_select {
    () => {
        r#"
    SELECT l.id, l.title, l.description, l.starting_bid, l.current_price, l.active, l.image_url,
           l.owner_id, o.username AS owner_name, l.winner_id, w.username AS winner_name,
           l.category_id, c.name AS category_name, l.created_at
    FROM listings l
    JOIN users o ON o.id = l.owner_id
    LEFT JOIN users w ON w.id = l.winner_id
    JOIN categories c ON c.id = l.category_id
"#
    };
}

/// 상품 조회
pub const GET_LISTING: &str = concat!(listing_select!(), "WHERE l.id = $1");

/// 진행 중인 상품 페이지 조회
pub const GET_ACTIVE_LISTINGS_PAGE: &str = concat!(
    listing_select!(),
    "WHERE l.active ORDER BY l.created_at DESC, l.id DESC LIMIT $1 OFFSET $2"
);

/// 진행 중인 상품 수
pub const COUNT_ACTIVE_LISTINGS: &str = "SELECT COUNT(*) FROM listings WHERE active";

/// 카테고리별 진행 중인 상품 조회
pub const GET_ACTIVE_LISTINGS_BY_CATEGORY: &str = concat!(
    listing_select!(),
    "WHERE l.active AND l.category_id = $1 ORDER BY l.created_at DESC, l.id DESC"
);

/// 관심 목록 조회
pub const GET_WATCHLIST: &str = concat!(
    listing_select!(),
    "JOIN watchers wt ON wt.listing_id = l.id WHERE wt.user_id = $1 ORDER BY l.created_at DESC, l.id DESC"
);

/// 관심 등록 여부
pub const IS_WATCHING: &str =
    "SELECT EXISTS (SELECT 1 FROM watchers WHERE listing_id = $1 AND user_id = $2)";

/// 모든 카테고리 조회
pub const GET_ALL_CATEGORIES: &str = "SELECT id, name FROM categories ORDER BY name";

/// 이름으로 카테고리 조회
pub const GET_CATEGORY_BY_NAME: &str = "SELECT id, name FROM categories WHERE name = $1";

/// 상품 댓글 조회
pub const GET_LISTING_COMMENTS: &str = r#"
    SELECT cm.id, cm.content, cm.author_id, u.username AS author_name, cm.listing_id, cm.created_at
    FROM comments cm
    JOIN users u ON u.id = cm.author_id
    WHERE cm.listing_id = $1
    ORDER BY cm.created_at ASC, cm.id ASC
"#;

/// 상품 입찰 조회
pub const GET_LISTING_BIDS: &str = r#"
    SELECT id, amount, bidder_id, listing_id, created_at
    FROM bids
    WHERE listing_id = $1
    ORDER BY created_at ASC, id ASC
"#;

/// 상품 입찰 수
pub const COUNT_LISTING_BIDS: &str = "SELECT COUNT(*) FROM bids WHERE listing_id = $1";

/// 사용자 알림 조회
pub const GET_USER_NOTIFICATIONS: &str = r#"
    SELECT id, user_id, message, created_at, is_read, listing_id
    FROM notifications
    WHERE user_id = $1
    ORDER BY created_at DESC, id DESC
"#;

/// 읽지 않은 알림 수
pub const COUNT_UNREAD_NOTIFICATIONS: &str =
    "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT is_read";
