// region:    --- Imports
use crate::account::password::{hash_password, verify_password};
use crate::account::session::{removal_cookie, session_cookie};
use crate::account::users::{MAX_EMAIL_CHARS, MAX_USERNAME_CHARS};
use crate::account::{CurrentUser, MaybeUser, SessionRepository, UserRepository, SESSION_COOKIE};
use crate::app::AppState;
use crate::auction::model::User;
use crate::auction::rules;
use crate::bidding::commands::{
    handle_close_auction, handle_place_bid, CloseAuctionCommand, PlaceBidCommand,
};
use crate::error::AppError;
use crate::listing::commands::{
    handle_add_comment, handle_create_listing, handle_toggle_watchlist, NewListingForm,
};
use crate::notification;
use crate::query::handlers as query;
use crate::query::pagination::Page;
use crate::views::{
    CreateListingTemplate, IndexTemplate, ListingNotice, ListingTemplate, LoginTemplate, Nav,
    NotificationsTemplate, PageLinks, RegisterTemplate, WatchlistTemplate,
};
use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

// endregion: --- Imports

// region:    --- Forms
#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirmation: String,
}

#[derive(Debug, Deserialize)]
pub struct BidForm {
    #[serde(default)]
    pub new_bid: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub new_comment: String,
}
// endregion: --- Forms

// region:    --- Helpers
fn render<T: Template>(page: T) -> Result<Response, AppError> {
    Ok(Html(page.render()?).into_response())
}

/// 내비게이션 정보 (로그인 사용자는 읽지 않은 알림 수 포함)
async fn nav_for(state: &AppState, user: Option<&User>) -> Result<Nav, AppError> {
    match user {
        Some(user) => {
            let unread = query::count_unread_notifications(&state.db, user.id).await?;
            Ok(Nav::signed_in(&user.username, unread))
        }
        None => Ok(Nav::anonymous()),
    }
}

/// 로그인 처리 후 세션 쿠키와 함께 홈으로 이동
async fn sign_in(state: &AppState, jar: CookieJar, user: &User) -> Result<Response, AppError> {
    let token =
        SessionRepository::create(&state.db, user.id, state.config.session_expiry_hours).await?;
    info!("{:<12} --> 로그인: {}", "Handler", user.username);
    Ok((
        jar.add(session_cookie(token, state.config.cookie_secure)),
        Redirect::to("/"),
    )
        .into_response())
}
// endregion: --- Helpers

// region:    --- Account Handlers

/// 로그인 페이지
pub async fn login_form(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Response, AppError> {
    render(LoginTemplate {
        nav: nav_for(&state, user.as_ref()).await?,
        message: String::new(),
    })
}

/// 로그인
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 로그인 요청: {}", "Handler", form.username);
    let user = UserRepository::get_by_username(&state.db, form.username.trim()).await?;

    let verified = match &user {
        Some(user) => verify_password(&form.password, &user.password_hash)?,
        None => false,
    };
    match user {
        Some(user) if verified => sign_in(&state, jar, &user).await,
        _ => render(LoginTemplate {
            nav: Nav::anonymous(),
            message: "Invalid username and/or password.".to_string(),
        }),
    }
}

/// 로그아웃
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        SessionRepository::delete(&state.db, cookie.value()).await?;
    }
    Ok((jar.remove(removal_cookie()), Redirect::to("/")).into_response())
}

/// 회원가입 페이지
pub async fn register_form(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Response, AppError> {
    render(RegisterTemplate {
        nav: nav_for(&state, user.as_ref()).await?,
        message: String::new(),
        username: String::new(),
        email: String::new(),
    })
}

/// 회원가입
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let username = form.username.trim().to_string();
    let email = form.email.trim().to_string();
    info!("{:<12} --> 회원가입 요청: {}", "Handler", username);

    let rejected = |message: &str| {
        render(RegisterTemplate {
            nav: Nav::anonymous(),
            message: message.to_string(),
            username: username.clone(),
            email: email.clone(),
        })
    };

    if username.is_empty() || form.password.is_empty() {
        return rejected("Username and password are required.");
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return rejected(&format!(
            "Username must be at most {} characters.",
            MAX_USERNAME_CHARS
        ));
    }
    if email.chars().count() > MAX_EMAIL_CHARS {
        return rejected(&format!(
            "Email must be at most {} characters.",
            MAX_EMAIL_CHARS
        ));
    }
    if form.password != form.confirmation {
        return rejected("Passwords must match.");
    }

    let password_hash = hash_password(&form.password)?;
    match UserRepository::create(&state.db, &username, &email, &password_hash).await {
        Ok(user) => sign_in(&state, jar, &user).await,
        Err(AppError::Validation(message)) => rejected(&message),
        Err(e) => Err(e),
    }
}

// endregion: --- Account Handlers

// region:    --- Listing Handlers

/// 진행 중인 상품 목록 (페이지)
pub async fn index(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(params): Query<IndexParams>,
) -> Result<Response, AppError> {
    let page = Page::new(params.page, state.config.page_size);
    let listings = query::get_active_listings(&state.db, page).await?;
    let categories = query::get_all_categories(&state.db).await?;

    render(IndexTemplate {
        nav: nav_for(&state, user.as_ref()).await?,
        heading: "Active Listings".to_string(),
        pages: PageLinks::from(&listings),
        listings: listings.items,
        categories,
        selected_category: String::new(),
        show_pages: true,
    })
}

/// 카테고리 필터 (GET ?category=)
pub async fn display_category(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(params): Query<CategoryParams>,
) -> Result<Response, AppError> {
    show_category(&state, user.as_ref(), params.category).await
}

/// 카테고리 필터 (POST 폼)
pub async fn display_category_form(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Form(params): Form<CategoryParams>,
) -> Result<Response, AppError> {
    show_category(&state, user.as_ref(), params.category).await
}

async fn show_category(
    state: &AppState,
    user: Option<&User>,
    category: Option<String>,
) -> Result<Response, AppError> {
    let name = match category {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Ok(Redirect::to("/").into_response()),
    };
    info!("{:<12} --> 카테고리 필터: {}", "Handler", name);

    let category = query::find_category(&state.db, &name)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;
    let listings = query::get_active_listings_by_category(&state.db, category.id).await?;
    let categories = query::get_all_categories(&state.db).await?;

    render(IndexTemplate {
        nav: nav_for(state, user).await?,
        heading: format!("Active Listings in {}", category.name),
        listings,
        categories,
        selected_category: category.name,
        show_pages: false,
        pages: PageLinks::default(),
    })
}

/// 상품 등록 페이지
pub async fn create_listing_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    render(CreateListingTemplate {
        nav: nav_for(&state, Some(&user)).await?,
        categories: query::get_all_categories(&state.db).await?,
        form: NewListingForm::default(),
        message: String::new(),
    })
}

/// 상품 등록
pub async fn create_listing(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<NewListingForm>,
) -> Result<Response, AppError> {
    let result = match form.validate() {
        Ok(listing) => handle_create_listing(listing, user.id, &state.db).await,
        Err(message) => Err(AppError::Validation(message)),
    };

    match result {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(message)) => {
            info!("{:<12} --> 상품 등록 폼 오류: {}", "Handler", message);
            render(CreateListingTemplate {
                nav: nav_for(&state, Some(&user)).await?,
                categories: query::get_all_categories(&state.db).await?,
                form,
                message,
            })
        }
        Err(e) => Err(e),
    }
}

/// 상품 상세
pub async fn view_listing(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(listing_id): Path<i64>,
) -> Result<Response, AppError> {
    show_listing(&state, user.as_ref(), listing_id, None).await
}

/// 상품 상세 (안내 메시지 포함)
pub async fn view_listing_with_notice(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path((listing_id, notice)): Path<(i64, String)>,
) -> Result<Response, AppError> {
    let notice = ListingNotice::from_slug(&notice);
    show_listing(&state, user.as_ref(), listing_id, notice).await
}

async fn show_listing(
    state: &AppState,
    user: Option<&User>,
    listing_id: i64,
    notice: Option<ListingNotice>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 상품 상세 id: {}", "Handler", listing_id);
    let listing = query::get_listing(&state.db, listing_id).await?;
    let comments = query::get_listing_comments(&state.db, listing_id).await?;
    let bid_count = query::count_listing_bids(&state.db, listing_id).await?;

    let is_watching = match user {
        Some(user) => query::is_watching(&state.db, listing_id, user.id).await?,
        None => false,
    };
    let user_id = user.map(|user| user.id);

    render(ListingTemplate {
        nav: nav_for(state, user).await?,
        is_owner: user_id == Some(listing.owner_id),
        is_winner: user_id.is_some() && user_id == listing.winner_id,
        listing,
        comments,
        bid_count,
        is_watching,
        message: notice.map(|n| n.message().to_string()).unwrap_or_default(),
        message_ok: notice.map(|n| n.is_success()).unwrap_or(false),
    })
}

/// 댓글 작성
pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(listing_id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, AppError> {
    let notice = match handle_add_comment(listing_id, user.id, &form.new_comment, &state.db).await
    {
        Ok(_) => ListingNotice::CommentAdded,
        Err(AppError::Validation(_)) => ListingNotice::EmptyComment,
        Err(e) => return Err(e),
    };
    Ok(Redirect::to(&notice.listing_url(listing_id)))
}

/// 관심 목록 토글
pub async fn toggle_watchlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(listing_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let notice = if handle_toggle_watchlist(listing_id, user.id, &state.db).await? {
        ListingNotice::Watching
    } else {
        ListingNotice::Unwatched
    };
    Ok(Redirect::to(&notice.listing_url(listing_id)))
}

/// 관심 목록
pub async fn display_watchlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    render(WatchlistTemplate {
        nav: nav_for(&state, Some(&user)).await?,
        listings: query::get_watchlist(&state.db, user.id).await?,
    })
}

// endregion: --- Listing Handlers

// region:    --- Bidding Handlers

/// 입찰
pub async fn add_bid(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(listing_id): Path<i64>,
    Form(form): Form<BidForm>,
) -> Result<Redirect, AppError> {
    info!(
        "{:<12} --> 입찰 요청 listing: {}, amount: {}",
        "Handler", listing_id, form.new_bid
    );
    let amount = match rules::parse_amount(&form.new_bid) {
        Ok(amount) => amount,
        Err(rejection) => {
            info!("{:<12} --> 입찰 거절: {}", "Handler", rejection);
            return Ok(Redirect::to(
                &ListingNotice::from(&rejection).listing_url(listing_id),
            ));
        }
    };

    let cmd = PlaceBidCommand {
        listing_id,
        bidder_id: user.id,
        bidder_name: user.username,
        amount,
    };
    let notice = match handle_place_bid(cmd, &state.db).await {
        Ok(_) => ListingNotice::BidPlaced,
        Err(AppError::Bid(rejection)) => {
            info!("{:<12} --> 입찰 거절: {}", "Handler", rejection);
            ListingNotice::from(&rejection)
        }
        Err(e) => return Err(e),
    };
    Ok(Redirect::to(&notice.listing_url(listing_id)))
}

/// 경매 종료
pub async fn close_auction(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(listing_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let cmd = CloseAuctionCommand {
        listing_id,
        requested_by: user.id,
    };
    handle_close_auction(cmd, &state.db).await?;
    Ok(Redirect::to(
        &ListingNotice::AuctionClosed.listing_url(listing_id),
    ))
}

// endregion: --- Bidding Handlers

// region:    --- Notification Handlers

/// 알림 목록
pub async fn show_notifications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    render(NotificationsTemplate {
        nav: nav_for(&state, Some(&user)).await?,
        notifications: query::get_notifications(&state.db, user.id).await?,
    })
}

/// 알림 읽음 처리
pub async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(notification_id): Path<i64>,
) -> Result<Redirect, AppError> {
    notification::mark_read(&state.db, notification_id, user.id).await?;
    Ok(Redirect::to("/notifications/show"))
}

// endregion: --- Notification Handlers
