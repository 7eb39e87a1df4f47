/// 입찰 관련 커맨드 처리
/// 1. 입찰
/// 2. 경매 종료 (낙찰)
// region:    --- Imports
use crate::auction::events::AuctionEvent;
use crate::auction::model::Bid;
use crate::auction::rules;
use crate::database::DatabaseManager;
use crate::error::AppError;
use crate::notification;
use crate::query::queries;
use rust_decimal::Decimal;
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Clone)]
pub struct PlaceBidCommand {
    pub listing_id: i64,
    pub bidder_id: i64,
    pub bidder_name: String,
    pub amount: Decimal,
}

/// 경매 종료 명령
#[derive(Debug, Clone)]
pub struct CloseAuctionCommand {
    pub listing_id: i64,
    pub requested_by: i64,
}

/// 경매 종료 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed {
        winner_id: Option<i64>,
        final_price: Decimal,
    },
    AlreadyClosed,
}

// 검증에 필요한 상품 상태
#[derive(sqlx::FromRow)]
struct ListingState {
    title: String,
    current_price: Decimal,
    active: bool,
    owner_id: i64,
}

const GET_LISTING_STATE: &str =
    "SELECT title, current_price, active, owner_id FROM listings WHERE id = $1";

/// 1. 입찰
/// 현재 가격 갱신에 잠금을 걸지 않으므로 동시 입찰은 마지막 쓰기가 남는다.
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    db_manager: &DatabaseManager,
) -> Result<Bid, AppError> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let state = sqlx::query_as::<_, ListingState>(GET_LISTING_STATE)
                    .bind(cmd.listing_id)
                    .fetch_one(&mut **tx)
                    .await?;

                // 입찰 금액이 현재 가격보다 높은지 검증
                rules::validate_bid(state.active, state.current_price, cmd.amount)?;

                let bid = sqlx::query_as::<_, Bid>(
                    "INSERT INTO bids (amount, bidder_id, listing_id) VALUES ($1, $2, $3)
                     RETURNING id, amount, bidder_id, listing_id, created_at",
                )
                .bind(cmd.amount)
                .bind(cmd.bidder_id)
                .bind(cmd.listing_id)
                .fetch_one(&mut **tx)
                .await?;

                sqlx::query("UPDATE listings SET current_price = $1 WHERE id = $2")
                    .bind(cmd.amount)
                    .bind(cmd.listing_id)
                    .execute(&mut **tx)
                    .await?;

                // 판매자에게 알림
                let event = AuctionEvent::BidPlaced {
                    listing_id: cmd.listing_id,
                    listing_title: state.title,
                    bidder: cmd.bidder_name,
                    amount: cmd.amount,
                };
                notification::record(&mut **tx, state.owner_id, &event).await?;

                info!(
                    "{:<12} --> 입찰 성공: 현재 가격 {}",
                    "Command", bid.amount
                );
                Ok::<_, AppError>(bid)
            })
        })
        .await
}

/// 2. 경매 종료
/// 최고 입찰자를 낙찰자로 지정하고 알림을 남긴다. 입찰이 없으면 낙찰자 없음.
pub async fn handle_close_auction(
    cmd: CloseAuctionCommand,
    db_manager: &DatabaseManager,
) -> Result<CloseOutcome, AppError> {
    info!("{:<12} --> 경매 종료 요청 처리 시작: {:?}", "Command", cmd);

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let state = sqlx::query_as::<_, ListingState>(GET_LISTING_STATE)
                    .bind(cmd.listing_id)
                    .fetch_one(&mut **tx)
                    .await?;

                if state.owner_id != cmd.requested_by {
                    return Err(AppError::Forbidden(
                        "Only the owner can close this auction.".to_string(),
                    ));
                }
                if !state.active {
                    info!("{:<12} --> 이미 종료된 경매입니다.", "Command");
                    return Ok(CloseOutcome::AlreadyClosed);
                }

                let bids = sqlx::query_as::<_, Bid>(queries::GET_LISTING_BIDS)
                    .bind(cmd.listing_id)
                    .fetch_all(&mut **tx)
                    .await?;
                let winner = rules::select_winner(&bids);
                let winner_id = winner.map(|bid| bid.bidder_id);

                sqlx::query("UPDATE listings SET active = FALSE, winner_id = $2 WHERE id = $1")
                    .bind(cmd.listing_id)
                    .bind(winner_id)
                    .execute(&mut **tx)
                    .await?;

                let final_price = match winner {
                    Some(bid) => {
                        // 낙찰자에게 알림
                        let event = AuctionEvent::AuctionWon {
                            listing_id: cmd.listing_id,
                            listing_title: state.title,
                            price: bid.amount,
                        };
                        notification::record(&mut **tx, bid.bidder_id, &event).await?;
                        bid.amount
                    }
                    None => state.current_price,
                };

                info!(
                    "{:<12} --> 경매 종료: 낙찰자 {:?}, 최종 가격 {}",
                    "Command", winner_id, final_price
                );
                Ok::<_, AppError>(CloseOutcome::Closed {
                    winner_id,
                    final_price,
                })
            })
        })
        .await
}

// endregion: --- Commands
