/// 경매 규칙
/// 1. 금액 파싱 (NUMERIC(10,2) 범위)
/// 2. 입찰 검증 (현재 가격 초과)
/// 3. 낙찰자 선정 (최고 입찰)
// region:    --- Imports
use super::model::Bid;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
// endregion: --- Imports

/// 입찰 거절 사유
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BidRejection {
    #[error("Bid must be a positive amount with at most two decimal places.")]
    InvalidAmount,

    #[error("Bid of {amount} must be higher than the current price of {current_price}.")]
    TooLow {
        amount: Decimal,
        current_price: Decimal,
    },

    #[error("This auction is no longer active.")]
    AuctionInactive,
}

// 10자리, 소수점 2자리 금액의 상한
fn max_amount() -> Decimal {
    Decimal::new(99_999_999_99, 2)
}

/// 폼 입력 금액 파싱
pub fn parse_amount(input: &str) -> Result<Decimal, BidRejection> {
    let amount = Decimal::from_str(input.trim())
        .map_err(|_| BidRejection::InvalidAmount)?
        .normalize();
    if amount <= Decimal::ZERO || amount.scale() > 2 || amount > max_amount() {
        return Err(BidRejection::InvalidAmount);
    }
    Ok(amount)
}

/// 다음 입찰 최소 금액: 현재 가격 + 1
pub fn min_next_bid(current_price: Decimal) -> Decimal {
    current_price + Decimal::ONE
}

/// 입찰 검증
pub fn validate_bid(
    active: bool,
    current_price: Decimal,
    amount: Decimal,
) -> Result<(), BidRejection> {
    if !active {
        return Err(BidRejection::AuctionInactive);
    }
    if amount <= current_price {
        return Err(BidRejection::TooLow {
            amount,
            current_price,
        });
    }
    Ok(())
}

/// 낙찰 입찰 선정
/// 최고 금액 우선, 동일 금액이면 먼저 들어온 입찰.
pub fn select_winner(bids: &[Bid]) -> Option<&Bid> {
    bids.iter().max_by(|a, b| {
        a.amount
            .cmp(&b.amount)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn bid(id: i64, bidder_id: i64, amount: Decimal, age_secs: i64) -> Bid {
        Bid {
            id,
            amount,
            bidder_id,
            listing_id: 1,
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[test]
    fn parse_amount_accepts_money() {
        assert_eq!(parse_amount("150"), Ok(dec!(150)));
        assert_eq!(parse_amount(" 99.5 "), Ok(dec!(99.5)));
        assert_eq!(parse_amount("10.50"), Ok(dec!(10.5)));
    }

    #[test]
    fn parse_amount_rejects_bad_input() {
        assert_eq!(parse_amount(""), Err(BidRejection::InvalidAmount));
        assert_eq!(parse_amount("abc"), Err(BidRejection::InvalidAmount));
        assert_eq!(parse_amount("0"), Err(BidRejection::InvalidAmount));
        assert_eq!(parse_amount("-5"), Err(BidRejection::InvalidAmount));
        assert_eq!(parse_amount("1.005"), Err(BidRejection::InvalidAmount));
        assert_eq!(parse_amount("100000000"), Err(BidRejection::InvalidAmount));
    }

    #[test]
    fn min_next_bid_is_one_above_current() {
        assert_eq!(min_next_bid(dec!(100.00)), dec!(101.00));
    }

    #[test]
    fn bid_equal_or_below_current_is_rejected() {
        assert_eq!(
            validate_bid(true, dec!(100), dec!(100)),
            Err(BidRejection::TooLow {
                amount: dec!(100),
                current_price: dec!(100)
            })
        );
        assert!(validate_bid(true, dec!(100), dec!(99.99)).is_err());
        assert!(validate_bid(true, dec!(100), dec!(100.01)).is_ok());
    }

    #[test]
    fn bid_on_inactive_listing_is_rejected() {
        assert_eq!(
            validate_bid(false, dec!(100), dec!(500)),
            Err(BidRejection::AuctionInactive)
        );
    }

    #[test]
    fn no_bids_means_no_winner() {
        assert!(select_winner(&[]).is_none());
    }

    #[test]
    fn highest_bid_wins() {
        let bids = vec![
            bid(1, 10, dec!(120), 30),
            bid(2, 11, dec!(180), 20),
            bid(3, 12, dec!(150), 10),
        ];
        assert_eq!(select_winner(&bids).map(|b| b.bidder_id), Some(11));
    }

    #[test]
    fn earliest_bid_wins_a_tie() {
        let bids = vec![bid(5, 21, dec!(200), 5), bid(4, 20, dec!(200), 50)];
        assert_eq!(select_winner(&bids).map(|b| b.bidder_id), Some(20));
    }
}
