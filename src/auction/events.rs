use rust_decimal::Decimal;

/// 알림으로 기록되는 경매 이벤트
#[derive(Debug, Clone)]
pub enum AuctionEvent {
    // 입찰 이벤트 (판매자에게 알림)
    BidPlaced {
        listing_id: i64,
        listing_title: String,
        bidder: String,
        amount: Decimal,
    },
    // 낙찰 이벤트 (낙찰자에게 알림)
    AuctionWon {
        listing_id: i64,
        listing_title: String,
        price: Decimal,
    },
}

impl AuctionEvent {
    pub fn listing_id(&self) -> i64 {
        match self {
            AuctionEvent::BidPlaced { listing_id, .. } => *listing_id,
            AuctionEvent::AuctionWon { listing_id, .. } => *listing_id,
        }
    }

    /// 알림 메시지
    pub fn message(&self) -> String {
        match self {
            AuctionEvent::BidPlaced {
                listing_title,
                bidder,
                amount,
                ..
            } => format!("{} placed a bid of ${} on \"{}\".", bidder, amount, listing_title),
            AuctionEvent::AuctionWon {
                listing_title,
                price,
                ..
            } => format!(
                "Congratulations! You won the auction for \"{}\" at ${}.",
                listing_title, price
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn bid_placed_message_names_bidder_and_amount() {
        let event = AuctionEvent::BidPlaced {
            listing_id: 7,
            listing_title: "Laptop 1".to_string(),
            bidder: "user6".to_string(),
            amount: dec!(160.00),
        };
        assert_eq!(event.listing_id(), 7);
        assert_eq!(event.message(), "user6 placed a bid of $160.00 on \"Laptop 1\".");
    }

    #[test]
    fn auction_won_message_names_price() {
        let event = AuctionEvent::AuctionWon {
            listing_id: 3,
            listing_title: "Laptop 3".to_string(),
            price: dec!(250),
        };
        assert!(event.message().contains("won the auction for \"Laptop 3\" at $250"));
    }
}
