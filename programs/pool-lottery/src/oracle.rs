//! USD price of the payment token, read from a Switchboard pull feed.
//!
//! Reading the feed never fails the caller: any problem with the account
//! yields the fixed fallback price and a logged warning.

use std::cell::Ref;

use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::PullFeedAccountData;

use crate::constants::{FALLBACK_PRICE, FEED_DECIMALS, PRICE_REFRESH_INTERVAL, PRICE_SCALE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceSource {
    Feed,
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceQuote {
    /// Micro-USD per whole token.
    pub price: u64,
    pub published_at: i64,
    pub source: PriceSource,
}

impl PriceQuote {
    pub fn fallback() -> Self {
        Self {
            price: FALLBACK_PRICE,
            published_at: 0,
            source: PriceSource::Fallback,
        }
    }

    pub fn age(&self, now: i64) -> i64 {
        now.saturating_sub(self.published_at)
    }

    /// Older than one refresh interval. Stale quotes are still used.
    pub fn is_stale(&self, now: i64) -> bool {
        self.source == PriceSource::Feed && self.age(now) > PRICE_REFRESH_INTERVAL
    }
}

pub fn get_price(feed: &AccountInfo, now: i64) -> PriceQuote {
    match feed.try_borrow_data() {
        Ok(data) => quote_from_feed_data(data, now),
        Err(err) => {
            msg!("Warning: price feed unreadable ({:?}), using fallback price", err);
            PriceQuote::fallback()
        }
    }
}

pub fn quote_from_feed_data(data: Ref<&mut [u8]>, now: i64) -> PriceQuote {
    let feed = match PullFeedAccountData::parse(data) {
        Ok(feed) => feed,
        Err(_) => {
            msg!("Warning: price feed data is malformed, using fallback price");
            return PriceQuote::fallback();
        }
    };

    let Some(price) = scale_feed_value(feed.result.value) else {
        msg!("Warning: price feed value {} is unusable, using fallback price", feed.result.value);
        return PriceQuote::fallback();
    };

    let quote = PriceQuote {
        price,
        published_at: feed.last_update_timestamp,
        source: PriceSource::Feed,
    };
    if quote.is_stale(now) {
        msg!("Warning: price is {}s old", quote.age(now));
    }

    quote
}

/// Converts an 18-decimal feed value into micro-USD.
pub fn scale_feed_value(value: i128) -> Option<u64> {
    if value <= 0 {
        return None;
    }

    let divisor = 10i128.pow(FEED_DECIMALS) / PRICE_SCALE as i128;
    let price = u64::try_from(value / divisor).ok()?;

    (price > 0).then_some(price)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn malformed_feed_falls_back_to_one_dollar() {
        let mut raw = vec![7u8; 64];
        let cell = RefCell::new(&mut raw[..]);

        let quote = quote_from_feed_data(cell.borrow(), NOW);

        assert_eq!(quote, PriceQuote::fallback());
        assert_eq!(quote.price, 1_000_000);
    }

    #[test]
    fn empty_feed_falls_back() {
        let mut raw: Vec<u8> = Vec::new();
        let cell = RefCell::new(&mut raw[..]);

        assert_eq!(quote_from_feed_data(cell.borrow(), NOW).source, PriceSource::Fallback);
    }

    #[test]
    fn scales_eighteen_decimals_to_micro_usd() {
        // 45.5 USD
        assert_eq!(scale_feed_value(45_500_000_000_000_000_000), Some(45_500_000));
        assert_eq!(scale_feed_value(0), None);
        assert_eq!(scale_feed_value(-1), None);
        // below one micro-dollar
        assert_eq!(scale_feed_value(999_999_999_999), None);
        assert_eq!(scale_feed_value(i128::MAX), None);
    }

    #[test]
    fn staleness_is_reported_not_enforced() {
        let quote = PriceQuote {
            price: 2_000_000,
            published_at: NOW - 301,
            source: PriceSource::Feed,
        };

        assert!(quote.is_stale(NOW));
        assert!(!PriceQuote::fallback().is_stale(NOW));
        assert_eq!(quote.age(NOW), 301);
    }
}
