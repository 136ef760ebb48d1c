use anchor_lang::prelude::*;

#[constant]
pub const CONFIG_SEED: &[u8] = b"config";
#[constant]
pub const TIER_SEED: &[u8] = b"tier";
#[constant]
pub const ROUND_SEED: &[u8] = b"round";
#[constant]
pub const TICKET_SEED: &[u8] = b"ticket";
#[constant]
pub const USER_SEED: &[u8] = b"user";

/// Participants needed before a round is resolved.
#[constant]
pub const FILL_THRESHOLD: u8 = 10;

/// Lifetime of a round in seconds (24h).
#[constant]
pub const ROUND_TTL: i64 = 86_400;

/// Prices are micro-USD: 1_000_000 == 1.00 USD.
#[constant]
pub const PRICE_SCALE: u64 = 1_000_000;

/// Price used whenever the feed can't be read.
#[constant]
pub const FALLBACK_PRICE: u64 = 1_000_000;

/// How often the feed is expected to be refreshed, in seconds.
#[constant]
pub const PRICE_REFRESH_INTERVAL: i64 = 300;

/// Switchboard feed values carry 18 decimals.
pub const FEED_DECIMALS: u32 = 18;

pub const REFERRAL_CODE_LEN: usize = 6;
pub const REFERRAL_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
