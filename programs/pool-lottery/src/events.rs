use anchor_lang::prelude::*;

use crate::state::Tier;

#[event]
pub struct RoundOpened {
    pub round: Pubkey,
    pub tier: Tier,
    pub index: u64,
    pub expires_at: i64,
}

#[event]
pub struct TicketPurchased {
    pub round: Pubkey,
    pub ticket: Pubkey,
    pub buyer: Pubkey,
    pub tier: Tier,
    pub token_amount: u64,
    pub price: u64,
    pub participants: u8,
    pub receipt: [u8; 32],
}

#[event]
pub struct RoundCompleted {
    pub round: Pubkey,
    pub tier: Tier,
    pub participants: u8,
    pub total_amount: u64,
    pub completed_at: i64,
}
