use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct LotteryConfig {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Admin allowed to open tiers and change the payment routing.
    pub authority: Pubkey,

    /// Token every ticket is paid in.
    pub payment_mint: Pubkey,

    /// Fixed recipient token account for all ticket payments.
    pub treasury: Pubkey,

    /// Switchboard pull feed quoting the payment token in USD.
    pub price_feed: Pubkey,
}
