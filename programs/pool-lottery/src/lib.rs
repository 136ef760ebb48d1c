#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod oracle;
pub mod payment;
pub mod state;

pub use instructions::*;
pub use state::Tier;

declare_id!("4pQdLw6d5ZzG3y3Rm7Kc5JtXH6kq1mYb9Yk2VQo8Lt2P");

#[program]
pub mod pool_lottery {
    use super::*;

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        price_feed: Pubkey,
    ) -> Result<()> {
        process_initialize_config(ctx, price_feed)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, price_feed: Pubkey) -> Result<()> {
        process_update_config(ctx, price_feed)
    }

    pub fn initialize_tier(ctx: Context<InitializeTier>, tier: Tier) -> Result<()> {
        process_initialize_tier(ctx, tier)
    }

    pub fn register_user(ctx: Context<RegisterUser>) -> Result<()> {
        process_register_user(ctx)
    }

    /// Returns the tier's active round, opening one if the tier has none.
    pub fn get_active_round(ctx: Context<GetActiveRound>, tier: Tier) -> Result<Pubkey> {
        process_get_active_round(ctx, tier)
    }

    pub fn create_round(ctx: Context<CreateRound>, tier: Tier) -> Result<()> {
        process_create_round(ctx, tier)
    }

    pub fn buy_ticket(ctx: Context<BuyTicket>, tier: Tier) -> Result<()> {
        process_buy_ticket(ctx, tier)
    }
}
