use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::state::*;

/// Accounts required to initialize the lottery configuration.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// The account paying for account creation; becomes the authority.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The configuration account created here.
    #[account(
        init,
        payer = payer,
        space = 8 + LotteryConfig::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    /// Token tickets are paid in.
    #[account(mint::token_program = token_program)]
    pub payment_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Fixed recipient of every ticket payment.
    #[account(
        constraint = treasury.mint == payment_mint.key() @ ErrorCode::InvalidPaymentMint,
    )]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program owning the payment mint.
    pub token_program: Interface<'info, TokenInterface>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Accounts required to reroute payments or swap the price feed.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Current lottery authority.
    pub authority: Signer<'info>,

    /// Configuration being updated.
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    /// New recipient of ticket payments; must hold the payment mint.
    #[account(
        constraint = treasury.mint == config.payment_mint @ ErrorCode::InvalidPaymentMint,
    )]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,
}

/// Accounts required to open a tier for business.
#[derive(Accounts)]
#[instruction(tier: Tier)]
pub struct InitializeTier<'info> {
    /// Lottery authority; pays for the tier account.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Configuration naming the authority.
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    /// Allocator created for the tier.
    #[account(
        init,
        payer = authority,
        space = 8 + TierState::INIT_SPACE,
        seeds = [TIER_SEED, tier.seed().as_ref()],
        bump
    )]
    pub tier_state: Account<'info, TierState>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Stores the payment routing and price feed, and makes the signer the
/// lottery authority.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeConfig accounts
/// * `price_feed` - Switchboard pull feed quoting the payment token in USD
pub fn process_initialize_config(ctx: Context<InitializeConfig>, price_feed: Pubkey) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.bump = ctx.bumps.config;
    config.authority = ctx.accounts.payer.key();
    config.payment_mint = ctx.accounts.payment_mint.key();
    config.treasury = ctx.accounts.treasury.key();
    config.price_feed = price_feed;

    msg!("Lottery configured, treasury {}", config.treasury);
    Ok(())
}

pub fn process_update_config(ctx: Context<UpdateConfig>, price_feed: Pubkey) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.treasury = ctx.accounts.treasury.key();
    config.price_feed = price_feed;

    msg!("Treasury: {}", config.treasury);
    msg!("Price feed: {}", config.price_feed);
    Ok(())
}

pub fn process_initialize_tier(ctx: Context<InitializeTier>, tier: Tier) -> Result<()> {
    ctx.accounts
        .tier_state
        .set_inner(TierState::new(tier, ctx.bumps.tier_state));

    msg!("Tier {} USD ready", tier.amount_usd());
    Ok(())
}
