use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::RoundOpened;
use crate::state::*;

/// Accounts required to look up a tier's active round.
///
/// The round address is derived from the tier state: the active round's
/// index while one is open, otherwise the next free index. Concurrent
/// callers therefore all land on the same account, and `init_if_needed`
/// creates it only for the first of them.
#[derive(Accounts)]
#[instruction(tier: Tier)]
pub struct GetActiveRound<'info> {
    /// Pays rent if a new round has to be opened.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Allocator holding the tier's active slot.
    #[account(
        mut,
        seeds = [TIER_SEED, tier.seed().as_ref()],
        bump = tier_state.bump,
    )]
    pub tier_state: Box<Account<'info, TierState>>,

    /// The active round, created here if the tier has none.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Round::INIT_SPACE,
        seeds = [
            ROUND_SEED,
            tier.seed().as_ref(),
            tier_state.next_round_index().to_le_bytes().as_ref()
        ],
        bump
    )]
    pub round: Box<Account<'info, Round>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Accounts required to open a new round explicitly.
#[derive(Accounts)]
#[instruction(tier: Tier)]
pub struct CreateRound<'info> {
    /// Pays rent for the new round.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Allocator of the tier; must not have an active round.
    #[account(
        mut,
        seeds = [TIER_SEED, tier.seed().as_ref()],
        bump = tier_state.bump,
        constraint = tier_state.active_round.is_none() @ ErrorCode::RoundAlreadyActive,
    )]
    pub tier_state: Box<Account<'info, TierState>>,

    /// The new round, at the tier's next free index.
    #[account(
        init,
        payer = payer,
        space = 8 + Round::INIT_SPACE,
        seeds = [
            ROUND_SEED,
            tier.seed().as_ref(),
            tier_state.rounds_opened.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub round: Box<Account<'info, Round>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Returns the address of the tier's active round, opening a fresh one
/// when the tier has none. The returned round is always active.
pub fn process_get_active_round(ctx: Context<GetActiveRound>, tier: Tier) -> Result<Pubkey> {
    let round_key = ctx.accounts.round.key();

    if ctx.accounts.tier_state.active_round == Some(round_key) {
        require!(ctx.accounts.round.is_active(), ErrorCode::RoundNotActive);
        return Ok(round_key);
    }

    open_round(
        &mut ctx.accounts.tier_state,
        &mut ctx.accounts.round,
        tier,
        ctx.bumps.round,
    )?;

    Ok(round_key)
}

/// Opens a new active round for `tier`. Fails if the tier already has one.
pub fn process_create_round(ctx: Context<CreateRound>, tier: Tier) -> Result<()> {
    open_round(
        &mut ctx.accounts.tier_state,
        &mut ctx.accounts.round,
        tier,
        ctx.bumps.round,
    )
}

fn open_round(
    tier_state: &mut Account<TierState>,
    round: &mut Account<Round>,
    tier: Tier,
    bump: u8,
) -> Result<()> {
    require!(tier_state.tier == tier, ErrorCode::TierMismatch);

    let now = Clock::get()?.unix_timestamp;
    let round_key = round.key();
    let index = tier_state.activate(round_key)?;
    round.set_inner(Round::new(tier, index, bump, now));

    msg!("Opened round {} for tier {} USD", index, tier.amount_usd());
    emit!(RoundOpened {
        round: round_key,
        tier,
        index,
        expires_at: round.expires_at,
    });

    Ok(())
}
