use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{RoundCompleted, TicketPurchased};
use crate::oracle;
use crate::payment;
use crate::state::*;

/// Accounts required to buy a ticket in a tier's active round.
/// Handles:
/// - Price quote
/// - Payment transfer and receipt check
/// - Ticket creation
/// - Round bookkeeping and completion
#[derive(Accounts)]
#[instruction(tier: Tier)]
pub struct BuyTicket<'info> {
    /// The account paying for the ticket.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Lottery configuration holding the payment routing.
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, LotteryConfig>>,

    /// Buyer profile; must be registered before the first purchase.
    /// CHECK: Loaded in the handler so a missing profile reports
    /// `UserNotRegistered` instead of a generic account error.
    #[account(
        mut,
        seeds = [USER_SEED, buyer.key().as_ref()],
        bump,
    )]
    pub user_account: UncheckedAccount<'info>,

    /// Allocator of the tier being entered.
    #[account(
        mut,
        seeds = [TIER_SEED, tier.seed().as_ref()],
        bump = tier_state.bump,
    )]
    pub tier_state: Box<Account<'info, TierState>>,

    /// The round being entered; must hold the tier's active slot.
    #[account(
        mut,
        seeds = [ROUND_SEED, tier.seed().as_ref(), round.index.to_le_bytes().as_ref()],
        bump = round.bump,
        constraint = tier_state.active_round == Some(round.key()) @ ErrorCode::RoundNotActive,
    )]
    pub round: Box<Account<'info, Round>>,

    /// One ticket per participant slot of the round.
    #[account(
        init,
        payer = buyer,
        space = 8 + Ticket::INIT_SPACE,
        seeds = [
            TICKET_SEED,
            round.key().as_ref(),
            round.participant_count().to_le_bytes().as_ref()
        ],
        bump
    )]
    pub ticket: Box<Account<'info, Ticket>>,

    /// Mint of the payment token.
    #[account(
        constraint = payment_mint.key() == config.payment_mint @ ErrorCode::InvalidPaymentMint,
    )]
    pub payment_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Buyer's token account the payment is drawn from.
    #[account(
        mut,
        token::mint = payment_mint,
        token::authority = buyer,
        token::token_program = token_program,
    )]
    pub buyer_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Fixed recipient of the payment.
    #[account(
        mut,
        constraint = treasury.key() == config.treasury @ ErrorCode::InvalidTreasury,
    )]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Only the address is checked here; the oracle parses the data
    /// and falls back to a fixed price if it can't.
    #[account(
        constraint = price_feed.key() == config.price_feed @ ErrorCode::InvalidPriceFeed,
    )]
    pub price_feed: UncheckedAccount<'info>,

    /// Token program interface
    pub token_program: Interface<'info, TokenInterface>,

    /// System program for the ticket account
    pub system_program: Program<'info, System>,
}

/// Buys a ticket for the caller.
///
/// Steps performed:
/// 1. Quote the token price and size the payment for the tier.
/// 2. Transfer the tokens to the treasury and verify the receipt.
/// 3. Record the ticket.
/// 4. Append the participant to the round.
/// 5. Complete the round if it just filled up.
///
/// Every step runs in the same transaction, so a failure after the transfer
/// reverts the transfer as well.
pub fn process_buy_ticket(ctx: Context<BuyTicket>, tier: Tier) -> Result<()> {
    let clock = Clock::get()?;
    let round_key = ctx.accounts.round.key();
    let buyer_key = ctx.accounts.buyer.key();

    let user_info = ctx.accounts.user_account.to_account_info();
    require!(
        user_info.owner == &crate::ID && !user_info.data_is_empty(),
        ErrorCode::UserNotRegistered
    );
    let mut user_account = {
        let data = user_info.try_borrow_data()?;
        UserAccount::try_deserialize(&mut &data[..])?
    };
    require!(user_account.is_registered(), ErrorCode::UserNotRegistered);

    require!(ctx.accounts.round.is_active(), ErrorCode::RoundNotActive);
    require!(!ctx.accounts.round.is_full(), ErrorCode::RoundFull);

    let quote = oracle::get_price(&ctx.accounts.price_feed.to_account_info(), clock.unix_timestamp);
    let token_amount = payment::token_amount_for_usd(
        tier.amount_usd(),
        quote.price,
        ctx.accounts.payment_mint.decimals,
    )?;
    msg!(
        "{} USD = {} base units at {} micro-USD ({:?})",
        tier.amount_usd(),
        token_amount,
        quote.price,
        quote.source
    );

    let index = ctx.accounts.round.participant_count();
    let receipt = payment::pay(
        &ctx.accounts.buyer_token_account,
        &mut ctx.accounts.treasury,
        &ctx.accounts.payment_mint,
        &ctx.accounts.buyer,
        &ctx.accounts.token_program,
        token_amount,
        &round_key,
        index,
    )?;

    let participant = Participant {
        user: buyer_key,
        wallet: buyer_key,
        amount: tier.amount_usd(),
        joined_at: clock.unix_timestamp,
    };
    ctx.accounts.ticket.set_inner(Ticket::record(
        ctx.bumps.ticket,
        round_key,
        tier,
        &participant,
        &receipt,
    ));

    let round = &mut ctx.accounts.round;
    round.record_participation(participant)?;
    user_account.record_ticket()?;
    {
        let mut data = user_info.try_borrow_mut_data()?;
        user_account.try_serialize(&mut &mut data[..])?;
    }

    emit!(TicketPurchased {
        round: round_key,
        ticket: ctx.accounts.ticket.key(),
        buyer: buyer_key,
        tier,
        token_amount,
        price: quote.price,
        participants: round.participant_count(),
        receipt: receipt.id,
    });

    if round.check_fill_and_transition(clock.unix_timestamp) {
        ctx.accounts.tier_state.release(round_key);

        msg!("Round {} filled, lottery closed", round.index);
        emit!(RoundCompleted {
            round: round_key,
            tier,
            participants: round.participant_count(),
            total_amount: round.total_amount,
            completed_at: clock.unix_timestamp,
        });
    }

    Ok(())
}
