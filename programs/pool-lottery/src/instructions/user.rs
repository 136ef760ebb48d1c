use anchor_lang::prelude::*;
use solana_program::hash::hashv;

use crate::constants::*;
use crate::state::*;

/// Accounts required to register (or re-register) a buyer profile.
#[derive(Accounts)]
pub struct RegisterUser<'info> {
    /// Wallet being registered; pays for the profile.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Profile account, created on the first call.
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + UserAccount::INIT_SPACE,
        seeds = [USER_SEED, authority.key().as_ref()],
        bump
    )]
    pub user_account: Account<'info, UserAccount>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Registers the signer's wallet. Calling it again is a no-op, so clients
/// can run it on every wallet connection.
pub fn process_register_user(ctx: Context<RegisterUser>) -> Result<()> {
    let clock = Clock::get()?;
    let wallet = ctx.accounts.authority.key();
    let entropy = hashv(&[wallet.as_ref(), &clock.slot.to_le_bytes()]).to_bytes();

    let user = &mut ctx.accounts.user_account;
    if user.register(wallet, ctx.bumps.user_account, clock.unix_timestamp, &entropy) {
        msg!(
            "Registered {} with referral code {}",
            wallet,
            String::from_utf8_lossy(&user.referral_code)
        );
    } else {
        msg!("{} already registered", wallet);
    }

    Ok(())
}
