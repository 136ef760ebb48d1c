use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};
use solana_program::hash::hashv;

use crate::constants::PRICE_SCALE;
use crate::error::ErrorCode;

/// Proof that the treasury received a ticket payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub id: [u8; 32],
    pub token_amount: u64,
}

/// Token base units worth `amount_usd` at `price` micro-USD per token.
pub fn token_amount_for_usd(amount_usd: u64, price: u64, decimals: u8) -> Result<u64> {
    require!(price > 0, ErrorCode::InvalidPrice);

    let units = 10u128
        .checked_pow(decimals as u32)
        .ok_or(ErrorCode::Overflow)?;
    let numerator = (amount_usd as u128)
        .checked_mul(units)
        .and_then(|v| v.checked_mul(PRICE_SCALE as u128))
        .ok_or(ErrorCode::Overflow)?;
    let amount = u64::try_from(numerator / price as u128).map_err(|_| ErrorCode::Overflow)?;

    require!(amount > 0, ErrorCode::ZeroPayment);
    Ok(amount)
}

pub fn receipt_id(round: &Pubkey, buyer: &Pubkey, index: u8, slot: u64, token_amount: u64) -> [u8; 32] {
    hashv(&[
        round.as_ref(),
        buyer.as_ref(),
        &[index],
        &slot.to_le_bytes(),
        &token_amount.to_le_bytes(),
    ])
    .to_bytes()
}

/// Moves `token_amount` from the buyer to the treasury and checks that the
/// treasury balance grew by exactly that much before issuing a receipt.
#[allow(clippy::too_many_arguments)]
pub fn pay<'info>(
    from: &InterfaceAccount<'info, TokenAccount>,
    treasury: &mut InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    authority: &Signer<'info>,
    token_program: &Interface<'info, TokenInterface>,
    token_amount: u64,
    round: &Pubkey,
    index: u8,
) -> Result<Receipt> {
    require!(from.amount >= token_amount, ErrorCode::InsufficientTokenBalance);

    let before = treasury.amount;

    transfer_checked(
        CpiContext::new(
            token_program.to_account_info(),
            TransferChecked {
                from: from.to_account_info(),
                mint: mint.to_account_info(),
                to: treasury.to_account_info(),
                authority: authority.to_account_info(),
            },
        ),
        token_amount,
        mint.decimals,
    )?;

    treasury.reload()?;
    let received = treasury
        .amount
        .checked_sub(before)
        .ok_or(ErrorCode::PaymentNotReceived)?;
    require_eq!(received, token_amount, ErrorCode::PaymentNotReceived);

    let slot = Clock::get()?.slot;
    Ok(Receipt {
        id: receipt_id(round, &authority.key(), index, slot, token_amount),
        token_amount,
    })
}
