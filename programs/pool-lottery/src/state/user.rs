use anchor_lang::prelude::*;

use crate::constants::{REFERRAL_ALPHABET, REFERRAL_CODE_LEN};
use crate::error::ErrorCode;

#[account]
#[derive(InitSpace)]
pub struct UserAccount {
    pub bump: u8,
    pub wallet: Pubkey,

    /// Zero until the first registration.
    pub created_at: i64,

    pub referral_code: [u8; 6],
    pub tickets_purchased: u32,
}

impl UserAccount {
    pub fn is_registered(&self) -> bool {
        self.created_at != 0
    }

    /// Fills in the profile on first use. Later calls leave it untouched
    /// and return `false`.
    pub fn register(&mut self, wallet: Pubkey, bump: u8, now: i64, entropy: &[u8; 32]) -> bool {
        if self.is_registered() {
            return false;
        }

        self.bump = bump;
        self.wallet = wallet;
        self.created_at = now;
        self.referral_code = referral_code(entropy);
        self.tickets_purchased = 0;
        true
    }

    pub fn record_ticket(&mut self) -> Result<()> {
        self.tickets_purchased = self
            .tickets_purchased
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }
}

/// Maps the first bytes of `entropy` onto upper-case alphanumerics.
pub fn referral_code(entropy: &[u8; 32]) -> [u8; REFERRAL_CODE_LEN] {
    let mut code = [0u8; REFERRAL_CODE_LEN];
    for (slot, byte) in code.iter_mut().zip(entropy.iter()) {
        *slot = REFERRAL_ALPHABET[*byte as usize % REFERRAL_ALPHABET.len()];
    }
    code
}
