use anchor_lang::prelude::*;

use crate::constants::{FILL_THRESHOLD, ROUND_TTL};
use crate::error::ErrorCode;
use crate::state::Tier;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RoundStatus {
    Active,
    Completed,
}

/// One paid entry in a round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct Participant {
    /// Signer that bought the ticket.
    pub user: Pubkey,

    /// Wallet address that paid.
    pub wallet: Pubkey,

    /// Tier amount in USD.
    pub amount: u64,

    pub joined_at: i64,
}

#[account]
#[derive(InitSpace)]
pub struct Round {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    pub tier: Tier,

    /// Position of this round in its tier's sequence, part of the PDA seeds.
    pub index: u64,

    pub status: RoundStatus,

    /// Entries in join order.
    #[max_len(10)]
    pub participants: Vec<Participant>,

    /// Sum of `participants[].amount`. Only `record_participation` writes it.
    pub total_amount: u64,

    pub created_at: i64,

    /// `created_at + ROUND_TTL`. Recorded for clients, nothing enforces it.
    pub expires_at: i64,

    /// Set once, on the transition to `Completed`.
    pub completed_at: Option<i64>,
}

impl Round {
    pub fn new(tier: Tier, index: u64, bump: u8, now: i64) -> Self {
        Self {
            bump,
            tier,
            index,
            status: RoundStatus::Active,
            participants: Vec::with_capacity(FILL_THRESHOLD as usize),
            total_amount: 0,
            created_at: now,
            expires_at: now.saturating_add(ROUND_TTL),
            completed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    pub fn participant_count(&self) -> u8 {
        self.participants.len() as u8
    }

    pub fn is_full(&self) -> bool {
        self.participant_count() >= FILL_THRESHOLD
    }

    /// Appends `participant` and folds its amount into `total_amount`.
    ///
    /// The caller holds the write lock on the round account for the whole
    /// transaction, so the read-append-write below cannot interleave with
    /// another purchase.
    pub fn record_participation(&mut self, participant: Participant) -> Result<()> {
        require!(self.is_active(), ErrorCode::RoundNotActive);
        require!(!self.is_full(), ErrorCode::RoundFull);
        require!(participant.amount == self.tier.amount_usd(), ErrorCode::TierMismatch);

        self.total_amount = self
            .total_amount
            .checked_add(participant.amount)
            .ok_or(ErrorCode::Overflow)?;
        self.participants.push(participant);

        Ok(())
    }

    /// Completes the round once the fill threshold is reached.
    /// Returns `true` only on the call that performs the transition.
    ///
    /// No winner is drawn here; completion only closes the round.
    pub fn check_fill_and_transition(&mut self, now: i64) -> bool {
        if !self.is_active() || !self.is_full() {
            return false;
        }

        self.status = RoundStatus::Completed;
        self.completed_at = Some(now);
        true
    }

    /// Off-chain equivalent of "active rounds for `tier`, newest first, limit 1"
    /// over accounts fetched with `getProgramAccounts`.
    pub fn latest_active(rounds: &[(Pubkey, Round)], tier: Tier) -> Option<&(Pubkey, Round)> {
        rounds
            .iter()
            .filter(|(_, round)| round.is_active() && round.tier == tier)
            .max_by_key(|(_, round)| (round.created_at, round.index))
    }
}
