use anchor_lang::prelude::*;

use crate::payment::Receipt;
use crate::state::{Participant, Tier};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum TicketStatus {
    /// No draw exists yet, so every ticket stays here.
    PendingDraw,
}

/// Proof of one paid entry. Written once by `buy_ticket`, never mutated.
#[account]
#[derive(InitSpace)]
pub struct Ticket {
    pub bump: u8,
    pub user: Pubkey,
    pub wallet: Pubkey,

    /// Round this ticket entered.
    pub round: Pubkey,

    pub tier: Tier,

    /// Tier amount in USD.
    pub amount: u64,

    /// Token base units actually received by the treasury.
    pub token_amount: u64,

    /// Receipt id of the verified transfer.
    pub receipt: [u8; 32],

    pub created_at: i64,
    pub status: TicketStatus,
}

impl Ticket {
    pub fn record(
        bump: u8,
        round: Pubkey,
        tier: Tier,
        participant: &Participant,
        receipt: &Receipt,
    ) -> Self {
        Self {
            bump,
            user: participant.user,
            wallet: participant.wallet,
            round,
            tier,
            amount: participant.amount,
            token_amount: receipt.token_amount,
            receipt: receipt.id,
            created_at: participant.joined_at,
            status: TicketStatus::PendingDraw,
        }
    }

    /// A user's most recent tickets, newest first.
    pub fn recent_for_user<'a>(
        tickets: &'a [(Pubkey, Ticket)],
        user: &Pubkey,
        limit: usize,
    ) -> Vec<&'a (Pubkey, Ticket)> {
        let mut owned: Vec<_> = tickets
            .iter()
            .filter(|(_, ticket)| ticket.user == *user)
            .collect();
        owned.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at));
        owned.truncate(limit);
        owned
    }
}
