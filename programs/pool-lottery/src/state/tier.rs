use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// Ticket price levels, denominated in whole USD.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum Tier {
    Two,
    Ten,
}

impl Tier {
    pub fn id(self) -> u8 {
        match self {
            Tier::Two => 1,
            Tier::Ten => 2,
        }
    }

    pub fn amount_usd(self) -> u64 {
        match self {
            Tier::Two => 2,
            Tier::Ten => 10,
        }
    }

    /// PDA seed component for accounts scoped to this tier.
    pub fn seed(self) -> [u8; 1] {
        [self.id()]
    }
}

/// Per-tier round allocator. Owning the `active_round` slot here is what
/// keeps a tier down to a single active round.
#[account]
#[derive(InitSpace)]
pub struct TierState {
    pub bump: u8,
    pub tier: Tier,

    /// Rounds ever opened for this tier; the next round gets this index.
    pub rounds_opened: u64,

    /// Address of the round currently accepting participants.
    pub active_round: Option<Pubkey>,
}

impl TierState {
    pub fn new(tier: Tier, bump: u8) -> Self {
        Self {
            bump,
            tier,
            rounds_opened: 0,
            active_round: None,
        }
    }

    /// Index of the active round, or the index the next round will be opened at.
    pub fn next_round_index(&self) -> u64 {
        match self.active_round {
            Some(_) => self.rounds_opened.saturating_sub(1),
            None => self.rounds_opened,
        }
    }

    /// Claims the active slot for `round` and hands back its index.
    pub fn activate(&mut self, round: Pubkey) -> Result<u64> {
        require!(self.active_round.is_none(), ErrorCode::RoundAlreadyActive);

        let index = self.rounds_opened;
        self.rounds_opened = self
            .rounds_opened
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        self.active_round = Some(round);

        Ok(index)
    }

    /// Frees the active slot if `round` holds it.
    pub fn release(&mut self, round: Pubkey) -> bool {
        if self.active_round == Some(round) {
            self.active_round = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_have_distinct_seeds() {
        assert_ne!(Tier::Two.seed(), Tier::Ten.seed());
        assert_eq!(Tier::Two.amount_usd(), 2);
        assert_eq!(Tier::Ten.amount_usd(), 10);
    }

    #[test]
    fn activate_hands_out_sequential_indexes() {
        let mut state = TierState::new(Tier::Two, 255);
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        assert_eq!(state.next_round_index(), 0);
        assert_eq!(state.activate(first).unwrap(), 0);
        assert_eq!(state.next_round_index(), 0);

        assert!(state.release(first));
        assert_eq!(state.next_round_index(), 1);
        assert_eq!(state.activate(second).unwrap(), 1);
        assert_eq!(state.active_round, Some(second));
    }

    #[test]
    fn second_activation_is_rejected() {
        let mut state = TierState::new(Tier::Ten, 255);
        state.activate(Pubkey::new_unique()).unwrap();

        assert!(state.activate(Pubkey::new_unique()).is_err());
        assert_eq!(state.rounds_opened, 1);
    }

    #[test]
    fn release_ignores_other_rounds() {
        let mut state = TierState::new(Tier::Two, 255);
        let active = Pubkey::new_unique();
        state.activate(active).unwrap();

        assert!(!state.release(Pubkey::new_unique()));
        assert_eq!(state.active_round, Some(active));
    }
}
