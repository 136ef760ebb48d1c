use anchor_lang::prelude::*;
use pool_lottery::constants::{FILL_THRESHOLD, ROUND_SEED, TICKET_SEED};
use pool_lottery::oracle::{get_price, PriceSource};
use pool_lottery::payment::{token_amount_for_usd, Receipt};
use pool_lottery::state::{Participant, Round, RoundStatus, Ticket, Tier, TierState};

#[cfg(test)]
mod tests {
    use super::*;

    // Fixed timestamp for deterministic tests
    const NOW: i64 = 1_700_000_000;

    fn round_address(tier: Tier, index: u64) -> Pubkey {
        Pubkey::find_program_address(
            &[ROUND_SEED, tier.seed().as_ref(), index.to_le_bytes().as_ref()],
            &pool_lottery::ID,
        )
        .0
    }

    /// Runs one purchase through the same state transitions `buy_ticket` applies.
    fn purchase(tier_state: &mut TierState, round_key: Pubkey, round: &mut Round, at: i64) -> Ticket {
        let buyer = Pubkey::new_unique();
        let participant = Participant {
            user: buyer,
            wallet: buyer,
            amount: round.tier.amount_usd(),
            joined_at: at,
        };
        let receipt = Receipt {
            id: [round.participant_count(); 32],
            token_amount: token_amount_for_usd(round.tier.amount_usd(), 1_000_000, 6).unwrap(),
        };
        let ticket = Ticket::record(255, round_key, round.tier, &participant, &receipt);

        round.record_participation(participant).unwrap();
        if round.check_fill_and_transition(at) {
            tier_state.release(round_key);
        }
        ticket
    }

    fn open(tier_state: &mut TierState, tier: Tier, at: i64) -> (Pubkey, Round) {
        let key = round_address(tier, tier_state.next_round_index());
        let index = tier_state.activate(key).unwrap();
        (key, Round::new(tier, index, 255, at))
    }

    #[test]
    fn three_purchases_in_tier_two() {
        let mut tier_state = TierState::new(Tier::Two, 255);
        let (key, mut round) = open(&mut tier_state, Tier::Two, NOW);

        for i in 0..3 {
            purchase(&mut tier_state, key, &mut round, NOW + i);
        }

        assert_eq!(round.total_amount, 6);
        assert_eq!(round.participants.len(), 3);
        assert_eq!(round.status, RoundStatus::Active);
        assert_eq!(tier_state.active_round, Some(key));
    }

    #[test]
    fn tenth_purchase_completes_tier_ten_round() {
        let mut tier_state = TierState::new(Tier::Ten, 255);
        let (key, mut round) = open(&mut tier_state, Tier::Ten, NOW);

        for i in 0..9 {
            purchase(&mut tier_state, key, &mut round, NOW + i);
        }
        assert!(round.is_active());
        assert_eq!(round.completed_at, None);

        purchase(&mut tier_state, key, &mut round, NOW + 60);

        assert_eq!(round.participants.len(), FILL_THRESHOLD as usize);
        assert_eq!(round.status, RoundStatus::Completed);
        assert_eq!(round.completed_at, Some(NOW + 60));
        assert_eq!(round.total_amount, 100);
        assert_eq!(tier_state.active_round, None);
    }

    #[test]
    fn total_matches_participant_sum() {
        let mut tier_state = TierState::new(Tier::Two, 255);
        let (key, mut round) = open(&mut tier_state, Tier::Two, NOW);

        for i in 0..7 {
            purchase(&mut tier_state, key, &mut round, NOW + i);
            let sum: u64 = round.participants.iter().map(|p| p.amount).sum();
            assert_eq!(round.total_amount, sum);
        }
    }

    #[test]
    fn completed_round_is_replaced_by_a_new_one() {
        let mut tier_state = TierState::new(Tier::Two, 255);
        let (first_key, mut first) = open(&mut tier_state, Tier::Two, NOW);
        for i in 0..FILL_THRESHOLD as i64 {
            purchase(&mut tier_state, first_key, &mut first, NOW + i);
        }

        let (second_key, second) = open(&mut tier_state, Tier::Two, NOW + 100);

        assert_ne!(first_key, second_key);
        assert_eq!(second.index, 1);
        let rounds = vec![(first_key, first), (second_key, second)];
        let (active, _) = Round::latest_active(&rounds, Tier::Two).unwrap();
        assert_eq!(*active, second_key);
    }

    #[test]
    fn concurrent_creation_yields_one_active_round() {
        let mut tier_state = TierState::new(Tier::Two, 255);

        // Both callers read the tier before either writes.
        let first = round_address(Tier::Two, tier_state.next_round_index());
        let second = round_address(Tier::Two, tier_state.next_round_index());
        assert_eq!(first, second, "both creates target the same account");

        tier_state.activate(first).unwrap();
        assert!(tier_state.activate(second).is_err());
        assert_eq!(tier_state.rounds_opened, 1);
        assert_eq!(tier_state.active_round, Some(first));
    }

    #[test]
    fn tickets_reference_their_round() {
        let mut tier_state = TierState::new(Tier::Ten, 255);
        let (key, mut round) = open(&mut tier_state, Tier::Ten, NOW);

        let ticket = purchase(&mut tier_state, key, &mut round, NOW);

        assert_eq!(ticket.round, key);
        assert_eq!(ticket.amount, 10);
        assert_eq!(ticket.token_amount, 10_000_000);

        let slot_zero = Pubkey::find_program_address(
            &[TICKET_SEED, key.as_ref(), 0u8.to_le_bytes().as_ref()],
            &pool_lottery::ID,
        );
        let slot_one = Pubkey::find_program_address(
            &[TICKET_SEED, key.as_ref(), 1u8.to_le_bytes().as_ref()],
            &pool_lottery::ID,
        );
        assert_ne!(slot_zero.0, slot_one.0);
    }

    #[test]
    fn unreadable_feed_quotes_fallback() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 0u64;
        let mut data = b"{\"okb\": \"not a price\"}".to_vec();
        let feed = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        let quote = get_price(&feed, NOW);

        assert_eq!(quote.price, 1_000_000);
        assert_eq!(quote.source, PriceSource::Fallback);
    }
}
