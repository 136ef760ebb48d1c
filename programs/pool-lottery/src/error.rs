use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Signer is not the lottery authority")]
    NotAuthorized,

    #[msg("Tier already has an active round")]
    RoundAlreadyActive,

    #[msg("Round is not the active round of its tier")]
    RoundNotActive,

    #[msg("Round already holds the maximum number of participants")]
    RoundFull,

    #[msg("Round belongs to a different tier")]
    TierMismatch,

    #[msg("User must register before buying a ticket")]
    UserNotRegistered,

    #[msg("Payment mint does not match the configured mint")]
    InvalidPaymentMint,

    #[msg("Treasury does not match the configured recipient")]
    InvalidTreasury,

    #[msg("Price feed does not match the configured feed")]
    InvalidPriceFeed,

    #[msg("Quoted price must be positive")]
    InvalidPrice,

    #[msg("Computed token amount is zero")]
    ZeroPayment,

    #[msg("Buyer token balance is too low")]
    InsufficientTokenBalance,

    #[msg("Treasury balance did not increase by the paid amount")]
    PaymentNotReceived,

    #[msg("Arithmetic overflow")]
    Overflow,
}
