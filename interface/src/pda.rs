//! PDA helpers for deriving `woofi` program addresses.
//!
//! Every derivation is a pure function of its seeds and the owning program id. Creation
//! instructions always address their new account through these functions.

use solana_pubkey::Pubkey;

use crate::{
    dog_seeds,
    donation_seeds,
    error::{
        WoofiError,
        WoofiResult,
    },
    platform_seeds,
    seeds::MAX_SEED_LEN,
};

pub fn find_platform_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(platform_seeds!(), program_id)
}

/// Derives the dog account address for `name`.
///
/// The name's raw UTF-8 bytes are the seed, so names are case and whitespace sensitive and must
/// be at most [`MAX_SEED_LEN`] bytes.
pub fn find_dog_address(name: &str, program_id: &Pubkey) -> WoofiResult<(Pubkey, u8)> {
    validate_dog_name(name)?;
    Ok(Pubkey::find_program_address(dog_seeds!(name), program_id))
}

/// Derives the donation record address for a `(donor, timestamp)` pair.
///
/// The timestamp acts as the donor's idempotency key: a second donation with the same pair
/// derives the same address and is rejected by the program.
pub fn find_donation_address(donor: &Pubkey, timestamp: i64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(donation_seeds!(donor, timestamp), program_id)
}

pub fn validate_dog_name(name: &str) -> WoofiResult {
    if name.trim().is_empty() {
        return Err(WoofiError::EmptyDogName);
    }
    if name.len() > MAX_SEED_LEN {
        return Err(WoofiError::SeedTooLong);
    }
    Ok(())
}
