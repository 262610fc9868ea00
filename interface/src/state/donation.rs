use solana_pubkey::Pubkey;

use crate::{
    packable_struct,
    state::{
        AccountState,
        Discriminator,
        ADDRESS_SIZE,
        DISCRIMINATOR_LEN,
        STRING_PREFIX_SIZE,
    },
};

pub const DONATION_DISCRIMINATOR: Discriminator = [189, 210, 54, 77, 216, 85, 7, 68];
pub const DONATION_ACCOUNT_SPACE: usize = 292;

/// The offset of the `donor` field in donation account data.
pub const DONATION_DONOR_OFFSET: usize = DISCRIMINATOR_LEN;
/// The offset of the `dog_id` field in donation account data.
pub const DONATION_DOG_OFFSET: usize = DONATION_DONOR_OFFSET + ADDRESS_SIZE;

/// A single donation event. Written once at the PDA derived from `(donor, timestamp)` and never
/// mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Donation {
    pub donor: Pubkey,
    /// The address of the dog account the donation was made to.
    pub dog_id: Pubkey,
    /// The donated amount in lamports.
    pub amount: u64,
    /// The caller supplied unix timestamp. This is the donation's idempotency key, not a ledger
    /// assigned event time.
    pub timestamp: i64,
    pub message: String,
}

packable_struct!(Donation {
    donor,
    dog_id,
    amount,
    timestamp,
    message,
});

impl AccountState for Donation {
    const DISCRIMINATOR: Discriminator = DONATION_DISCRIMINATOR;
    const SPACE: usize = DONATION_ACCOUNT_SPACE;
    const MIN_LEN: usize = DISCRIMINATOR_LEN
        + ADDRESS_SIZE // donor
        + ADDRESS_SIZE // dog_id
        + size_of::<u64>() // amount
        + size_of::<i64>() // timestamp
        + STRING_PREFIX_SIZE; // message
}

impl Donation {
    /// The number of message bytes that fit in the account.
    pub const MAX_MESSAGE_BYTES: usize =
        DONATION_ACCOUNT_SPACE - <Donation as AccountState>::MIN_LEN;
}
