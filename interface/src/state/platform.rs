use solana_pubkey::Pubkey;
use static_assertions::const_assert_eq;

use crate::{
    packable_struct,
    state::{
        AccountState,
        Discriminator,
        ADDRESS_SIZE,
        DISCRIMINATOR_LEN,
    },
};

pub const PLATFORM_DISCRIMINATOR: Discriminator = [77, 92, 204, 58, 187, 98, 91, 12];
pub const PLATFORM_ACCOUNT_SPACE: usize = 88;

/// The program's singleton configuration and running totals, stored at the platform PDA.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    /// The identity authorized to add/update dogs and withdraw funds.
    pub admin: Pubkey,
    /// The identity custodying donated funds.
    pub treasury: Pubkey,
    /// The sum of every donated amount, in lamports.
    pub total_donations: u64,
    pub dog_count: u32,
    pub donation_count: u32,
}

packable_struct!(Platform {
    admin,
    treasury,
    total_donations,
    dog_count,
    donation_count,
});

impl Platform {
    /// A freshly initialized platform with every counter at zero.
    pub const fn new(admin: Pubkey, treasury: Pubkey) -> Self {
        Self {
            admin,
            treasury,
            total_donations: 0,
            dog_count: 0,
            donation_count: 0,
        }
    }
}

impl AccountState for Platform {
    const DISCRIMINATOR: Discriminator = PLATFORM_DISCRIMINATOR;
    const SPACE: usize = PLATFORM_ACCOUNT_SPACE;
    const MIN_LEN: usize = DISCRIMINATOR_LEN
        + ADDRESS_SIZE // admin
        + ADDRESS_SIZE // treasury
        + size_of::<u64>() // total_donations
        + size_of::<u32>() // dog_count
        + size_of::<u32>(); // donation_count
}

// The platform has no variable length fields, so it always fills its allocation exactly.
const_assert_eq!(<Platform as AccountState>::MIN_LEN, PLATFORM_ACCOUNT_SPACE);
