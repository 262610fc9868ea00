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

pub const DOG_DISCRIMINATOR: Discriminator = [146, 97, 68, 134, 183, 22, 228, 157];
pub const DOG_ACCOUNT_SPACE: usize = 1420;

/// A sponsored dog, stored at the PDA derived from its name.
///
/// `name` and `age` are fixed at creation. Everything else except `total_donations` and `admin`
/// can be changed with an update instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dog {
    pub name: String,
    pub age: u8,
    pub image_url: String,
    pub story: String,
    pub needs_food: bool,
    pub needs_toys: bool,
    pub needs_medical: bool,
    pub needs_shelter: bool,
    pub needs_other: String,
    /// The sum of every amount donated to this dog, in lamports.
    pub total_donations: u64,
    /// The admin that registered the dog.
    pub admin: Pubkey,
    pub active: bool,
}

packable_struct!(Dog {
    name,
    age,
    image_url,
    story,
    needs_food,
    needs_toys,
    needs_medical,
    needs_shelter,
    needs_other,
    total_donations,
    admin,
    active,
});

impl AccountState for Dog {
    const DISCRIMINATOR: Discriminator = DOG_DISCRIMINATOR;
    const SPACE: usize = DOG_ACCOUNT_SPACE;
    const MIN_LEN: usize = DISCRIMINATOR_LEN
        + STRING_PREFIX_SIZE // name
        + size_of::<u8>() // age
        + STRING_PREFIX_SIZE // image_url
        + STRING_PREFIX_SIZE // story
        + 4 // need flags
        + STRING_PREFIX_SIZE // needs_other
        + size_of::<u64>() // total_donations
        + ADDRESS_SIZE // admin
        + 1; // active
}

impl Dog {
    /// The number of text bytes (name, image url, story, other needs) that fit in the account.
    pub const MAX_TEXT_BYTES: usize = DOG_ACCOUNT_SPACE - <Dog as AccountState>::MIN_LEN;

    pub fn text_len(&self) -> usize {
        self.name.len() + self.image_url.len() + self.story.len() + self.needs_other.len()
    }
}
