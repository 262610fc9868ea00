pub mod dog;
pub mod donation;
pub mod platform;

pub use dog::{
    Dog,
    DOG_DISCRIMINATOR,
};
pub use donation::{
    Donation,
    DONATION_DISCRIMINATOR,
};
pub use platform::{
    Platform,
    PLATFORM_DISCRIMINATOR,
};

use crate::{
    error::{
        WoofiError,
        WoofiResult,
    },
    pack::{
        Pack,
        Unpack,
    },
};

pub type Discriminator = [u8; DISCRIMINATOR_LEN];

pub const DISCRIMINATOR_LEN: usize = 8;
pub const ADDRESS_SIZE: usize = 32;
pub const STRING_PREFIX_SIZE: usize = size_of::<u32>();

/// A record persisted by the program. Account data is the record's [`AccountState::DISCRIMINATOR`]
/// followed by its packed fields, zero padded up to [`AccountState::SPACE`].
pub trait AccountState: Pack + Unpack {
    const DISCRIMINATOR: Discriminator;

    /// The bytes the program allocates for the account, including the discriminator.
    const SPACE: usize;

    /// The length of the smallest valid account data, i.e. with every text field empty.
    const MIN_LEN: usize;

    /// Packs the discriminator and record without any trailing padding.
    fn to_account_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(DISCRIMINATOR_LEN + self.packed_len());
        data.extend_from_slice(&Self::DISCRIMINATOR);
        self.pack_into(&mut data);
        data
    }

    /// Validates the discriminator and minimum length, then unpacks the record. Bytes after the
    /// record are ignored.
    fn try_from_account_data(data: &[u8]) -> WoofiResult<Self> {
        let discriminator = read_discriminator(data)?;
        if discriminator != Self::DISCRIMINATOR {
            return Err(WoofiError::InvalidAccountDiscriminant);
        }
        if data.len() < Self::MIN_LEN {
            return Err(WoofiError::InsufficientByteLength);
        }
        Self::unpack(&data[DISCRIMINATOR_LEN..])
    }
}

pub fn read_discriminator(data: &[u8]) -> WoofiResult<Discriminator> {
    data.get(..DISCRIMINATOR_LEN)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(WoofiError::InsufficientByteLength)
}

/// Any account owned by the program, decoded by its discriminator.
#[derive(Clone, Debug, PartialEq, Eq, strum_macros::EnumDiscriminants)]
#[strum_discriminants(
    name(AccountKind),
    derive(strum_macros::Display, strum_macros::EnumIter, Hash)
)]
pub enum WoofiAccount {
    Platform(Platform),
    Dog(Dog),
    Donation(Donation),
}

impl WoofiAccount {
    pub fn unpack(data: &[u8]) -> WoofiResult<Self> {
        match read_discriminator(data)? {
            PLATFORM_DISCRIMINATOR => Platform::try_from_account_data(data).map(Self::Platform),
            DOG_DISCRIMINATOR => Dog::try_from_account_data(data).map(Self::Dog),
            DONATION_DISCRIMINATOR => Donation::try_from_account_data(data).map(Self::Donation),
            _ => Err(WoofiError::InvalidAccountDiscriminant),
        }
    }

    pub fn to_account_data(&self) -> Vec<u8> {
        match self {
            Self::Platform(platform) => platform.to_account_data(),
            Self::Dog(dog) => dog.to_account_data(),
            Self::Donation(donation) => donation.to_account_data(),
        }
    }

    pub fn kind(&self) -> AccountKind {
        self.into()
    }
}

impl AccountKind {
    pub const fn discriminator(self) -> Discriminator {
        match self {
            Self::Platform => PLATFORM_DISCRIMINATOR,
            Self::Dog => DOG_DISCRIMINATOR,
            Self::Donation => DONATION_DISCRIMINATOR,
        }
    }

    pub const fn space(self) -> usize {
        match self {
            Self::Platform => platform::PLATFORM_ACCOUNT_SPACE,
            Self::Dog => dog::DOG_ACCOUNT_SPACE,
            Self::Donation => donation::DONATION_ACCOUNT_SPACE,
        }
    }
}
