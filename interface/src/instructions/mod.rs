//! Instruction data types and account-role builders for each `woofi` instruction.
//!
//! Instruction data is the instruction's 8 byte discriminator followed by its packed arguments.

use strum::IntoEnumIterator;

use crate::{
    error::{
        WoofiError,
        WoofiResult,
    },
    pack::{
        Pack,
        Unpack,
    },
    state::{
        read_discriminator,
        Discriminator,
        DISCRIMINATOR_LEN,
    },
};

pub mod add_dog;
pub mod donate;
pub mod initialize_platform;
pub mod update_dog;
pub mod withdraw_funds;

pub use add_dog::{
    AddDog,
    AddDogData,
};
pub use donate::{
    Donate,
    DonateData,
};
pub use initialize_platform::{
    InitializePlatform,
    InitializePlatformData,
};
pub use update_dog::{
    UpdateDog,
    UpdateDogData,
};
pub use withdraw_funds::{
    WithdrawFunds,
    WithdrawFundsData,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum InstructionTag {
    InitializePlatform,
    AddDog,
    UpdateDog,
    Donate,
    WithdrawFunds,
}

impl InstructionTag {
    pub const fn discriminator(self) -> Discriminator {
        match self {
            Self::InitializePlatform => [119, 201, 101, 45, 75, 122, 89, 3],
            Self::AddDog => [223, 159, 190, 196, 23, 28, 16, 126],
            Self::UpdateDog => [252, 72, 31, 59, 10, 122, 183, 113],
            Self::Donate => [121, 186, 218, 211, 73, 70, 196, 180],
            Self::WithdrawFunds => [241, 36, 29, 111, 208, 31, 104, 217],
        }
    }

    pub fn from_discriminator(discriminator: &Discriminator) -> Option<Self> {
        Self::iter().find(|tag| tag.discriminator() == *discriminator)
    }
}

impl TryFrom<&[u8]> for InstructionTag {
    type Error = WoofiError;

    /// Reads the tag from the leading discriminator of instruction data.
    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        let discriminator = read_discriminator(data)?;
        Self::from_discriminator(&discriminator).ok_or(WoofiError::InvalidInstructionTag)
    }
}

/// The argument payload of a single instruction.
pub trait InstructionData: Pack + Unpack {
    const TAG: InstructionTag;

    /// Packs the discriminator followed by the arguments.
    fn pack_tagged(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(DISCRIMINATOR_LEN + self.packed_len());
        data.extend_from_slice(&Self::TAG.discriminator());
        self.pack_into(&mut data);
        data
    }
}

/// A decoded `woofi` instruction payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WoofiInstruction {
    InitializePlatform(InitializePlatformData),
    AddDog(AddDogData),
    UpdateDog(UpdateDogData),
    Donate(DonateData),
    WithdrawFunds(WithdrawFundsData),
}

impl WoofiInstruction {
    /// Parses instruction data back into its tagged arguments. Trailing bytes are ignored.
    pub fn unpack(data: &[u8]) -> WoofiResult<Self> {
        let tag = InstructionTag::try_from(data)?;
        let args = &data[DISCRIMINATOR_LEN..];
        Ok(match tag {
            InstructionTag::InitializePlatform => {
                Self::InitializePlatform(InitializePlatformData::unpack(args)?)
            }
            InstructionTag::AddDog => Self::AddDog(AddDogData::unpack(args)?),
            InstructionTag::UpdateDog => Self::UpdateDog(UpdateDogData::unpack(args)?),
            InstructionTag::Donate => Self::Donate(DonateData::unpack(args)?),
            InstructionTag::WithdrawFunds => Self::WithdrawFunds(WithdrawFundsData::unpack(args)?),
        })
    }

    pub fn tag(&self) -> InstructionTag {
        match self {
            Self::InitializePlatform(_) => InstructionTag::InitializePlatform,
            Self::AddDog(_) => InstructionTag::AddDog,
            Self::UpdateDog(_) => InstructionTag::UpdateDog,
            Self::Donate(_) => InstructionTag::Donate,
            Self::WithdrawFunds(_) => InstructionTag::WithdrawFunds,
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        match self {
            Self::InitializePlatform(data) => data.pack_tagged(),
            Self::AddDog(data) => data.pack_tagged(),
            Self::UpdateDog(data) => data.pack_tagged(),
            Self::Donate(data) => data.pack_tagged(),
            Self::WithdrawFunds(data) => data.pack_tagged(),
        }
    }
}
