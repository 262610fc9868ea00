/// Errors raised while deriving addresses or packing/unpacking `woofi` instruction and account
/// data on the client side.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum WoofiError {
    InvalidInstructionTag,
    InsufficientByteLength,
    DeclaredLengthOverrun,
    InvalidBoolByte,
    InvalidUtf8,
    InvalidAccountDiscriminant,
    InvalidAccountOwner,
    EmptyDogName,
    SeedTooLong,
}

impl From<WoofiError> for &'static str {
    fn from(value: WoofiError) -> Self {
        match value {
            WoofiError::InvalidInstructionTag => "Invalid instruction tag",
            WoofiError::InsufficientByteLength => "Not enough bytes passed",
            WoofiError::DeclaredLengthOverrun => "Declared length exceeds the remaining bytes",
            WoofiError::InvalidBoolByte => "Bool byte was neither 0 nor 1",
            WoofiError::InvalidUtf8 => "Text field isn't valid UTF-8",
            WoofiError::InvalidAccountDiscriminant => "Invalid account discriminant",
            WoofiError::InvalidAccountOwner => "Account isn't owned by the program",
            WoofiError::EmptyDogName => "Dog name cannot be empty",
            WoofiError::SeedTooLong => "Seed exceeds the maximum seed length",
        }
    }
}

impl core::fmt::Display for WoofiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = (*self).into();
        write!(f, "{self:?}: {msg}")
    }
}

impl std::error::Error for WoofiError {}

pub type WoofiResult<T = ()> = Result<T, WoofiError>;

/// The offset Anchor adds to a program's user-defined error codes.
pub const PROGRAM_ERROR_OFFSET: u32 = 6000;

/// Custom error codes returned by the on-chain `woofi` program.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::FromRepr, strum_macros::EnumIter)]
#[repr(u32)]
pub enum WoofiProgramError {
    Unauthorized = 6000,
    InvalidAmount,
    DogNotFound,
    InsufficientFunds,
    InvalidDogName,
    InvalidDogStory,
    InvalidImageUrl,
}

static_assertions::const_assert_eq!(WoofiProgramError::Unauthorized as u32, PROGRAM_ERROR_OFFSET);

impl WoofiProgramError {
    #[inline(always)]
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Unauthorized => "Only the admin can perform this action",
            Self::InvalidAmount => "Donation amount must be positive",
            Self::DogNotFound => "The referenced dog does not exist",
            Self::InsufficientFunds => "Insufficient funds for withdrawal",
            Self::InvalidDogName => "Dog name cannot be empty",
            Self::InvalidDogStory => "Dog story cannot be empty",
            Self::InvalidImageUrl => "Image URL cannot be empty",
        }
    }
}

impl core::fmt::Display for WoofiProgramError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?} ({}): {}", self.code(), self.message())
    }
}
