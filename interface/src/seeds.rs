//! Namespace tags used as the first seed of every `woofi` PDA.

pub const PLATFORM_SEED: &[u8] = b"platform";
pub const DOG_SEED: &[u8] = b"dog";
pub const DONATION_SEED: &[u8] = b"donation";

/// The maximum length in bytes of a single PDA seed.
pub const MAX_SEED_LEN: usize = 32;

#[macro_export]
macro_rules! platform_seeds {
    () => {
        &[$crate::seeds::PLATFORM_SEED]
    };
}

#[macro_export]
macro_rules! dog_seeds {
    ($name:expr) => {
        &[$crate::seeds::DOG_SEED, $name.as_bytes()]
    };
}

/// The timestamp is always seeded as its 8 little-endian bytes.
#[macro_export]
macro_rules! donation_seeds {
    ($donor:expr, $timestamp:expr) => {
        &[
            $crate::seeds::DONATION_SEED,
            $donor.as_ref(),
            i64::to_le_bytes($timestamp).as_ref(),
        ]
    };
}
