//! Client-side interface for the `woofi` donation program.
//!
//! Includes PDA derivations, account record codecs, and instruction builders. Nothing in this
//! crate touches the network.

pub mod error;
pub mod instructions;
pub mod pack;
pub mod pda;
pub mod seeds;
pub mod state;

pub mod program {
    use solana_pubkey::Pubkey;

    pub const ID: Pubkey = Pubkey::from_str_const("CpPKTheeec2m2WMMsSg6ykyhRUu8FVcpUpoo1QvrNHmN");
}

pub use solana_pubkey::Pubkey;
