//! Client-side access layer for the `woofi` donation program.
//!
//! [`WoofiClient`] binds a [`LedgerConnection`] and a payer to the builders and codecs in
//! [`woofi_interface`]. Connections are either a JSON RPC endpoint ([`RpcConnection`]) or the
//! in-process [`LocalLedger`].

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod local_ledger;
pub mod logs;
pub mod transactions;

pub use client::{
    current_donation_timestamp,
    WoofiClient,
};
pub use config::WoofiConfig;
pub use connection::{
    AccountFilter,
    LedgerConnection,
    RpcConnection,
};
pub use error::{
    ClientError,
    ClientResult,
    RuntimeRejection,
};
pub use local_ledger::LocalLedger;
pub use logs::LogColor;
pub use transactions::SendTransactionConfig;
