use std::str::FromStr;

use solana_commitment_config::CommitmentConfig;
use solana_pubkey::Pubkey;

use crate::{
    error::{
        ClientError,
        ClientResult,
    },
    transactions::SendTransactionConfig,
};

pub const RPC_URL_ENV: &str = "WOOFI_RPC_URL";
pub const PROGRAM_ID_ENV: &str = "WOOFI_PROGRAM_ID";
pub const COMMITMENT_ENV: &str = "WOOFI_COMMITMENT";
pub const COMPUTE_BUDGET_ENV: &str = "WOOFI_COMPUTE_BUDGET";
pub const DEBUG_LOGS_ENV: &str = "WOOFI_DEBUG_LOGS";

pub const DEFAULT_RPC_URL: &str = "http://localhost:8899";

/// Everything needed to reach a deployed `woofi` program over RPC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WoofiConfig {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub program_id: Pubkey,
    pub send: SendTransactionConfig,
}

impl Default for WoofiConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: CommitmentConfig::confirmed(),
            program_id: woofi_interface::program::ID,
            send: SendTransactionConfig::default(),
        }
    }
}

impl WoofiConfig {
    /// Reads the config from `WOOFI_*` environment variables, falling back to the defaults for
    /// any that are unset.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the config through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let program_id = match var(PROGRAM_ID_ENV) {
            Some(value) => Pubkey::from_str(value.trim())
                .map_err(|e| ClientError::Config(format!("{PROGRAM_ID_ENV}: {e}")))?,
            None => defaults.program_id,
        };
        let commitment = match var(COMMITMENT_ENV) {
            Some(value) => parse_commitment(&value)?,
            None => defaults.commitment,
        };
        let compute_budget = var(COMPUTE_BUDGET_ENV)
            .map(|value| {
                value
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| ClientError::Config(format!("{COMPUTE_BUDGET_ENV}: {e}")))
            })
            .transpose()?;
        let debug_logs = var(DEBUG_LOGS_ENV).map(|value| parse_bool(&value)).transpose()?;

        Ok(Self {
            rpc_url: var(RPC_URL_ENV).unwrap_or(defaults.rpc_url),
            commitment,
            program_id,
            send: SendTransactionConfig {
                compute_budget,
                debug_logs,
            },
        })
    }
}

fn parse_commitment(value: &str) -> ClientResult<CommitmentConfig> {
    match value.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(ClientError::Config(format!(
            "{COMMITMENT_ENV}: expected processed, confirmed or finalized, got `{other}`"
        ))),
    }
}

fn parse_bool(value: &str) -> ClientResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ClientError::Config(format!(
            "{DEBUG_LOGS_ENV}: expected a boolean, got `{other}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ClientResult<WoofiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WoofiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, WoofiConfig::default());
        assert_eq!(config.rpc_url, "http://localhost:8899");
        assert_eq!(config.program_id, woofi_interface::program::ID);
        assert_eq!(config.commitment, CommitmentConfig::confirmed());
    }

    #[test]
    fn reads_every_variable() {
        let program_id = Pubkey::new_unique();
        let config = config_from(&[
            (RPC_URL_ENV, "https://api.devnet.solana.com"),
            (PROGRAM_ID_ENV, &program_id.to_string()),
            (COMMITMENT_ENV, "Finalized"),
            (COMPUTE_BUDGET_ENV, "200000"),
            (DEBUG_LOGS_ENV, "true"),
        ])
        .unwrap();

        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(config.program_id, program_id);
        assert_eq!(config.commitment, CommitmentConfig::finalized());
        assert_eq!(config.send.compute_budget, Some(200_000));
        assert!(config.send.debug_logs_enabled());
    }

    #[test]
    fn malformed_values_are_config_errors() {
        for vars in [
            [(PROGRAM_ID_ENV, "not-a-pubkey")],
            [(COMMITMENT_ENV, "recent")],
            [(COMPUTE_BUDGET_ENV, "-5")],
            [(DEBUG_LOGS_ENV, "maybe")],
        ] {
            assert!(matches!(config_from(&vars), Err(ClientError::Config(_))));
        }
    }
}
