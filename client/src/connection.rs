use solana_account::Account;
use solana_client::{
    client_error::{
        ClientError as RpcClientError,
        ClientErrorKind,
    },
    nonblocking::rpc_client::RpcClient,
    rpc_config::{
        RpcAccountInfoConfig,
        RpcProgramAccountsConfig,
        UiAccountEncoding,
    },
    rpc_filter::{
        Memcmp,
        RpcFilterType,
    },
};
use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use solana_sdk::signature::{
    Keypair,
    Signature,
    Signer,
};

use crate::{
    config::WoofiConfig,
    error::{
        ClientError,
        ClientResult,
    },
    logs::{
        log_confirmed,
        log_send_failure,
    },
    transactions::{
        build_transaction,
        SendTransactionConfig,
    },
};

/// A filter over program account data, applied by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountFilter {
    /// Matches accounts whose data holds `bytes` at `offset`.
    Memcmp { offset: usize, bytes: Vec<u8> },
    /// Matches accounts whose data is exactly this many bytes.
    DataSize(u64),
}

impl AccountFilter {
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Self::Memcmp { offset, bytes } => data
                .get(*offset..offset.saturating_add(bytes.len()))
                .is_some_and(|window| window == bytes.as_slice()),
            Self::DataSize(size) => data.len() as u64 == *size,
        }
    }
}

impl From<AccountFilter> for RpcFilterType {
    fn from(filter: AccountFilter) -> Self {
        match filter {
            AccountFilter::Memcmp { offset, bytes } => {
                RpcFilterType::Memcmp(Memcmp::new_raw_bytes(offset, bytes))
            }
            AccountFilter::DataSize(size) => RpcFilterType::DataSize(size),
        }
    }
}

/// The ledger operations the client facade needs.
#[allow(async_fn_in_trait)]
pub trait LedgerConnection {
    /// Fetches the account at `address`, or `None` if nothing exists there.
    async fn get_account(&self, address: &Pubkey) -> ClientResult<Option<Account>>;

    /// Fetches every account owned by `program_id` that matches all of `filters`.
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ClientResult<Vec<(Pubkey, Account)>>;

    /// The lamport balance at `address`. Zero when nothing exists there.
    async fn get_balance(&self, address: &Pubkey) -> ClientResult<u64> {
        Ok(self
            .get_account(address)
            .await?
            .map_or(0, |account| account.lamports))
    }

    /// Signs `instructions` as one transaction paid for by `payer`, submits it and waits for
    /// confirmation.
    async fn send_and_confirm(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> ClientResult<Signature>;
}

/// A connection to a JSON RPC endpoint.
pub struct RpcConnection {
    rpc: RpcClient,
    program_id: Pubkey,
    send: SendTransactionConfig,
}

impl RpcConnection {
    pub fn new(config: &WoofiConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment),
            program_id: config.program_id,
            send: config.send.clone(),
        }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }
}

impl LedgerConnection for RpcConnection {
    async fn get_account(&self, address: &Pubkey) -> ClientResult<Option<Account>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ClientResult<Vec<(Pubkey, Account)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters.into_iter().map(RpcFilterType::from).collect()),
            account_config: RpcAccountInfoConfig {
                commitment: Some(self.rpc.commitment()),
                encoding: Some(UiAccountEncoding::Base64),
                data_slice: None,
                min_context_slot: None,
            },
            with_context: None,
            sort_results: Some(true),
        };
        self.rpc
            .get_program_ui_accounts_with_config(program_id, config)
            .await?
            .into_iter()
            .map(|(address, ui_account)| -> ClientResult<(Pubkey, Account)> {
                let account = ui_account.decode::<Account>().ok_or_else(|| {
                    RpcClientError::from(ClientErrorKind::Custom(format!(
                        "undecodable account data at {address}"
                    )))
                })?;
                Ok((address, account))
            })
            .collect()
    }

    async fn get_balance(&self, address: &Pubkey) -> ClientResult<u64> {
        Ok(self.rpc.get_balance(address).await?)
    }

    async fn send_and_confirm(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> ClientResult<Signature> {
        let instructions = self.send.with_compute_budget(instructions);
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let tx = build_transaction(payer, signers, &instructions, blockhash)?;

        match self.rpc.send_and_confirm_transaction(&tx).await {
            Ok(sig) => {
                if self.send.debug_logs_enabled() {
                    log_confirmed(&sig, &payer.pubkey());
                }
                Ok(sig)
            }
            Err(error) => {
                let error = ClientError::from(error);
                log_send_failure(&error, &instructions, &self.program_id, &payer.pubkey());
                Err(error)
            }
        }
    }
}
