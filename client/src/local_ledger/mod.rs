//! An in-process ledger that executes `woofi` instructions against an in-memory account store.
//!
//! Transactions are atomic: every instruction runs against a working copy of the accounts and
//! the copy is committed only if all of them succeed. Fees aren't charged, but the fee payer
//! must exist. Like the runtime, a transaction may not leave a writable account holding a
//! non-zero balance below its rent exempt minimum unless it already did.

pub mod fixture;
mod processor;

use std::{
    collections::{
        HashMap,
        HashSet,
    },
    sync::{
        Mutex,
        MutexGuard,
        PoisonError,
    },
};

use solana_account::Account;
use solana_instruction::Instruction;
use solana_instruction_error::InstructionError;
use solana_pubkey::Pubkey;
use solana_sdk::{
    hash::Hash,
    message::Message,
    rent::Rent,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
};
use solana_transaction_error::TransactionError;

use crate::{
    connection::{
        AccountFilter,
        LedgerConnection,
    },
    error::{
        ClientError,
        ClientResult,
    },
    logs::{
        log_confirmed,
        log_send_failure,
    },
    transactions::build_transaction,
};

use processor::InvokeContext;

pub struct LocalLedger {
    program_id: Pubkey,
    rent: Rent,
    accounts: Mutex<HashMap<Pubkey, Account>>,
    debug_logs: bool,
}

impl Default for LocalLedger {
    fn default() -> Self {
        Self::new(woofi_interface::program::ID)
    }
}

impl LocalLedger {
    /// An empty ledger with the `woofi` program deployed at `program_id`.
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            rent: Rent::default(),
            accounts: Mutex::new(HashMap::new()),
            debug_logs: false,
        }
    }

    pub fn with_debug_logs(mut self, debug_logs: bool) -> Self {
        self.debug_logs = debug_logs;
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn rent(&self) -> &Rent {
        &self.rent
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<Pubkey, Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Credits `lamports` to `address`, creating a system account there if none exists.
    pub fn airdrop(&self, address: &Pubkey, lamports: u64) {
        let mut accounts = self.accounts();
        let account = accounts
            .entry(*address)
            .or_insert_with(|| system_account(0));
        account.lamports = account.lamports.saturating_add(lamports);
    }

    /// Creates a funded keypair.
    pub fn funded_keypair(&self, lamports: u64) -> Keypair {
        let keypair = Keypair::new();
        self.airdrop(&keypair.pubkey(), lamports);
        keypair
    }

    /// Overwrites the account at `address`.
    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.accounts().insert(address, account);
    }

    pub fn account(&self, address: &Pubkey) -> Option<Account> {
        self.accounts().get(address).cloned()
    }

    /// Executes `instructions` atomically with `signed` as the set of signatures present.
    pub fn process_instructions(
        &self,
        fee_payer: &Pubkey,
        signed: &HashSet<Pubkey>,
        instructions: &[Instruction],
    ) -> Result<(), TransactionError> {
        let mut accounts = self.accounts();
        if !accounts.contains_key(fee_payer) {
            return Err(TransactionError::AccountNotFound);
        }

        let mut working = accounts.clone();
        for (index, instruction) in instructions.iter().enumerate() {
            let index = u8::try_from(index).map_err(|_| TransactionError::SanitizeFailure)?;
            self.process_instruction(&mut working, signed, instruction)
                .map_err(|error| TransactionError::InstructionError(index, error))?;
        }
        self.check_rent_states(&accounts, &working, fee_payer, instructions)?;
        *accounts = working;
        Ok(())
    }

    /// Rejects the transaction if it moved a writable account into a rent paying state.
    ///
    /// An account that was already rent paying may stay so only if its data size is unchanged
    /// and its balance didn't grow.
    fn check_rent_states(
        &self,
        pre: &HashMap<Pubkey, Account>,
        post: &HashMap<Pubkey, Account>,
        fee_payer: &Pubkey,
        instructions: &[Instruction],
    ) -> Result<(), TransactionError> {
        let writable: HashSet<Pubkey> = std::iter::once(*fee_payer)
            .chain(
                instructions
                    .iter()
                    .flat_map(|instruction| &instruction.accounts)
                    .filter(|meta| meta.is_writable)
                    .map(|meta| meta.pubkey),
            )
            .collect();

        let message = Message::new(instructions, Some(fee_payer));
        for (index, address) in message.account_keys.iter().enumerate() {
            if !writable.contains(address) {
                continue;
            }
            let Some((post_lamports, post_len)) = self.rent_paying(post.get(address)) else {
                continue;
            };
            let allowed = self
                .rent_paying(pre.get(address))
                .is_some_and(|(pre_lamports, pre_len)| {
                    pre_len == post_len && post_lamports <= pre_lamports
                });
            if !allowed {
                let account_index =
                    u8::try_from(index).map_err(|_| TransactionError::SanitizeFailure)?;
                return Err(TransactionError::InsufficientFundsForRent { account_index });
            }
        }
        Ok(())
    }

    /// The balance and data length of a funded account below its rent exempt minimum.
    fn rent_paying(&self, account: Option<&Account>) -> Option<(u64, usize)> {
        account
            .filter(|account| {
                account.lamports > 0 && !self.rent.is_exempt(account.lamports, account.data.len())
            })
            .map(|account| (account.lamports, account.data.len()))
    }

    fn process_instruction(
        &self,
        accounts: &mut HashMap<Pubkey, Account>,
        signed: &HashSet<Pubkey>,
        instruction: &Instruction,
    ) -> Result<(), InstructionError> {
        if instruction.program_id != self.program_id {
            return Err(InstructionError::IncorrectProgramId);
        }
        let mut ctx = InvokeContext {
            program_id: &self.program_id,
            rent: &self.rent,
            accounts,
            signed,
            metas: &instruction.accounts,
        };
        ctx.process(&instruction.data)
    }
}

pub(crate) fn system_account(lamports: u64) -> Account {
    Account {
        lamports,
        data: vec![],
        owner: solana_system_interface::program::ID,
        executable: false,
        rent_epoch: 0,
    }
}

impl LedgerConnection for LocalLedger {
    async fn get_account(&self, address: &Pubkey) -> ClientResult<Option<Account>> {
        Ok(self.account(address))
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ClientResult<Vec<(Pubkey, Account)>> {
        let mut matched: Vec<(Pubkey, Account)> = self
            .accounts()
            .iter()
            .filter(|(_, account)| account.owner == *program_id)
            .filter(|(_, account)| filters.iter().all(|filter| filter.matches(&account.data)))
            .map(|(address, account)| (*address, account.clone()))
            .collect();
        matched.sort_by_key(|(address, _)| *address);
        Ok(matched)
    }

    async fn send_and_confirm(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> ClientResult<Signature> {
        let tx = build_transaction(payer, signers, instructions, Hash::default())?;
        tx.verify().map_err(ClientError::Submission)?;

        let signed: HashSet<Pubkey> = tx.message.signer_keys().into_iter().copied().collect();
        match self.process_instructions(&payer.pubkey(), &signed, instructions) {
            Ok(()) => {
                let sig = tx.signatures.first().copied().unwrap_or_default();
                if self.debug_logs {
                    log_confirmed(&sig, &payer.pubkey());
                }
                Ok(sig)
            }
            Err(error) => {
                let error = ClientError::Submission(error);
                if self.debug_logs {
                    log_send_failure(&error, instructions, &self.program_id, &payer.pubkey());
                }
                Err(error)
            }
        }
    }
}
