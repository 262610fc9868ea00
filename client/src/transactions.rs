use std::collections::HashSet;

use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_instruction::Instruction;
use solana_instruction_error::InstructionError;
use solana_pubkey::Pubkey;
use solana_sdk::{
    hash::Hash,
    message::Message,
    signature::{
        Keypair,
        Signer,
    },
    transaction::Transaction,
};
use solana_transaction_error::TransactionError;
use woofi_interface::{
    error::WoofiProgramError,
    instructions::InstructionTag,
};

use crate::{
    error::{
        ClientError,
        ClientResult,
    },
    logs::{
        log_error,
        log_info,
        log_rejected_instruction,
    },
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendTransactionConfig {
    /// When set, a compute unit limit and price instruction are prepended to every transaction.
    pub compute_budget: Option<u32>,
    pub debug_logs: Option<bool>,
}

impl SendTransactionConfig {
    pub fn debug_logs_enabled(&self) -> bool {
        matches!(self.debug_logs, Some(true))
    }

    /// Prepends the compute budget instructions, if any, to `instructions`.
    pub fn with_compute_budget(&self, instructions: &[Instruction]) -> Vec<Instruction> {
        [
            self.compute_budget.map_or(vec![], |budget| {
                vec![
                    ComputeBudgetInstruction::set_compute_unit_limit(budget),
                    ComputeBudgetInstruction::set_compute_unit_price(1),
                ]
            }),
            instructions.to_vec(),
        ]
        .concat()
    }
}

/// Returns the first address an instruction requires a signature from that neither `payer` nor
/// `signers` signs for.
pub fn find_missing_signer(
    payer: &Pubkey,
    signers: &[&Keypair],
    instructions: &[Instruction],
) -> Option<Pubkey> {
    let provided: HashSet<Pubkey> = std::iter::once(*payer)
        .chain(signers.iter().map(|signer| signer.pubkey()))
        .collect();

    instructions
        .iter()
        .flat_map(|instruction| &instruction.accounts)
        .filter(|meta| meta.is_signer)
        .map(|meta| meta.pubkey)
        .find(|pubkey| !provided.contains(pubkey))
}

/// Builds and signs a transaction paid for by `payer`.
///
/// Fails with [`ClientError::MissingSigner`] before signing if an instruction requires a
/// signature no keypair provides. Keypairs the message doesn't need are ignored.
pub fn build_transaction(
    payer: &Keypair,
    signers: &[&Keypair],
    instructions: &[Instruction],
    recent_blockhash: Hash,
) -> ClientResult<Transaction> {
    if let Some(missing) = find_missing_signer(&payer.pubkey(), signers, instructions) {
        return Err(ClientError::MissingSigner(missing));
    }

    let message = Message::new(instructions, Some(&payer.pubkey()));
    let required: HashSet<Pubkey> = message.signer_keys().into_iter().copied().collect();

    let mut seen = HashSet::new();
    let keypairs: Vec<&Keypair> = std::iter::once(payer)
        .chain(signers.iter().copied())
        .filter(|keypair| required.contains(&keypair.pubkey()) && seen.insert(keypair.pubkey()))
        .collect();

    let mut tx = Transaction::new_unsigned(message);
    tx.try_sign(keypairs.as_slice(), recent_blockhash)?;
    Ok(tx)
}

/// Logs the instruction a rejection came from, decoding `woofi` program errors.
pub fn log_instruction_error(
    error: &TransactionError,
    instructions: &[Instruction],
    program_id: &Pubkey,
) {
    let TransactionError::InstructionError(ixn_idx, ixn_error) = error else {
        log_error("Transaction error", error);
        return;
    };

    let tag = instructions
        .get(*ixn_idx as usize)
        .filter(|instruction| instruction.program_id == *program_id)
        .and_then(|instruction| InstructionTag::try_from(instruction.data.as_slice()).ok());

    match (tag, ixn_error) {
        (Some(tag), InstructionError::Custom(code)) => {
            log_rejected_instruction(tag, WoofiProgramError::from_repr(*code));
            log_info("Code", code);
        }
        (Some(tag), _) => {
            log_rejected_instruction(tag, None);
            log_error("Instruction error", ixn_error);
        }
        (None, _) => log_error("Generic error", error),
    }
}
