use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_pubkey::Pubkey;

use crate::{
    instructions::{
        InstructionData,
        InstructionTag,
    },
    packable_struct,
    pda::find_platform_address,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawFundsData {
    /// The amount to move from the treasury to the recipient, in lamports.
    pub amount: u64,
}

packable_struct!(WithdrawFundsData { amount });

impl InstructionData for WithdrawFundsData {
    const TAG: InstructionTag = InstructionTag::WithdrawFunds;
}

/// Moves `amount` lamports from the treasury to an arbitrary recipient.
///
/// The admin must be the platform admin and the treasury must be the platform's recorded
/// treasury.
///
/// ### Accounts
///  0. `[SIGNER]` Admin account
///  1. `[READ]` Platform account
///  2. `[WRITE]` Treasury account
///  3. `[WRITE]` Recipient account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawFunds {
    pub admin: Pubkey,
    /// The platform PDA.
    pub platform: Pubkey,
    pub treasury: Pubkey,
    pub recipient: Pubkey,
    pub program_id: Pubkey,
    pub data: WithdrawFundsData,
}

impl WithdrawFunds {
    pub fn new(
        admin: Pubkey,
        treasury: Pubkey,
        recipient: Pubkey,
        amount: u64,
        program_id: &Pubkey,
    ) -> Self {
        Self {
            admin,
            platform: find_platform_address(program_id).0,
            treasury,
            recipient,
            program_id: *program_id,
            data: WithdrawFundsData { amount },
        }
    }

    pub fn create_account_metas(&self) -> [AccountMeta; 4] {
        [
            AccountMeta::new_readonly(self.admin, true),
            AccountMeta::new_readonly(self.platform, false),
            AccountMeta::new(self.treasury, false),
            AccountMeta::new(self.recipient, false),
        ]
    }

    pub fn pack_instruction_data(&self) -> Vec<u8> {
        // Instruction data layout:
        //   - [0..8]: the instruction discriminator
        //   - [8..16]: the u64 amount
        self.data.pack_tagged()
    }

    pub fn instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self.create_account_metas().to_vec(),
            data: self.pack_instruction_data(),
        }
    }
}

impl From<WithdrawFunds> for Instruction {
    fn from(value: WithdrawFunds) -> Self {
        value.instruction()
    }
}
