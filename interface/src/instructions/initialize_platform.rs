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
pub struct InitializePlatformData {
    /// The identity that will custody donated funds.
    pub treasury: Pubkey,
}

packable_struct!(InitializePlatformData { treasury });

impl InstructionData for InitializePlatformData {
    const TAG: InstructionTag = InstructionTag::InitializePlatform;
}

/// Creates the platform singleton and records the signer as its admin.
///
/// Fails at the ledger if the platform account already exists.
///
/// ### Accounts
///  0. `[WRITE, SIGNER]` Admin account, pays for the platform account
///  1. `[WRITE]` Platform account
///  2. `[READ]` System program
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitializePlatform {
    admin: Pubkey,
    /// The platform PDA.
    platform: Pubkey,
    program_id: Pubkey,
    data: InitializePlatformData,
}

impl InitializePlatform {
    pub fn new(admin: Pubkey, treasury: Pubkey, program_id: &Pubkey) -> Self {
        Self {
            admin,
            platform: find_platform_address(program_id).0,
            program_id: *program_id,
            data: InitializePlatformData { treasury },
        }
    }

    pub fn admin(&self) -> &Pubkey {
        &self.admin
    }

    pub fn platform(&self) -> &Pubkey {
        &self.platform
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn data(&self) -> &InitializePlatformData {
        &self.data
    }

    pub fn create_account_metas(&self) -> [AccountMeta; 3] {
        [
            AccountMeta::new(self.admin, true),
            AccountMeta::new(self.platform, false),
            AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        ]
    }

    pub fn pack_instruction_data(&self) -> Vec<u8> {
        // Instruction data layout:
        //   - [0..8]: the instruction discriminator
        //   - [8..40]: the treasury address
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

impl From<InitializePlatform> for Instruction {
    fn from(value: InitializePlatform) -> Self {
        value.instruction()
    }
}
