use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_pubkey::Pubkey;

use crate::{
    error::WoofiResult,
    instructions::{
        InstructionData,
        InstructionTag,
    },
    packable_struct,
    pda::{
        find_dog_address,
        find_platform_address,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddDogData {
    /// The dog's name. Also the seed of the dog's address, so it can never change.
    pub name: String,
    pub age: u8,
    pub image_url: String,
    pub story: String,
    pub needs_food: bool,
    pub needs_toys: bool,
    pub needs_medical: bool,
    pub needs_shelter: bool,
    pub needs_other: String,
}

packable_struct!(AddDogData {
    name,
    age,
    image_url,
    story,
    needs_food,
    needs_toys,
    needs_medical,
    needs_shelter,
    needs_other,
});

impl InstructionData for AddDogData {
    const TAG: InstructionTag = InstructionTag::AddDog;
}

/// Registers a new dog at the address derived from its name and increments the platform's dog
/// count. The dog starts active with no donations.
///
/// The admin must be the platform admin. Fails at the ledger if a dog with the same name exists.
///
/// ### Accounts
///  0. `[WRITE, SIGNER]` Admin account, pays for the dog account
///  1. `[WRITE]` Platform account
///  2. `[WRITE]` Dog account
///  3. `[READ]` System program
///
/// The dog address is always derived from the name, so the builder can only be made through
/// [`AddDog::new`]:
///
/// ```compile_fail
/// use woofi_interface::{instructions::AddDog, Pubkey};
///
/// fn redirect(add_dog: AddDog, victim: Pubkey) -> AddDog {
///     AddDog { dog: victim, ..add_dog }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddDog {
    admin: Pubkey,
    /// The platform PDA.
    platform: Pubkey,
    /// The dog PDA derived from `data.name`.
    dog: Pubkey,
    program_id: Pubkey,
    data: AddDogData,
}

impl AddDog {
    /// Derives the platform and dog addresses. Fails if the name can't be used as a seed.
    pub fn new(admin: Pubkey, data: AddDogData, program_id: &Pubkey) -> WoofiResult<Self> {
        let (dog, _) = find_dog_address(&data.name, program_id)?;
        Ok(Self {
            admin,
            platform: find_platform_address(program_id).0,
            dog,
            program_id: *program_id,
            data,
        })
    }

    pub fn admin(&self) -> &Pubkey {
        &self.admin
    }

    pub fn platform(&self) -> &Pubkey {
        &self.platform
    }

    pub fn dog(&self) -> &Pubkey {
        &self.dog
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn data(&self) -> &AddDogData {
        &self.data
    }

    pub fn create_account_metas(&self) -> [AccountMeta; 4] {
        [
            AccountMeta::new(self.admin, true),
            AccountMeta::new(self.platform, false),
            AccountMeta::new(self.dog, false),
            AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        ]
    }

    pub fn pack_instruction_data(&self) -> Vec<u8> {
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

impl From<AddDog> for Instruction {
    fn from(value: AddDog) -> Self {
        value.instruction()
    }
}
