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
    state::Dog,
};

/// The mutable fields of a dog. Every field is overwritten; there is no partial update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateDogData {
    pub image_url: String,
    pub story: String,
    pub needs_food: bool,
    pub needs_toys: bool,
    pub needs_medical: bool,
    pub needs_shelter: bool,
    pub needs_other: String,
    pub active: bool,
}

packable_struct!(UpdateDogData {
    image_url,
    story,
    needs_food,
    needs_toys,
    needs_medical,
    needs_shelter,
    needs_other,
    active,
});

impl InstructionData for UpdateDogData {
    const TAG: InstructionTag = InstructionTag::UpdateDog;
}

impl From<&Dog> for UpdateDogData {
    /// Starts an update from a dog's current values.
    fn from(dog: &Dog) -> Self {
        Self {
            image_url: dog.image_url.clone(),
            story: dog.story.clone(),
            needs_food: dog.needs_food,
            needs_toys: dog.needs_toys,
            needs_medical: dog.needs_medical,
            needs_shelter: dog.needs_shelter,
            needs_other: dog.needs_other.clone(),
            active: dog.active,
        }
    }
}

/// Overwrites an existing dog's mutable fields.
///
/// The admin must be the admin recorded on the dog.
///
/// ### Accounts
///  0. `[SIGNER]` Admin account
///  1. `[WRITE]` Dog account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateDog {
    pub admin: Pubkey,
    /// The existing dog account, passed directly rather than derived.
    pub dog: Pubkey,
    pub program_id: Pubkey,
    pub data: UpdateDogData,
}

impl UpdateDog {
    pub fn new(admin: Pubkey, dog: Pubkey, data: UpdateDogData, program_id: &Pubkey) -> Self {
        Self {
            admin,
            dog,
            program_id: *program_id,
            data,
        }
    }

    pub fn create_account_metas(&self) -> [AccountMeta; 2] {
        [
            AccountMeta::new_readonly(self.admin, true),
            AccountMeta::new(self.dog, false),
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

impl From<UpdateDog> for Instruction {
    fn from(value: UpdateDog) -> Self {
        value.instruction()
    }
}
