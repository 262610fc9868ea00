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
    pda::{
        find_donation_address,
        find_platform_address,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonateData {
    /// The amount to transfer to the treasury, in lamports.
    pub amount: u64,
    pub message: String,
    /// The donor's idempotency key for this donation. Part of the donation record's address.
    pub timestamp: i64,
}

packable_struct!(DonateData {
    amount,
    message,
    timestamp,
});

impl InstructionData for DonateData {
    const TAG: InstructionTag = InstructionTag::Donate;
}

/// Transfers `amount` lamports from the donor to the treasury, writes a donation record at the
/// address derived from `(donor, timestamp)`, and adds the amount to the dog's and platform's
/// running totals.
///
/// Fails at the ledger if a donation record already exists for the same donor and timestamp.
///
/// ### Accounts
///  0. `[WRITE, SIGNER]` Donor account, pays the donation and the record's rent
///  1. `[WRITE]` Platform account
///  2. `[WRITE]` Dog account
///  3. `[WRITE]` Donation account
///  4. `[WRITE]` Treasury account
///  5. `[READ]` System program
///
/// The donation address is derived from the donor and `data.timestamp` in [`Donate::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Donate {
    donor: Pubkey,
    /// The platform PDA.
    platform: Pubkey,
    /// The existing dog account receiving the donation.
    dog: Pubkey,
    /// The donation PDA derived from the donor and `data.timestamp`.
    donation: Pubkey,
    /// Must match the platform's recorded treasury.
    treasury: Pubkey,
    program_id: Pubkey,
    data: DonateData,
}

impl Donate {
    pub fn new(
        donor: Pubkey,
        dog: Pubkey,
        treasury: Pubkey,
        data: DonateData,
        program_id: &Pubkey,
    ) -> Self {
        Self {
            donor,
            platform: find_platform_address(program_id).0,
            dog,
            donation: find_donation_address(&donor, data.timestamp, program_id).0,
            treasury,
            program_id: *program_id,
            data,
        }
    }

    pub fn donor(&self) -> &Pubkey {
        &self.donor
    }

    pub fn platform(&self) -> &Pubkey {
        &self.platform
    }

    pub fn dog(&self) -> &Pubkey {
        &self.dog
    }

    pub fn donation(&self) -> &Pubkey {
        &self.donation
    }

    pub fn treasury(&self) -> &Pubkey {
        &self.treasury
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn data(&self) -> &DonateData {
        &self.data
    }

    pub fn create_account_metas(&self) -> [AccountMeta; 6] {
        [
            AccountMeta::new(self.donor, true),
            AccountMeta::new(self.platform, false),
            AccountMeta::new(self.dog, false),
            AccountMeta::new(self.donation, false),
            AccountMeta::new(self.treasury, false),
            AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        ]
    }

    pub fn pack_instruction_data(&self) -> Vec<u8> {
        // Instruction data layout:
        //   - [0..8]: the instruction discriminator
        //   - [8..16]: the u64 amount
        //   - [16..20 + len]: the length prefixed message
        //   - [20 + len..28 + len]: the i64 timestamp
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

impl From<Donate> for Instruction {
    fn from(value: Donate) -> Self {
        value.instruction()
    }
}
