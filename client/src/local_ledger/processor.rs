use std::collections::{
    HashMap,
    HashSet,
};

use solana_account::Account;
use solana_instruction::AccountMeta;
use solana_instruction_error::InstructionError;
use solana_pubkey::Pubkey;
use solana_sdk::rent::Rent;
use woofi_interface::{
    error::{
        WoofiError,
        WoofiProgramError,
    },
    instructions::{
        AddDogData,
        DonateData,
        InitializePlatformData,
        UpdateDogData,
        WithdrawFundsData,
        WoofiInstruction,
    },
    dog_seeds,
    pda::{
        find_donation_address,
        find_platform_address,
    },
    seeds::MAX_SEED_LEN,
    state::{
        AccountState,
        Dog,
        Donation,
        Platform,
        DISCRIMINATOR_LEN,
    },
};

use crate::{
    error::codes,
    local_ledger::system_account,
};

type ProcessResult<T = ()> = Result<T, InstructionError>;

const fn custom(code: u32) -> InstructionError {
    InstructionError::Custom(code)
}

const fn program_error(error: WoofiProgramError) -> InstructionError {
    InstructionError::Custom(error.code())
}

/// The accounts and signatures visible to a single instruction.
pub(super) struct InvokeContext<'a> {
    pub program_id: &'a Pubkey,
    pub rent: &'a Rent,
    pub accounts: &'a mut HashMap<Pubkey, Account>,
    pub signed: &'a HashSet<Pubkey>,
    pub metas: &'a [AccountMeta],
}

impl InvokeContext<'_> {
    pub fn process(&mut self, data: &[u8]) -> ProcessResult {
        let instruction = WoofiInstruction::unpack(data).map_err(|e| match e {
            WoofiError::InsufficientByteLength if data.len() < DISCRIMINATOR_LEN => {
                custom(codes::INSTRUCTION_MISSING)
            }
            WoofiError::InvalidInstructionTag => custom(codes::INSTRUCTION_FALLBACK_NOT_FOUND),
            _ => custom(codes::INSTRUCTION_DID_NOT_DESERIALIZE),
        })?;

        match instruction {
            WoofiInstruction::InitializePlatform(args) => self.initialize_platform(args),
            WoofiInstruction::AddDog(args) => self.add_dog(args),
            WoofiInstruction::UpdateDog(args) => self.update_dog(args),
            WoofiInstruction::Donate(args) => self.donate(args),
            WoofiInstruction::WithdrawFunds(args) => self.withdraw_funds(args),
        }
    }

    fn initialize_platform(&mut self, args: InitializePlatformData) -> ProcessResult {
        let admin = self.signer(0)?;
        let platform = self.writable(1)?;
        self.expect_seeds(&platform, &find_platform_address(self.program_id).0)?;

        self.create(&admin, &platform, &Platform::new(admin, args.treasury))
    }

    fn add_dog(&mut self, args: AddDogData) -> ProcessResult {
        let admin = self.signer(0)?;
        let platform_address = self.writable(1)?;
        self.expect_seeds(&platform_address, &find_platform_address(self.program_id).0)?;
        let mut platform: Platform = self.load(&platform_address)?;
        if admin != platform.admin {
            return Err(program_error(WoofiProgramError::Unauthorized));
        }

        let dog_address = self.writable(2)?;
        // Blank names are still valid seeds. Only an overlong name can't match any address.
        if args.name.len() > MAX_SEED_LEN {
            return Err(custom(codes::CONSTRAINT_SEEDS));
        }
        let (expected, _) = Pubkey::find_program_address(dog_seeds!(args.name), self.program_id);
        self.expect_seeds(&dog_address, &expected)?;

        if args.name.trim().is_empty() {
            return Err(program_error(WoofiProgramError::InvalidDogName));
        }
        if args.story.trim().is_empty() {
            return Err(program_error(WoofiProgramError::InvalidDogStory));
        }
        if args.image_url.trim().is_empty() {
            return Err(program_error(WoofiProgramError::InvalidImageUrl));
        }

        let dog = Dog {
            name: args.name,
            age: args.age,
            image_url: args.image_url,
            story: args.story,
            needs_food: args.needs_food,
            needs_toys: args.needs_toys,
            needs_medical: args.needs_medical,
            needs_shelter: args.needs_shelter,
            needs_other: args.needs_other,
            total_donations: 0,
            admin,
            active: true,
        };
        self.create(&admin, &dog_address, &dog)?;

        platform.dog_count = platform
            .dog_count
            .checked_add(1)
            .ok_or(InstructionError::ArithmeticOverflow)?;
        self.store(&platform_address, &platform)
    }

    fn update_dog(&mut self, args: UpdateDogData) -> ProcessResult {
        let admin = self.signer(0)?;
        let dog_address = self.writable(1)?;
        let mut dog: Dog = self.load(&dog_address)?;
        if admin != dog.admin {
            return Err(program_error(WoofiProgramError::Unauthorized));
        }

        if args.story.trim().is_empty() {
            return Err(program_error(WoofiProgramError::InvalidDogStory));
        }
        if args.image_url.trim().is_empty() {
            return Err(program_error(WoofiProgramError::InvalidImageUrl));
        }

        dog.image_url = args.image_url;
        dog.story = args.story;
        dog.needs_food = args.needs_food;
        dog.needs_toys = args.needs_toys;
        dog.needs_medical = args.needs_medical;
        dog.needs_shelter = args.needs_shelter;
        dog.needs_other = args.needs_other;
        dog.active = args.active;
        self.store(&dog_address, &dog)
    }

    fn donate(&mut self, args: DonateData) -> ProcessResult {
        let donor = self.signer(0)?;
        self.writable(0)?;
        let platform_address = self.writable(1)?;
        self.expect_seeds(&platform_address, &find_platform_address(self.program_id).0)?;
        let mut platform: Platform = self.load(&platform_address)?;

        let dog_address = self.writable(2)?;
        let mut dog: Dog = self.load(&dog_address)?;

        let donation_address = self.writable(3)?;
        let (expected, _) = find_donation_address(&donor, args.timestamp, self.program_id);
        self.expect_seeds(&donation_address, &expected)?;

        let treasury = self.writable(4)?;
        if treasury != platform.treasury {
            return Err(custom(codes::CONSTRAINT_ADDRESS));
        }

        // The program creates the record during account validation, before any handler check.
        let donation = Donation {
            donor,
            dog_id: dog_address,
            amount: args.amount,
            timestamp: args.timestamp,
            message: args.message,
        };
        self.create(&donor, &donation_address, &donation)?;

        if args.amount == 0 {
            return Err(program_error(WoofiProgramError::InvalidAmount));
        }
        self.system_transfer(&donor, &treasury, args.amount)?;

        dog.total_donations = dog
            .total_donations
            .checked_add(args.amount)
            .ok_or(InstructionError::ArithmeticOverflow)?;
        platform.total_donations = platform
            .total_donations
            .checked_add(args.amount)
            .ok_or(InstructionError::ArithmeticOverflow)?;
        platform.donation_count = platform
            .donation_count
            .checked_add(1)
            .ok_or(InstructionError::ArithmeticOverflow)?;

        self.store(&dog_address, &dog)?;
        self.store(&platform_address, &platform)
    }

    fn withdraw_funds(&mut self, args: WithdrawFundsData) -> ProcessResult {
        let admin = self.signer(0)?;
        let platform_address = self.key(1)?;
        self.expect_seeds(&platform_address, &find_platform_address(self.program_id).0)?;
        let platform: Platform = self.load(&platform_address)?;
        if admin != platform.admin {
            return Err(program_error(WoofiProgramError::Unauthorized));
        }

        let treasury = self.writable(2)?;
        if treasury != platform.treasury {
            return Err(program_error(WoofiProgramError::Unauthorized));
        }
        let recipient = self.writable(3)?;

        if args.amount == 0 {
            return Err(program_error(WoofiProgramError::InvalidAmount));
        }
        if self.lamports(&treasury) < args.amount {
            return Err(program_error(WoofiProgramError::InsufficientFunds));
        }

        self.move_lamports(&treasury, &recipient, args.amount)
    }

    fn key(&self, index: usize) -> ProcessResult<Pubkey> {
        self.metas
            .get(index)
            .map(|meta| meta.pubkey)
            .ok_or(custom(codes::ACCOUNT_NOT_ENOUGH_KEYS))
    }

    fn signer(&self, index: usize) -> ProcessResult<Pubkey> {
        let meta = self
            .metas
            .get(index)
            .ok_or(custom(codes::ACCOUNT_NOT_ENOUGH_KEYS))?;
        if !meta.is_signer || !self.signed.contains(&meta.pubkey) {
            return Err(InstructionError::MissingRequiredSignature);
        }
        Ok(meta.pubkey)
    }

    fn writable(&self, index: usize) -> ProcessResult<Pubkey> {
        let meta = self
            .metas
            .get(index)
            .ok_or(custom(codes::ACCOUNT_NOT_ENOUGH_KEYS))?;
        if !meta.is_writable {
            return Err(custom(codes::CONSTRAINT_MUT));
        }
        Ok(meta.pubkey)
    }

    fn expect_seeds(&self, actual: &Pubkey, expected: &Pubkey) -> ProcessResult {
        if actual != expected {
            return Err(custom(codes::CONSTRAINT_SEEDS));
        }
        Ok(())
    }

    fn lamports(&self, address: &Pubkey) -> u64 {
        self.accounts
            .get(address)
            .map_or(0, |account| account.lamports)
    }

    fn load<T: AccountState>(&self, address: &Pubkey) -> ProcessResult<T> {
        let account = self
            .accounts
            .get(address)
            .filter(|account| account.lamports > 0 || !account.data.is_empty())
            .ok_or(custom(codes::ACCOUNT_NOT_INITIALIZED))?;
        if account.owner != *self.program_id {
            return Err(custom(codes::ACCOUNT_OWNED_BY_WRONG_PROGRAM));
        }
        T::try_from_account_data(&account.data).map_err(|e| match e {
            _ if account.data.len() < DISCRIMINATOR_LEN => {
                custom(codes::ACCOUNT_DISCRIMINATOR_NOT_FOUND)
            }
            WoofiError::InvalidAccountDiscriminant => custom(codes::ACCOUNT_DISCRIMINATOR_MISMATCH),
            _ => custom(codes::ACCOUNT_DID_NOT_DESERIALIZE),
        })
    }

    /// Overwrites a program account's record in place, zeroing the rest of its data.
    fn store<T: AccountState>(&mut self, address: &Pubkey, record: &T) -> ProcessResult {
        let packed = record.to_account_data();
        let account = self
            .accounts
            .get_mut(address)
            .ok_or(custom(codes::ACCOUNT_NOT_INITIALIZED))?;
        if packed.len() > account.data.len() {
            return Err(custom(codes::ACCOUNT_DID_NOT_SERIALIZE));
        }
        account.data[..packed.len()].copy_from_slice(&packed);
        account.data[packed.len()..].fill(0);
        Ok(())
    }

    /// Creates a rent exempt, program owned account at `address` holding `record`, funded by
    /// `payer`.
    fn create<T: AccountState>(
        &mut self,
        payer: &Pubkey,
        address: &Pubkey,
        record: &T,
    ) -> ProcessResult {
        let mut data = record.to_account_data();
        if data.len() > T::SPACE {
            return Err(custom(codes::ACCOUNT_DID_NOT_SERIALIZE));
        }
        data.resize(T::SPACE, 0);

        let prefunded = match self.accounts.get(address) {
            Some(existing)
                if !existing.data.is_empty()
                    || existing.owner != solana_system_interface::program::ID =>
            {
                return Err(custom(codes::SYSTEM_ACCOUNT_ALREADY_IN_USE));
            }
            Some(existing) => existing.lamports,
            None => 0,
        };

        let required = self.rent.minimum_balance(T::SPACE);
        self.system_transfer(payer, address, required.saturating_sub(prefunded))?;

        let lamports = self.lamports(address);
        self.accounts.insert(
            *address,
            Account {
                lamports,
                data,
                owner: *self.program_id,
                executable: false,
                rent_epoch: 0,
            },
        );
        Ok(())
    }

    /// A system program transfer. `from` must be a signing system account holding `amount`.
    fn system_transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> ProcessResult {
        if !self.signed.contains(from) {
            return Err(InstructionError::MissingRequiredSignature);
        }
        let source = self
            .accounts
            .get(from)
            .ok_or(custom(codes::SYSTEM_RESULT_WITH_NEGATIVE_LAMPORTS))?;
        if source.owner != solana_system_interface::program::ID || !source.data.is_empty() {
            return Err(InstructionError::InvalidArgument);
        }
        if source.lamports < amount {
            return Err(custom(codes::SYSTEM_RESULT_WITH_NEGATIVE_LAMPORTS));
        }
        self.shift_lamports(from, to, amount)
    }

    /// A direct lamport debit by the program. Only accounts the program owns can be debited.
    fn move_lamports(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> ProcessResult {
        match self.accounts.get(from) {
            Some(account) if account.owner == *self.program_id => {
                self.shift_lamports(from, to, amount)
            }
            _ => Err(InstructionError::ExternalAccountLamportSpend),
        }
    }

    fn shift_lamports(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> ProcessResult {
        if from == to {
            return Ok(());
        }
        let source = self
            .accounts
            .get_mut(from)
            .ok_or(InstructionError::InsufficientFunds)?;
        source.lamports = source
            .lamports
            .checked_sub(amount)
            .ok_or(InstructionError::InsufficientFunds)?;

        let destination = self
            .accounts
            .entry(*to)
            .or_insert_with(|| system_account(0));
        destination.lamports = destination
            .lamports
            .checked_add(amount)
            .ok_or(InstructionError::ArithmeticOverflow)?;
        Ok(())
    }
}
