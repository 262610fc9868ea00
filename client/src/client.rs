//! The client facade: one call per `woofi` operation plus typed account reads.

use solana_account::Account;
use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use solana_sdk::signature::{
    Keypair,
    Signature,
    Signer,
};
use woofi_interface::{
    error::WoofiError,
    instructions::{
        AddDog,
        AddDogData,
        Donate,
        DonateData,
        InitializePlatform,
        UpdateDog,
        UpdateDogData,
        WithdrawFunds,
    },
    pda::{
        find_dog_address,
        find_donation_address,
        find_platform_address,
    },
    state::{
        donation::{
            DONATION_DOG_OFFSET,
            DONATION_DONOR_OFFSET,
        },
        AccountState,
        Dog,
        Donation,
        Platform,
        WoofiAccount,
    },
};

use crate::{
    config::WoofiConfig,
    connection::{
        AccountFilter,
        LedgerConnection,
        RpcConnection,
    },
    error::{
        ClientError,
        ClientResult,
    },
};

/// The wall clock Unix time in seconds, for callers that want a default donation timestamp.
///
/// The timestamp is the donor's idempotency key: two donations from the same donor with the same
/// timestamp address the same record and the second is rejected.
pub fn current_donation_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// A connection, a fee payer and the program id, bound together for the lifetime of the client.
///
/// The client holds no other state, so it can be shared across tasks.
pub struct WoofiClient<C> {
    connection: C,
    payer: Keypair,
    program_id: Pubkey,
}

impl WoofiClient<RpcConnection> {
    pub fn from_config(config: &WoofiConfig, payer: Keypair) -> Self {
        Self::new(RpcConnection::new(config), payer, config.program_id)
    }
}

impl<C: LedgerConnection> WoofiClient<C> {
    pub fn new(connection: C, payer: Keypair, program_id: Pubkey) -> Self {
        Self {
            connection,
            payer,
            program_id,
        }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn platform_address(&self) -> Pubkey {
        find_platform_address(&self.program_id).0
    }

    pub fn dog_address(&self, name: &str) -> ClientResult<Pubkey> {
        find_dog_address(name, &self.program_id)
            .map(|(address, _)| address)
            .map_err(ClientError::DerivationInputInvalid)
    }

    pub fn donation_address(&self, donor: &Pubkey, timestamp: i64) -> Pubkey {
        find_donation_address(donor, timestamp, &self.program_id).0
    }

    pub fn initialize_platform_instruction(&self, admin: Pubkey, treasury: Pubkey) -> Instruction {
        InitializePlatform::new(admin, treasury, &self.program_id).into()
    }

    pub fn add_dog_instruction(
        &self,
        admin: Pubkey,
        data: AddDogData,
    ) -> ClientResult<Instruction> {
        AddDog::new(admin, data, &self.program_id)
            .map(Instruction::from)
            .map_err(ClientError::DerivationInputInvalid)
    }

    pub fn update_dog_instruction(
        &self,
        admin: Pubkey,
        dog: Pubkey,
        data: UpdateDogData,
    ) -> Instruction {
        UpdateDog::new(admin, dog, data, &self.program_id).into()
    }

    pub fn donate_instruction(
        &self,
        donor: Pubkey,
        dog: Pubkey,
        treasury: Pubkey,
        data: DonateData,
    ) -> Instruction {
        Donate::new(donor, dog, treasury, data, &self.program_id).into()
    }

    pub fn withdraw_funds_instruction(
        &self,
        admin: Pubkey,
        treasury: Pubkey,
        recipient: Pubkey,
        amount: u64,
    ) -> Instruction {
        WithdrawFunds::new(admin, treasury, recipient, amount, &self.program_id).into()
    }

    /// Submits `instructions` as one transaction paid for by the client's payer and waits for
    /// confirmation.
    pub async fn submit(
        &self,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> ClientResult<Signature> {
        self.connection
            .send_and_confirm(&self.payer, signers, instructions)
            .await
    }

    /// Creates the platform with `admin` as its admin.
    pub async fn initialize_platform(
        &self,
        admin: &Keypair,
        treasury: Pubkey,
    ) -> ClientResult<Signature> {
        let ix = self.initialize_platform_instruction(admin.pubkey(), treasury);
        self.submit(&[admin], &[ix]).await
    }

    pub async fn add_dog(&self, admin: &Keypair, data: AddDogData) -> ClientResult<Signature> {
        let ix = self.add_dog_instruction(admin.pubkey(), data)?;
        self.submit(&[admin], &[ix]).await
    }

    pub async fn update_dog(
        &self,
        admin: &Keypair,
        dog: Pubkey,
        data: UpdateDogData,
    ) -> ClientResult<Signature> {
        let ix = self.update_dog_instruction(admin.pubkey(), dog, data);
        self.submit(&[admin], &[ix]).await
    }

    pub async fn donate(
        &self,
        donor: &Keypair,
        dog: Pubkey,
        treasury: Pubkey,
        data: DonateData,
    ) -> ClientResult<Signature> {
        let ix = self.donate_instruction(donor.pubkey(), dog, treasury, data);
        self.submit(&[donor], &[ix]).await
    }

    pub async fn withdraw_funds(
        &self,
        admin: &Keypair,
        treasury: Pubkey,
        recipient: Pubkey,
        amount: u64,
    ) -> ClientResult<Signature> {
        let ix = self.withdraw_funds_instruction(admin.pubkey(), treasury, recipient, amount);
        self.submit(&[admin], &[ix]).await
    }

    async fn fetch(&self, address: &Pubkey) -> ClientResult<Account> {
        self.connection
            .get_account(address)
            .await?
            .ok_or(ClientError::NotFound(*address))
    }

    fn decode<T: AccountState>(&self, address: &Pubkey, account: &Account) -> ClientResult<T> {
        if account.owner != self.program_id {
            return Err(ClientError::SchemaMismatch {
                address: *address,
                source: WoofiError::InvalidAccountOwner,
            });
        }
        T::try_from_account_data(&account.data).map_err(|source| ClientError::SchemaMismatch {
            address: *address,
            source,
        })
    }

    /// Fetches and decodes the record at `address`.
    pub async fn get_account_state<T: AccountState>(&self, address: &Pubkey) -> ClientResult<T> {
        let account = self.fetch(address).await?;
        self.decode(address, &account)
    }

    /// Fetches the account at `address` and decodes it as whichever record its discriminator
    /// names.
    pub async fn get_account(&self, address: &Pubkey) -> ClientResult<WoofiAccount> {
        let account = self.fetch(address).await?;
        if account.owner != self.program_id {
            return Err(ClientError::SchemaMismatch {
                address: *address,
                source: WoofiError::InvalidAccountOwner,
            });
        }
        WoofiAccount::unpack(&account.data).map_err(|source| ClientError::SchemaMismatch {
            address: *address,
            source,
        })
    }

    pub async fn get_platform(&self) -> ClientResult<Platform> {
        self.get_account_state(&self.platform_address()).await
    }

    pub async fn get_dog(&self, address: &Pubkey) -> ClientResult<Dog> {
        self.get_account_state(address).await
    }

    pub async fn get_dog_by_name(&self, name: &str) -> ClientResult<Dog> {
        self.get_dog(&self.dog_address(name)?).await
    }

    pub async fn get_donation(&self, address: &Pubkey) -> ClientResult<Donation> {
        self.get_account_state(address).await
    }

    /// Fetches every program account whose data starts with `T`'s discriminator and matches
    /// `filters`.
    async fn get_all<T: AccountState>(
        &self,
        filters: Vec<AccountFilter>,
    ) -> ClientResult<Vec<(Pubkey, T)>> {
        let filters = std::iter::once(AccountFilter::Memcmp {
            offset: 0,
            bytes: T::DISCRIMINATOR.to_vec(),
        })
        .chain(filters)
        .collect();

        self.connection
            .get_program_accounts(&self.program_id, filters)
            .await?
            .into_iter()
            .map(|(address, account)| Ok((address, self.decode(&address, &account)?)))
            .collect()
    }

    pub async fn get_all_dogs(&self) -> ClientResult<Vec<(Pubkey, Dog)>> {
        self.get_all(vec![]).await
    }

    pub async fn get_donations_by_donor(
        &self,
        donor: &Pubkey,
    ) -> ClientResult<Vec<(Pubkey, Donation)>> {
        self.get_all(vec![AccountFilter::Memcmp {
            offset: DONATION_DONOR_OFFSET,
            bytes: donor.to_bytes().to_vec(),
        }])
        .await
    }

    pub async fn get_donations_for_dog(
        &self,
        dog: &Pubkey,
    ) -> ClientResult<Vec<(Pubkey, Donation)>> {
        self.get_all(vec![AccountFilter::Memcmp {
            offset: DONATION_DOG_OFFSET,
            bytes: dog.to_bytes().to_vec(),
        }])
        .await
    }

    /// The lamport balance at `address`. Zero when nothing exists there.
    pub async fn get_balance(&self, address: &Pubkey) -> ClientResult<u64> {
        self.connection.get_balance(address).await
    }
}
