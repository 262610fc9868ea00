use solana_account::Account;
use solana_pubkey::Pubkey;
use solana_sdk::signature::{
    Keypair,
    Signer,
};
use woofi_interface::instructions::AddDogData;

use crate::{
    client::WoofiClient,
    error::ClientResult,
    local_ledger::LocalLedger,
};

/// 100 SOL.
pub const DEFAULT_AIRDROP: u64 = 100_000_000_000;

/// A [`LocalLedger`] backed client with a funded payer and admin.
pub struct WoofiFixture {
    pub client: WoofiClient<LocalLedger>,
    pub admin: Keypair,
    pub treasury: Pubkey,
}

impl Default for WoofiFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl WoofiFixture {
    /// A fixture with no platform. The treasury is an empty program owned account so that
    /// withdrawals can debit it.
    pub fn new() -> Self {
        let ledger = LocalLedger::default();
        let payer = ledger.funded_keypair(DEFAULT_AIRDROP);
        let admin = ledger.funded_keypair(DEFAULT_AIRDROP);
        let treasury = Keypair::new().pubkey();
        ledger.set_account(
            treasury,
            Account {
                lamports: 0,
                data: vec![],
                owner: *ledger.program_id(),
                executable: false,
                rent_epoch: 0,
            },
        );
        let program_id = *ledger.program_id();

        Self {
            client: WoofiClient::new(ledger, payer, program_id),
            admin,
            treasury,
        }
    }

    /// A fixture whose platform has been initialized by [`WoofiFixture::admin`].
    pub async fn with_platform() -> ClientResult<Self> {
        let fixture = Self::new();
        fixture
            .client
            .initialize_platform(&fixture.admin, fixture.treasury)
            .await?;
        Ok(fixture)
    }

    pub fn ledger(&self) -> &LocalLedger {
        self.client.connection()
    }

    pub fn funded_keypair(&self) -> Keypair {
        self.ledger().funded_keypair(DEFAULT_AIRDROP)
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.ledger()
            .account(address)
            .map_or(0, |account| account.lamports)
    }

    /// Adds [`sample_dog`] as the admin and returns the dog's address.
    pub async fn add_sample_dog(&self, name: &str) -> ClientResult<Pubkey> {
        self.client.add_dog(&self.admin, sample_dog(name)).await?;
        self.client.dog_address(name)
    }

    pub fn admin_pubkey(&self) -> Pubkey {
        self.admin.pubkey()
    }
}

pub fn sample_dog(name: &str) -> AddDogData {
    AddDogData {
        name: name.to_string(),
        age: 3,
        image_url: format!("https://example.com/{}.png", name.to_lowercase()),
        story: format!("{name} was found near the river and is looking for a home."),
        needs_food: true,
        needs_toys: false,
        needs_medical: true,
        needs_shelter: false,
        needs_other: String::new(),
    }
}
