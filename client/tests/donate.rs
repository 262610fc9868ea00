use solana_sdk::{
    message::Message,
    signature::Signer,
};
use solana_transaction_error::TransactionError;
use woofi_client::{
    local_ledger::fixture::WoofiFixture,
    RuntimeRejection,
};
use woofi_interface::{
    error::WoofiProgramError,
    instructions::DonateData,
    state::{
        AccountState,
        Donation,
    },
};

const HALF_SOL: u64 = 500_000_000;
const ONE_SOL: u64 = 1_000_000_000;

fn donation(amount: u64, timestamp: i64) -> DonateData {
    DonateData {
        amount,
        message: "Good boy!".to_string(),
        timestamp,
    }
}

#[tokio::test]
async fn donate() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let donor = fixture.funded_keypair();

    let donor_before = fixture.lamports(&donor.pubkey());
    let treasury_before = fixture.lamports(&fixture.treasury);

    fixture
        .client
        .donate(&donor, rex, fixture.treasury, donation(HALF_SOL, 1_700_000_000))
        .await?;

    // The amount lands in the treasury and the donor also pays the record's rent.
    let rent = fixture.ledger().rent().minimum_balance(Donation::SPACE);
    assert_eq!(fixture.lamports(&fixture.treasury), treasury_before + HALF_SOL);
    assert_eq!(
        fixture.lamports(&donor.pubkey()),
        donor_before - HALF_SOL - rent
    );

    let dog = fixture.client.get_dog(&rex).await?;
    assert_eq!(dog.total_donations, HALF_SOL);
    let platform = fixture.client.get_platform().await?;
    assert_eq!(platform.total_donations, HALF_SOL);
    assert_eq!(platform.donation_count, 1);

    let address = fixture
        .client
        .donation_address(&donor.pubkey(), 1_700_000_000);
    let record = fixture.client.get_donation(&address).await?;
    assert_eq!(
        record,
        Donation {
            donor: donor.pubkey(),
            dog_id: rex,
            amount: HALF_SOL,
            timestamp: 1_700_000_000,
            message: "Good boy!".to_string(),
        }
    );

    Ok(())
}

#[tokio::test]
async fn donate_twice_with_the_same_timestamp() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let donor = fixture.funded_keypair();

    fixture
        .client
        .donate(&donor, rex, fixture.treasury, donation(HALF_SOL, 42))
        .await?;
    let treasury_before = fixture.lamports(&fixture.treasury);

    let err = fixture
        .client
        .donate(&donor, rex, fixture.treasury, donation(HALF_SOL, 42))
        .await
        .unwrap_err();
    assert_eq!(err.rejection(), Some(RuntimeRejection::AccountAlreadyExists));

    // The rejected donation moved nothing and counted nothing.
    assert_eq!(fixture.lamports(&fixture.treasury), treasury_before);
    let platform = fixture.client.get_platform().await?;
    assert_eq!(platform.total_donations, HALF_SOL);
    assert_eq!(platform.donation_count, 1);
    assert_eq!(fixture.client.get_dog(&rex).await?.total_donations, HALF_SOL);

    // A different timestamp is a different record.
    fixture
        .client
        .donate(&donor, rex, fixture.treasury, donation(HALF_SOL, 43))
        .await?;
    assert_eq!(fixture.client.get_platform().await?.donation_count, 2);

    Ok(())
}

#[tokio::test]
async fn donate_rejects_zero_amount() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let donor = fixture.funded_keypair();
    let donor_before = fixture.lamports(&donor.pubkey());

    let err = fixture
        .client
        .donate(&donor, rex, fixture.treasury, donation(0, 1))
        .await
        .unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(RuntimeRejection::Program(WoofiProgramError::InvalidAmount))
    );

    // The whole transaction rolled back, including the record's creation.
    let address = fixture.client.donation_address(&donor.pubkey(), 1);
    assert!(fixture.ledger().account(&address).is_none());
    assert_eq!(fixture.lamports(&donor.pubkey()), donor_before);

    Ok(())
}

#[tokio::test]
async fn donate_rejects_foreign_treasury() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let donor = fixture.funded_keypair();
    let impostor = fixture.funded_keypair().pubkey();

    let err = fixture
        .client
        .donate(&donor, rex, impostor, donation(HALF_SOL, 1))
        .await
        .unwrap_err();
    assert_eq!(err.rejection(), Some(RuntimeRejection::AuthorityMismatch));
    assert_eq!(fixture.client.get_platform().await?.donation_count, 0);

    Ok(())
}

#[tokio::test]
async fn donate_more_than_the_donor_holds() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let donor = fixture.ledger().funded_keypair(HALF_SOL);

    let err = fixture
        .client
        .donate(&donor, rex, fixture.treasury, donation(HALF_SOL, 1))
        .await
        .unwrap_err();
    assert_eq!(err.rejection(), Some(RuntimeRejection::InsufficientFunds));
    assert_eq!(fixture.lamports(&donor.pubkey()), HALF_SOL);

    Ok(())
}

#[tokio::test]
async fn list_donations() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let luna = fixture.add_sample_dog("Luna").await?;
    let alice = fixture.funded_keypair();
    let bob = fixture.funded_keypair();

    let treasury = fixture.treasury;
    fixture.client.donate(&alice, rex, treasury, donation(ONE_SOL, 1)).await?;
    fixture.client.donate(&alice, luna, treasury, donation(2 * ONE_SOL, 2)).await?;
    fixture.client.donate(&bob, rex, treasury, donation(3 * ONE_SOL, 1)).await?;

    let by_alice = fixture.client.get_donations_by_donor(&alice.pubkey()).await?;
    assert_eq!(by_alice.len(), 2);
    assert!(by_alice.iter().all(|(_, d)| d.donor == alice.pubkey()));

    let mut for_rex: Vec<u64> = fixture
        .client
        .get_donations_for_dog(&rex)
        .await?
        .into_iter()
        .map(|(_, d)| d.amount)
        .collect();
    for_rex.sort();
    assert_eq!(for_rex, vec![ONE_SOL, 3 * ONE_SOL]);

    assert_eq!(fixture.client.get_dog(&rex).await?.total_donations, 4 * ONE_SOL);
    assert_eq!(fixture.client.get_dog(&luna).await?.total_donations, 2 * ONE_SOL);
    let platform = fixture.client.get_platform().await?;
    assert_eq!(platform.total_donations, 6 * ONE_SOL);
    assert_eq!(platform.donation_count, 3);

    // Dog listings aren't polluted by donation records.
    assert_eq!(fixture.client.get_all_dogs().await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn donate_below_the_treasury_rent_minimum() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let donor = fixture.funded_keypair();
    let minimum = fixture.ledger().rent().minimum_balance(0);

    // The empty treasury would be left funded but below its rent exempt minimum.
    let ix = fixture
        .client
        .donate_instruction(donor.pubkey(), rex, fixture.treasury, donation(1_000, 1));
    let err = fixture
        .client
        .submit(&[&donor], &[ix.clone()])
        .await
        .unwrap_err();
    let Some(&TransactionError::InsufficientFundsForRent { account_index }) =
        err.transaction_error()
    else {
        panic!("expected a rent rejection, got {err}");
    };
    let message = Message::new(&[ix], Some(&fixture.client.payer().pubkey()));
    assert_eq!(message.account_keys[account_index as usize], fixture.treasury);
    assert_eq!(err.rejection(), Some(RuntimeRejection::InsufficientFunds));

    assert_eq!(fixture.lamports(&fixture.treasury), 0);
    assert_eq!(fixture.client.get_platform().await?.donation_count, 0);

    // Exactly the minimum is accepted, and once exempt the treasury takes any amount.
    fixture
        .client
        .donate(&donor, rex, fixture.treasury, donation(minimum, 2))
        .await?;
    fixture
        .client
        .donate(&donor, rex, fixture.treasury, donation(1_000, 3))
        .await?;
    assert_eq!(fixture.lamports(&fixture.treasury), minimum + 1_000);

    Ok(())
}
