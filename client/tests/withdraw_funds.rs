use solana_instruction_error::InstructionError;
use solana_sdk::signature::{
    Keypair,
    Signer,
};
use solana_transaction_error::TransactionError;
use woofi_client::{
    local_ledger::fixture::WoofiFixture,
    RuntimeRejection,
};
use woofi_interface::{
    error::WoofiProgramError,
    instructions::DonateData,
};

const ONE_SOL: u64 = 1_000_000_000;

/// A platform whose treasury holds `amount` lamports from a single donation.
async fn funded_platform(amount: u64) -> anyhow::Result<WoofiFixture> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let donor = fixture.funded_keypair();
    let data = DonateData {
        amount,
        message: String::new(),
        timestamp: 1,
    };
    fixture
        .client
        .donate(&donor, rex, fixture.treasury, data)
        .await?;
    assert_eq!(fixture.lamports(&fixture.treasury), amount);
    Ok(fixture)
}

#[tokio::test]
async fn withdraw_funds() -> anyhow::Result<()> {
    let fixture = funded_platform(2 * ONE_SOL).await?;
    let recipient = Keypair::new().pubkey();

    fixture
        .client
        .withdraw_funds(&fixture.admin, fixture.treasury, recipient, ONE_SOL)
        .await?;
    assert_eq!(fixture.lamports(&fixture.treasury), ONE_SOL);
    assert_eq!(fixture.lamports(&recipient), ONE_SOL);

    // Drain the rest.
    fixture
        .client
        .withdraw_funds(&fixture.admin, fixture.treasury, recipient, ONE_SOL)
        .await?;
    assert_eq!(fixture.lamports(&fixture.treasury), 0);
    assert_eq!(fixture.lamports(&recipient), 2 * ONE_SOL);

    // Withdrawals never touch the donation totals.
    let platform = fixture.client.get_platform().await?;
    assert_eq!(platform.total_donations, 2 * ONE_SOL);

    Ok(())
}

#[tokio::test]
async fn withdraw_funds_rejects_non_admin() -> anyhow::Result<()> {
    let fixture = funded_platform(ONE_SOL).await?;
    let stranger = fixture.funded_keypair();

    let err = fixture
        .client
        .withdraw_funds(&stranger, fixture.treasury, stranger.pubkey(), ONE_SOL)
        .await
        .unwrap_err();
    assert_eq!(err.rejection(), Some(RuntimeRejection::AuthorityMismatch));
    assert_eq!(fixture.lamports(&fixture.treasury), ONE_SOL);

    Ok(())
}

#[tokio::test]
async fn withdraw_funds_rejects_foreign_treasury() -> anyhow::Result<()> {
    let fixture = funded_platform(ONE_SOL).await?;
    let other = fixture.funded_keypair().pubkey();

    let err = fixture
        .client
        .withdraw_funds(&fixture.admin, other, fixture.admin.pubkey(), ONE_SOL)
        .await
        .unwrap_err();
    assert_eq!(err.rejection(), Some(RuntimeRejection::AuthorityMismatch));

    Ok(())
}

#[tokio::test]
async fn withdraw_more_than_the_treasury_holds() -> anyhow::Result<()> {
    let fixture = funded_platform(ONE_SOL).await?;
    let recipient = Keypair::new().pubkey();

    let err = fixture
        .client
        .withdraw_funds(&fixture.admin, fixture.treasury, recipient, ONE_SOL + 1)
        .await
        .unwrap_err();
    assert_eq!(err.rejection(), Some(RuntimeRejection::InsufficientFunds));
    assert_eq!(fixture.lamports(&fixture.treasury), ONE_SOL);
    assert_eq!(fixture.lamports(&recipient), 0);

    let err = fixture
        .client
        .withdraw_funds(&fixture.admin, fixture.treasury, recipient, 0)
        .await
        .unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(RuntimeRejection::Program(WoofiProgramError::InvalidAmount))
    );

    Ok(())
}

#[tokio::test]
async fn withdraw_from_a_system_owned_treasury() -> anyhow::Result<()> {
    // The program can only debit accounts it owns, so a keypair treasury can receive donations
    // but never be withdrawn from.
    let fixture = WoofiFixture::new();
    let treasury = fixture.funded_keypair().pubkey();
    fixture
        .client
        .initialize_platform(&fixture.admin, treasury)
        .await?;

    let err = fixture
        .client
        .withdraw_funds(&fixture.admin, treasury, fixture.admin.pubkey(), ONE_SOL)
        .await
        .unwrap_err();
    assert_eq!(
        err.transaction_error(),
        Some(&TransactionError::InstructionError(
            0,
            InstructionError::ExternalAccountLamportSpend
        ))
    );
    assert_eq!(err.rejection(), Some(RuntimeRejection::Other));

    Ok(())
}

#[tokio::test]
async fn withdraw_leaving_dust_in_the_treasury() -> anyhow::Result<()> {
    let fixture = funded_platform(ONE_SOL).await?;
    let recipient = Keypair::new().pubkey();

    // A treasury may be drained to zero, but not left funded below its rent exempt minimum.
    let err = fixture
        .client
        .withdraw_funds(&fixture.admin, fixture.treasury, recipient, ONE_SOL - 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err.transaction_error(),
        Some(TransactionError::InsufficientFundsForRent { .. })
    ));
    assert_eq!(err.rejection(), Some(RuntimeRejection::InsufficientFunds));
    assert_eq!(fixture.lamports(&fixture.treasury), ONE_SOL);
    assert_eq!(fixture.lamports(&recipient), 0);

    Ok(())
}
