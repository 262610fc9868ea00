use solana_sdk::signature::{
    Keypair,
    Signer,
};
use woofi_client::{
    local_ledger::fixture::WoofiFixture,
    RuntimeRejection,
};
use woofi_interface::{
    error::WoofiProgramError,
    instructions::UpdateDogData,
};

#[tokio::test]
async fn update_dog() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let before = fixture.client.get_dog(&rex).await?;

    let data = UpdateDogData {
        image_url: "https://example.com/rex-adopted.png".to_string(),
        story: "Rex found a home.".to_string(),
        needs_food: false,
        needs_toys: true,
        needs_medical: false,
        needs_shelter: false,
        needs_other: "A long walk".to_string(),
        active: false,
    };
    fixture.client.update_dog(&fixture.admin, rex, data.clone()).await?;

    let after = fixture.client.get_dog(&rex).await?;
    assert_eq!(UpdateDogData::from(&after), data);

    // The identity and the running total are never touched by an update.
    assert_eq!(after.name, before.name);
    assert_eq!(after.age, before.age);
    assert_eq!(after.admin, before.admin);
    assert_eq!(after.total_donations, before.total_donations);

    Ok(())
}

#[tokio::test]
async fn update_dog_rejects_non_admin() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let before = fixture.client.get_dog(&rex).await?;

    let stranger = fixture.funded_keypair();
    let data = UpdateDogData {
        story: "Hijacked".to_string(),
        ..UpdateDogData::from(&before)
    };
    let err = fixture
        .client
        .update_dog(&stranger, rex, data)
        .await
        .unwrap_err();
    assert_eq!(err.rejection(), Some(RuntimeRejection::AuthorityMismatch));
    assert_eq!(fixture.client.get_dog(&rex).await?, before);

    Ok(())
}

#[tokio::test]
async fn update_dog_rejects_blank_story() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let before = fixture.client.get_dog(&rex).await?;

    let data = UpdateDogData {
        story: "\t\n".to_string(),
        ..UpdateDogData::from(&before)
    };
    let err = fixture
        .client
        .update_dog(&fixture.admin, rex, data)
        .await
        .unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(RuntimeRejection::Program(WoofiProgramError::InvalidDogStory))
    );

    Ok(())
}

#[tokio::test]
async fn update_missing_dog() -> anyhow::Result<()> {
    let fixture = WoofiFixture::with_platform().await?;
    let rex = fixture.add_sample_dog("Rex").await?;
    let data = UpdateDogData::from(&fixture.client.get_dog(&rex).await?);

    let nowhere = Keypair::new().pubkey();
    let err = fixture
        .client
        .update_dog(&fixture.admin, nowhere, data)
        .await
        .unwrap_err();
    assert_eq!(err.rejection(), Some(RuntimeRejection::AccountNotFound));

    Ok(())
}
