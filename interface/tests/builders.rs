use solana_instruction::Instruction;
use woofi_interface::{
    error::WoofiError,
    instructions::{
        AddDog,
        AddDogData,
        Donate,
        DonateData,
        InitializePlatform,
        WoofiInstruction,
    },
    pda::{
        find_dog_address,
        find_donation_address,
        find_platform_address,
    },
    program,
    Pubkey,
};

fn dog_data(name: &str) -> AddDogData {
    AddDogData {
        name: name.to_string(),
        age: 2,
        image_url: "https://example.com/dog.png".to_string(),
        story: "A good dog.".to_string(),
        needs_food: false,
        needs_toys: false,
        needs_medical: false,
        needs_shelter: true,
        needs_other: String::new(),
    }
}

/// Decodes the payload the instruction carries and checks its creation targets against the
/// addresses derived from that payload.
fn assert_targets_match_payload(ix: &Instruction, signer: &Pubkey) {
    let (platform, _) = find_platform_address(&program::ID);
    assert_eq!(ix.accounts[1].pubkey, platform);

    match WoofiInstruction::unpack(&ix.data).unwrap() {
        WoofiInstruction::InitializePlatform(_) => {}
        WoofiInstruction::AddDog(data) => {
            let (dog, _) = find_dog_address(&data.name, &program::ID).unwrap();
            assert_eq!(ix.accounts[2].pubkey, dog);
        }
        WoofiInstruction::Donate(data) => {
            let (donation, _) = find_donation_address(signer, data.timestamp, &program::ID);
            assert_eq!(ix.accounts[3].pubkey, donation);
        }
        other => panic!("{} doesn't create accounts", other.tag()),
    }
}

#[test]
fn creation_targets_follow_the_payload() {
    let admin = Pubkey::new_unique();
    let donor = Pubkey::new_unique();

    let init: Instruction =
        InitializePlatform::new(admin, Pubkey::new_unique(), &program::ID).into();
    assert_targets_match_payload(&init, &admin);

    for name in ["Max", "Bella", "Sir Barks-a-lot"] {
        let add_dog: Instruction = AddDog::new(admin, dog_data(name), &program::ID)
            .unwrap()
            .into();
        assert_targets_match_payload(&add_dog, &admin);
    }

    for timestamp in [i64::MIN, -1, 0, 5, 6, 1_700_000_000] {
        let data = DonateData {
            amount: 1,
            message: String::new(),
            timestamp,
        };
        let dog = Pubkey::new_unique();
        let donate = Donate::new(donor, dog, Pubkey::new_unique(), data, &program::ID);
        assert_eq!(donate.dog(), &dog);
        assert_eq!(donate.data().timestamp, timestamp);
        assert_targets_match_payload(&Instruction::from(donate), &donor);
    }
}

#[test]
fn builders_expose_derived_addresses() {
    let admin = Pubkey::new_unique();
    let add_dog = AddDog::new(admin, dog_data("Max"), &program::ID).unwrap();
    assert_eq!(add_dog.admin(), &admin);
    assert_eq!(add_dog.platform(), &find_platform_address(&program::ID).0);
    assert_eq!(add_dog.dog(), &find_dog_address("Max", &program::ID).unwrap().0);
    assert_eq!(add_dog.data(), &dog_data("Max"));

    let init = InitializePlatform::new(admin, Pubkey::new_unique(), &program::ID);
    assert_eq!(init.platform(), add_dog.platform());
}

#[test]
fn underivable_names_never_produce_an_instruction() {
    let too_long = "x".repeat(33);
    for name in ["", " \t", too_long.as_str()] {
        assert!(matches!(
            AddDog::new(Pubkey::new_unique(), dog_data(name), &program::ID),
            Err(WoofiError::EmptyDogName | WoofiError::SeedTooLong)
        ));
    }
}
