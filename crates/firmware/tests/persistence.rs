//! Settings and provisioning persistence against the mock filesystem.

use firmware::{provisioning, settings};
use platform::mocks::MockStorage;

#[tokio::test]
async fn settings_round_trip_through_storage() {
    let mut store = MockStorage::new();
    let wanted = settings::DeviceSettings {
        keypad_mode: 62,
        debounce_ms: 80,
        dial_depth: 10,
        long_press_ms: 4_000,
    };

    settings::save(&mut store, &wanted).await.unwrap();
    assert_eq!(settings::load(&mut store).await, wanted);
}

#[tokio::test]
async fn missing_settings_file_loads_defaults() {
    let mut store = MockStorage::new();
    assert_eq!(
        settings::load(&mut store).await,
        settings::DeviceSettings::default()
    );
}

#[tokio::test]
async fn corrupted_settings_blob_loads_defaults() {
    let mut store = MockStorage::new();
    settings::save(&mut store, &settings::DeviceSettings::default())
        .await
        .unwrap();

    // Flip one payload byte so the trailer no longer matches.
    let mut blob: Vec<u8> = store.contents(settings::SETTINGS_PATH).unwrap().to_vec();
    if let Some(byte) = blob.first_mut() {
        *byte ^= 0xFF;
    }
    store.add_file(settings::SETTINGS_PATH, &blob);

    assert_eq!(
        settings::load(&mut store).await,
        settings::DeviceSettings::default()
    );
}

#[tokio::test]
async fn wifi_secrets_round_trip_through_storage() {
    let mut store = MockStorage::new();
    let secrets = provisioning::WifiSecrets::new("HomeNet", "hunter2!").unwrap();

    provisioning::store(&mut store, &secrets).await.unwrap();
    assert_eq!(
        store.contents(provisioning::SECRETS_PATH),
        Some(b"HomeNet\0hunter2!\0".as_slice())
    );
    assert_eq!(provisioning::recover(&mut store).await, secrets);
}

#[tokio::test]
async fn missing_secrets_file_recovers_unprovisioned() {
    let mut store = MockStorage::new();
    let recovered = provisioning::recover(&mut store).await;
    assert!(!recovered.is_provisioned());
}

#[tokio::test]
async fn truncated_secrets_file_recovers_unprovisioned() {
    let mut store = MockStorage::new();
    store.add_file(provisioning::SECRETS_PATH, b"HomeNet");
    let recovered = provisioning::recover(&mut store).await;
    assert!(!recovered.is_provisioned());
}

#[tokio::test]
async fn reprovisioning_overwrites_the_previous_credentials() {
    let mut store = MockStorage::new();
    let first = provisioning::WifiSecrets::new("OldNet", "oldpass").unwrap();
    let second = provisioning::WifiSecrets::new("NewNet", "newpass").unwrap();

    provisioning::store(&mut store, &first).await.unwrap();
    provisioning::store(&mut store, &second).await.unwrap();

    assert_eq!(provisioning::recover(&mut store).await, second);
}
