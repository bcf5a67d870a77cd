//! Integration tests for the management client.
//!
//! Run with: `cargo test --test test_management -- --ignored`

mod common;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Test reading the registry's examination list.
#[tokio::test]
#[ignore = "Requires network access and environment variables"]
async fn test_get_examination_list() {
    let management = skip_if_no_node!();

    let list = management.get_examination_list().await;
    assert!(list.is_ok(), "get_examination_list should succeed: {:?}", list.err());

    for entry in list.unwrap() {
        // Every registered examination has a real contract address
        assert_ne!(entry.address, alloy::primitives::Address::ZERO);
    }
}

/// Test that subscribing and unsubscribing completes cleanly.
#[tokio::test]
#[ignore = "Requires network access and environment variables"]
async fn test_subscribe_and_unsubscribe() {
    let management = skip_if_no_node!();

    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();

    let subscription = management
        .subscribe_event(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .expect("subscription should open");

    // No deployment was made with this instance's nonce, so nothing arrives
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    subscription.unsubscribe();

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

/// Test message signing against the node-independent recovery path.
#[tokio::test]
#[ignore = "Requires network access and environment variables"]
async fn test_sign_message_recovers_to_hospital() {
    let management = skip_if_no_node!();

    let signature = management.sign_message("integration probe").expect("signing should succeed");
    let recovered =
        hospital_chain::WalletManager::recover_signer("integration probe", &signature).unwrap();

    assert_eq!(recovered, management.hospital_address());
}
