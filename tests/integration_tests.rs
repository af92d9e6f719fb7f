//! Integration tests for the claimdrop protocol.
//!
//! These tests verify the complete lifecycle of claim events: creation,
//! entitlement bookkeeping, claiming against custody, and disabling.

use claimdrop::auth::RoleTable;
use claimdrop::core::config::ProtocolConfig;
use claimdrop::core::types::{AssetRef, EventKind, TokenTypeId, WalletId};
use claimdrop::custody::{CustodyAsset, InMemoryCustody};
use claimdrop::error::Error;
use claimdrop::protocol::ClaimProtocol;

// ═══════════════════════════════════════════════════════════════════════════════
// TEST HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

fn asset() -> AssetRef {
    AssetRef::new("collection-1")
}

fn manager() -> WalletId {
    WalletId::new("manager")
}

fn setup() -> ClaimProtocol<InMemoryCustody, RoleTable> {
    let mut roles = RoleTable::new();
    roles.grant_all(manager());
    ClaimProtocol::new(InMemoryCustody::new(), roles, ProtocolConfig::default()).unwrap()
}

fn fund(protocol: &mut ClaimProtocol<InMemoryCustody, RoleTable>, token: &str, amount: u64) {
    let vault = protocol.config().custody_wallet.clone();
    protocol
        .custody_mut()
        .fund(&asset(), &vault, &TokenTypeId::new(token), amount);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SIMPLE EVENT LIFECYCLE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_full_simple_lifecycle() {
    let mut protocol = setup();
    let alice: WalletId = "alice".into();
    let bob: WalletId = "bob".into();

    // Step 1: register the event and fund custody
    let id = protocol
        .create_simple_event(&manager(), asset(), "10000001".into())
        .unwrap();
    fund(&mut protocol, "10000001", 80);

    // Step 2: grant entitlements
    protocol
        .set_entitlement_batch(
            &manager(),
            EventKind::Simple,
            id,
            &[alice.clone(), bob.clone()],
            &[50, 50],
        )
        .unwrap();

    // Step 3: alice claims her full entitlement
    assert_eq!(protocol.claim(&alice, EventKind::Simple, id).unwrap(), 50);
    assert_eq!(protocol.entitlement(EventKind::Simple, id, &alice), 0);

    // Step 4: bob gets what custody still holds
    assert_eq!(protocol.claim(&bob, EventKind::Simple, id).unwrap(), 30);
    assert_eq!(protocol.entitlement(EventKind::Simple, id, &bob), 20);

    // Step 5: custody is drained; bob's remainder waits for funding
    let err = protocol.claim(&bob, EventKind::Simple, id).unwrap_err();
    assert!(matches!(err, Error::CustodyEmpty { .. }));
    assert!(err.is_recoverable());

    // Step 6: refill and finish
    fund(&mut protocol, "10000001", 100);
    assert_eq!(protocol.claim(&bob, EventKind::Simple, id).unwrap(), 20);

    // Step 7: nothing left to claim for either wallet
    let err = protocol.claim(&alice, EventKind::Simple, id).unwrap_err();
    assert!(matches!(err, Error::NothingToClaim { .. }));

    // Step 8: disable the event
    protocol
        .disable_event(&manager(), EventKind::Simple, id)
        .unwrap();
    assert!(protocol.list_active_events(EventKind::Simple).is_empty());
}

#[test]
fn test_claims_never_exceed_cumulative_grants() {
    let mut protocol = setup();
    let alice: WalletId = "alice".into();

    let id = protocol
        .create_simple_event(&manager(), asset(), "10000001".into())
        .unwrap();
    fund(&mut protocol, "10000001", 1_000);

    // Grant 40, then overwrite with 25: the overwrite is not additive
    protocol
        .set_entitlement(&manager(), EventKind::Simple, id, alice.clone(), 40)
        .unwrap();
    protocol
        .set_entitlement(&manager(), EventKind::Simple, id, alice.clone(), 25)
        .unwrap();

    let mut received = 0;
    while let Ok(claimed) = protocol.claim(&alice, EventKind::Simple, id) {
        received += claimed;
    }
    assert_eq!(received, 25);

    let vault_left = protocol.custody().balance_of(
        &asset(),
        &protocol.config().custody_wallet,
        &"10000001".into(),
    );
    assert_eq!(vault_left, 975);
}

// ═══════════════════════════════════════════════════════════════════════════════
// RANDOM EVENT LIFECYCLE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_full_random_lifecycle() {
    let mut protocol = setup();
    let alice: WalletId = "alice".into();

    let pool: Vec<TokenTypeId> = vec![
        "20000001".into(),
        "20000002".into(),
        "20000003".into(),
        "20000004".into(),
        "20000005".into(),
    ];
    let id = protocol
        .create_random_event(&manager(), asset(), pool.clone())
        .unwrap();
    for token in ["20000001", "20000002", "20000003", "20000004", "20000005"] {
        fund(&mut protocol, token, 100);
    }

    protocol
        .set_entitlement(&manager(), EventKind::Random, id, alice.clone(), 7)
        .unwrap();

    // Capacity far exceeds the entitlement: the claim is fully satisfied
    let claimed = protocol.claim(&alice, EventKind::Random, id).unwrap();
    assert_eq!(claimed, 7);
    assert_eq!(protocol.entitlement(EventKind::Random, id, &alice), 0);

    // Whatever the allocation looked like, alice received exactly 7 units
    let received: u64 = pool
        .iter()
        .map(|t| protocol.custody().balance_of(&asset(), &alice, t))
        .sum();
    assert_eq!(received, 7);

    let err = protocol.claim(&alice, EventKind::Random, id).unwrap_err();
    assert!(matches!(err, Error::NothingToClaim { .. }));
}

#[test]
fn test_random_claim_drains_short_pool() {
    let mut protocol = setup();
    let alice: WalletId = "alice".into();

    let pool: Vec<TokenTypeId> =
        vec!["a".into(), "b".into(), "c".into(), "d".into()];
    let id = protocol
        .create_random_event(&manager(), asset(), pool.clone())
        .unwrap();
    for (token, amount) in [("a", 21u64), ("b", 4), ("c", 5), ("d", 13)] {
        fund(&mut protocol, token, amount);
    }

    protocol
        .set_entitlement(&manager(), EventKind::Random, id, alice.clone(), 200)
        .unwrap();

    // Total capacity is 43 against an entitlement of 200: everything on
    // hand is transferred and the remainder stays claimable
    let claimed = protocol.claim(&alice, EventKind::Random, id).unwrap();
    assert_eq!(claimed, 43);
    assert_eq!(protocol.entitlement(EventKind::Random, id, &alice), 157);

    let vault = protocol.config().custody_wallet.clone();
    for token in &pool {
        assert_eq!(protocol.custody().balance_of(&asset(), &vault, token), 0);
    }

    // Later funding lets the remainder be claimed
    fund(&mut protocol, "b", 60);
    let claimed = protocol.claim(&alice, EventKind::Random, id).unwrap();
    assert_eq!(claimed, 60);
    assert_eq!(protocol.entitlement(EventKind::Random, id, &alice), 97);
}

#[test]
fn test_random_event_requires_nonempty_pool() {
    let mut protocol = setup();
    let err = protocol
        .create_random_event(&manager(), asset(), vec![])
        .unwrap_err();
    assert_eq!(err, Error::EmptyTokenPool);
}

// ═══════════════════════════════════════════════════════════════════════════════
// BATCH AND INDEX SEMANTICS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_failing_batch_is_atomic() {
    let mut protocol = setup();
    let id = protocol
        .create_simple_event(&manager(), asset(), "10000001".into())
        .unwrap();

    // B's amount is zero: the whole batch must abort with nothing applied
    let err = protocol
        .set_entitlement_batch(
            &manager(),
            EventKind::Simple,
            id,
            &["wallet-a".into(), "wallet-b".into()],
            &[10, 0],
        )
        .unwrap_err();
    assert_eq!(err, Error::ZeroAmount);
    assert_eq!(
        protocol.entitlement(EventKind::Simple, id, &"wallet-a".into()),
        0
    );
}

#[test]
fn test_disable_unknown_event_leaves_index_unchanged() {
    let mut protocol = setup();
    let keep = protocol
        .create_simple_event(&manager(), asset(), "10000001".into())
        .unwrap();
    let gone = protocol
        .create_simple_event(&manager(), asset(), "10000002".into())
        .unwrap();
    protocol
        .disable_event(&manager(), EventKind::Simple, gone)
        .unwrap();

    // Disabling again, and disabling an id that never existed, both fail
    for id in [gone, claimdrop::core::types::EventId::new(77)] {
        let err = protocol
            .disable_event(&manager(), EventKind::Simple, id)
            .unwrap_err();
        assert!(matches!(err, Error::EventNotFound { .. }));
    }
    assert_eq!(protocol.list_active_events(EventKind::Simple), vec![keep]);
}

#[test]
fn test_ids_are_independent_per_kind() {
    let mut protocol = setup();

    let s0 = protocol
        .create_simple_event(&manager(), asset(), "10000001".into())
        .unwrap();
    let r0 = protocol
        .create_random_event(&manager(), asset(), vec!["a".into()])
        .unwrap();

    assert_eq!(s0.value(), 0);
    assert_eq!(r0.value(), 0);

    // Disabling the Simple event must not touch the Random index
    protocol
        .disable_event(&manager(), EventKind::Simple, s0)
        .unwrap();
    assert_eq!(protocol.list_active_events(EventKind::Random), vec![r0]);
}

// ═══════════════════════════════════════════════════════════════════════════════
// DEPOSIT GATE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_deposit_flow_through_whitelist() {
    let mut protocol = setup();
    let depositor: WalletId = "depositor".into();
    let vault = protocol.config().custody_wallet.clone();
    let token: TokenTypeId = "10000001".into();

    protocol
        .custody_mut()
        .fund(&asset(), &depositor, &token, 500);

    // Not whitelisted: the incoming transfer is rejected outright
    let gate = protocol.deposit_gate().clone();
    let err = protocol
        .custody_mut()
        .deposit(&gate, &asset(), &depositor, &vault, &token, 500)
        .unwrap_err();
    assert!(matches!(err, Error::DepositorNotWhitelisted(_)));

    // Whitelisted by the administrator: the deposit lands
    protocol
        .allow_depositor(&manager(), depositor.clone())
        .unwrap();
    let gate = protocol.deposit_gate().clone();
    protocol
        .custody_mut()
        .deposit(&gate, &asset(), &depositor, &vault, &token, 500)
        .unwrap();
    assert_eq!(
        protocol.custody().balance_of(&asset(), &vault, &token),
        500
    );

    // Revoked: further deposits are rejected again
    protocol
        .revoke_depositor(&manager(), &depositor)
        .unwrap();
    assert!(!protocol.is_whitelisted(&depositor));
}
