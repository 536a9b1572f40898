//! End-to-end exercise of the public API across component boundaries: claim-code
//! round trips, derivation, and the full wallet terms-of-service protocol driven
//! through the public façade traits with minimal host-side mock backends.

use std::collections::HashMap;
use std::sync::Mutex;

use time::OffsetDateTime;
use webcash_core::facade::{
    DbBackend, DbOpener, LogBackend, LogOpener, ServerBackend, ServerConnection, ServerFacade,
    StorageFacade, UiBackend, UiFacade, UiSession,
};
use webcash_core::{
    parse_public, parse_secret, serialize_public, serialize_secret, Amount, Error, ErrorKind,
    Public, Secret, WalletContext,
};

struct MockLog;
impl LogBackend for MockLog {}

struct MockLogOpener;
impl LogOpener for MockLogOpener {
    fn open(&self, _url: &str) -> Result<Box<dyn LogBackend>, Error> {
        Ok(Box::new(MockLog))
    }
}

#[derive(Default)]
struct MockDb {
    terms: Mutex<HashMap<Vec<u8>, u64>>,
}
impl DbBackend for MockDb {
    fn any_terms(&self) -> Result<bool, Error> {
        Ok(!self.terms.lock().unwrap().is_empty())
    }
    fn all_terms(&self) -> Result<Vec<(Vec<u8>, u64)>, Error> {
        Ok(self
            .terms
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect())
    }
    fn terms_accepted(&self, text: &[u8]) -> Result<u64, Error> {
        Ok(self.terms.lock().unwrap().get(text).copied().unwrap_or(0))
    }
    fn accept_terms(&mut self, text: &[u8], now: u64) -> Result<(), Error> {
        self.terms.lock().unwrap().insert(text.to_vec(), now);
        Ok(())
    }
}

struct MockDbOpener;
impl DbOpener for MockDbOpener {
    fn open(&self, _url: &str) -> Result<Box<dyn DbBackend>, Error> {
        Ok(Box::new(MockDb::default()))
    }
}

struct MockConnection {
    terms: Vec<u8>,
}
impl ServerConnection for MockConnection {
    fn get_terms(&self) -> Result<Vec<u8>, Error> {
        Ok(self.terms.clone())
    }
}

struct MockServer {
    terms: Vec<u8>,
}
impl ServerBackend for MockServer {
    fn connect(&self) -> Result<Box<dyn ServerConnection>, Error> {
        Ok(Box::new(MockConnection {
            terms: self.terms.clone(),
        }))
    }
}

struct MockSession {
    accept: bool,
}
impl UiSession for MockSession {
    fn show_terms(&mut self, _text: &[u8]) -> Result<bool, Error> {
        Ok(self.accept)
    }
}

struct MockUi {
    accept: bool,
}
impl UiBackend for MockUi {
    fn startup(&self) -> Result<Box<dyn UiSession>, Error> {
        Ok(Box::new(MockSession {
            accept: self.accept,
        }))
    }
}

/// Installs a `tracing` subscriber so the façade/wallet diagnostic events emitted during
/// this test run are visible with `cargo test -- --nocapture`. Safe to call from every
/// test: a second installation attempt is simply ignored.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn build_wallet(terms: &[u8], accept: bool) -> WalletContext {
    let storage =
        StorageFacade::open(&MockLogOpener, &MockDbOpener, "log://mem", "db://mem").unwrap();
    let mut server = ServerFacade::new(Box::new(MockServer {
        terms: terms.to_vec(),
    }));
    server.connect().unwrap();
    let mut ui = UiFacade::new(Box::new(MockUi { accept }));
    ui.startup().unwrap();
    WalletContext::new(storage, server, ui)
}

#[test]
fn terms_of_service_flow_accepts_then_rejects_mutation() {
    init_tracing();
    let mut wallet = build_wallet(b"foo", true);
    assert!(!wallet.have_accepted_terms().unwrap());

    let (text, accepted, when) = wallet.ensure_terms().unwrap();
    assert_eq!(text, b"foo");
    assert!(accepted);
    assert!(when.unwrap() >= OffsetDateTime::UNIX_EPOCH);
    assert!(wallet.have_accepted_terms().unwrap());

    wallet.release();
}

#[test]
fn terms_of_service_flow_rejection_can_be_retried() {
    init_tracing();
    let mut wallet = build_wallet(b"bar", false);
    let (_, accepted, _) = wallet.ensure_terms().unwrap();
    assert!(!accepted);
    let (_, accepted_again, _) = wallet.ensure_terms().unwrap();
    assert!(!accepted_again);
    wallet.release();
}

#[test]
fn secret_and_public_claim_codes_round_trip_through_the_wire_format() {
    let secret = Secret::from_bytes_copy(Amount::from_scaled(1234567800), b"abc").unwrap();
    let code = serialize_secret(&secret).unwrap();
    assert_eq!(code, b"e12.345678:secret:abc");

    let (parsed_secret, noncanonical) = parse_secret(&code).unwrap();
    assert!(!noncanonical);
    assert_eq!(parsed_secret.amount(), secret.amount());

    let public = webcash_core::public_from_secret(&parsed_secret).unwrap();
    let public_code = serialize_public(&public).unwrap();
    let (parsed_public, noncanonical): (Public, bool) = parse_public(&public_code).unwrap();
    assert!(!noncanonical);
    assert_eq!(parsed_public, public);
}

#[test]
fn derive_many_agrees_with_repeated_derive_one_end_to_end() {
    let root = [0x5au8; 32];
    let many = webcash_core::derive_many(&root, 42, 10, 23);
    let expected: Vec<String> = (10..33)
        .map(|depth| webcash_core::derive_one(&root, 42, depth))
        .collect();
    assert_eq!(many, expected);
}

#[test]
fn amount_parse_rejects_and_accepts_per_spec_scenario_one() {
    let (amount, noncanonical) = Amount::parse("1.10000000").unwrap();
    assert_eq!(amount.to_scaled(), 110_000_000);
    assert!(noncanonical);
    assert_eq!(
        Amount::parse("\"1.0\"").unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
}
