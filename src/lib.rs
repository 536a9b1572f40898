//! webcash-core
//!
//! Core primitives for a hash-preimage digital cash wallet: the canonical amount codec,
//! the secret/public claim-code codec, deterministic tagged-hash serial derivation, the
//! 8-way mining finalizer, and the storage/server/UI façade contracts a host application
//! implements.
//!
//! This crate does not open a database, speak HTTPS, or draw a window. It defines the
//! traits a host implements for those concerns (see [`facade`]) and the pure, allocation-light
//! primitives (amounts, claim codes, derivation, mining) that sit on top of them.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications)]

mod amount;
mod claim_code;
mod derive;
pub mod error;
pub mod facade;
mod mining;
mod nonce_tables;
mod secret;
mod wallet;

pub use amount::Amount;
pub use claim_code::{parse_public, parse_secret, serialize_public, serialize_secret};
pub use derive::{derive_many, derive_one};
pub use error::{Error, ErrorKind};
pub use mining::{mine8, MiningContext};
pub use nonce_tables::{FINAL, NONCES};
pub use secret::{public_from_secret, Public, Secret};
pub use wallet::WalletContext;

/// Forces initialization of the library's process-wide state (the tagged midstate).
///
/// Calling this is never required for correctness — every entry point that needs the
/// midstate initializes it lazily on first use — but a host that wants to pay the
/// (sub-millisecond) initialization cost up front, away from a latency-sensitive code
/// path, may call this during its own startup. Idempotent and safe to call from any
/// thread, any number of times.
pub fn init() {
    derive::tag_midstate();
}
