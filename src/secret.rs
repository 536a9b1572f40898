//! Secret and public value types (C10, part of C2/§3).
//!
//! Grounded on the teacher codebase's `secrecy::SecretVec` usage for wallet key material
//! (`components/database/connection.rs`) and its "key material never leaves a wrapper"
//! design in `components/keystore.rs`.

use secrecy::{ExposeSecret, SecretVec};
use sha2::{Digest, Sha256};

use crate::amount::Amount;
use crate::error::{Error, ErrorKind};

/// A (amount, serial) pair: the private authenticator for a webcash unit.
///
/// A secret is *valid* iff its amount is strictly positive, its serial is present and
/// non-empty, and its serial contains no embedded zero byte. Constructors do not enforce
/// validity — a secret can be constructed, parsed, and inspected in an invalid state;
/// only [`Secret::is_valid`] and operations that require validity check it.
///
/// Serial bytes live behind a [`SecretVec`], so dropping a `Secret` always scrubs them,
/// independent of whether [`Secret::destroy`] was called explicitly.
pub struct Secret {
    amount: Amount,
    serial: Option<SecretVec<u8>>,
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("amount", &self.amount)
            .field("serial", &self.serial.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Secret {
    /// Allocates a fresh secret with an empty serial (preallocated to ~64 bytes) and
    /// amount zero. The result is not valid until both are set to something meaningful.
    pub fn new() -> Self {
        Secret {
            amount: Amount::from_scaled(0),
            serial: Some(SecretVec::new(Vec::with_capacity(64))),
        }
    }

    /// Builds a secret by copying the bytes of a NUL-terminated C string (excluding the
    /// terminator itself).
    pub fn from_c_str(amount: Amount, c_str: &std::ffi::CStr) -> Result<Self, Error> {
        Self::from_bytes_copy(amount, c_str.to_bytes())
    }

    /// Builds a secret, taking ownership of an existing byte buffer.
    pub fn from_bytes(amount: Amount, serial: Vec<u8>) -> Result<Self, Error> {
        Ok(Secret {
            amount,
            serial: Some(SecretVec::new(serial)),
        })
    }

    /// Builds a secret by deep-copying an existing byte slice.
    pub fn from_bytes_copy(amount: Amount, serial: &[u8]) -> Result<Self, Error> {
        Self::from_bytes(amount, serial.to_vec())
    }

    /// Constructs a secret directly from a parsed (amount, serial) pair without
    /// enforcing validity. Used by the claim-code parser, which must succeed even for a
    /// syntactically well-formed but semantically invalid secret (an empty serial, for
    /// instance) — see [`crate::parse_secret`].
    pub(crate) fn from_raw_parts(amount: Amount, serial: Vec<u8>) -> Self {
        Secret {
            amount,
            serial: Some(SecretVec::new(serial)),
        }
    }

    /// The amount half of the pair.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Exposes the serial bytes, or `None` if this secret has been [`destroy`]ed.
    ///
    /// [`destroy`]: Secret::destroy
    pub fn serial_bytes(&self) -> Option<&[u8]> {
        self.serial.as_ref().map(|s| s.expose_secret().as_slice())
    }

    /// True iff amount is strictly positive, the serial is present and non-empty, and
    /// the serial contains no embedded zero byte.
    pub fn is_valid(&self) -> bool {
        self.amount.is_positive()
            && match &self.serial {
                Some(s) => {
                    let bytes = s.expose_secret();
                    !bytes.is_empty() && !bytes.contains(&0)
                }
                None => false,
            }
    }

    /// Scrubs and releases the serial buffer and zeros the amount. Calling `destroy`
    /// twice on the same secret is itself an invalid-argument error (there is nothing
    /// left to destroy the second time).
    pub fn destroy(&mut self) -> Result<(), Error> {
        match self.serial.take() {
            Some(_) => {
                // Dropping the `SecretVec` above already scrubbed the serial bytes.
                self.amount = Amount::from_scaled(0);
                Ok(())
            }
            None => Err(ErrorKind::InvalidArgument.into()),
        }
    }
}

impl Default for Secret {
    fn default() -> Self {
        Self::new()
    }
}

/// A (amount, SHA-256(serial)) pair: the public half of a webcash unit, safe to reveal
/// to anyone (the server holds the same hash; proving ownership means revealing the
/// serial that hashes to it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Public {
    amount: Amount,
    hash: [u8; 32],
}

impl Public {
    /// Builds a public value directly from an amount and a precomputed hash, without
    /// enforcing validity. Used by the claim-code parser.
    pub(crate) fn from_raw_parts(amount: Amount, hash: [u8; 32]) -> Self {
        Public { amount, hash }
    }

    /// The amount half of the pair.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The 32-byte SHA-256 hash of the corresponding secret's serial.
    pub fn hash(&self) -> [u8; 32] {
        self.hash
    }

    /// True iff amount is strictly positive.
    pub fn is_valid(&self) -> bool {
        self.amount.is_positive()
    }
}

/// Derives the public value corresponding to a secret by hashing its serial bytes with
/// plain SHA-256 and copying the amount (C2, "Secret→Public").
///
/// Fails with [`ErrorKind::InvalidArgument`] if the secret has already been destroyed.
pub fn public_from_secret(secret: &Secret) -> Result<Public, Error> {
    let serial = secret
        .serial_bytes()
        .ok_or_else(|| Error::from(ErrorKind::InvalidArgument))?;
    let digest = Sha256::digest(serial);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&digest);
    Ok(Public::from_raw_parts(secret.amount(), hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_secret_is_empty_and_invalid() {
        let s = Secret::new();
        assert_eq!(s.serial_bytes(), Some(&[][..]));
        assert!(!s.is_valid());
    }

    #[test]
    fn valid_secret_round_trips_bytes() {
        let s = Secret::from_bytes_copy(Amount::from_scaled(1), b"abc").unwrap();
        assert!(s.is_valid());
        assert_eq!(s.serial_bytes(), Some(&b"abc"[..]));
    }

    #[test]
    fn embedded_nul_makes_a_secret_invalid() {
        let s = Secret::from_bytes_copy(Amount::from_scaled(1), b"ab\0c").unwrap();
        assert!(!s.is_valid());
    }

    #[test]
    fn nonpositive_amount_makes_a_secret_invalid() {
        let s = Secret::from_bytes_copy(Amount::from_scaled(0), b"abc").unwrap();
        assert!(!s.is_valid());
        let s = Secret::from_bytes_copy(Amount::from_scaled(-1), b"abc").unwrap();
        assert!(!s.is_valid());
    }

    #[test]
    fn destroy_then_destroy_again_is_invalid_argument() {
        let mut s = Secret::from_bytes_copy(Amount::from_scaled(1), b"abc").unwrap();
        s.destroy().unwrap();
        assert_eq!(s.serial_bytes(), None);
        assert_eq!(s.amount().to_scaled(), 0);
        assert_eq!(s.destroy().unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn public_from_secret_matches_the_well_known_sha256_abc_vector() {
        let secret = Secret::from_bytes_copy(Amount::from_scaled(1), b"abc").unwrap();
        let public = public_from_secret(&secret).unwrap();
        assert_eq!(
            hex::encode(public.hash()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn public_from_destroyed_secret_is_invalid_argument() {
        let mut secret = Secret::from_bytes_copy(Amount::from_scaled(1), b"abc").unwrap();
        secret.destroy().unwrap();
        assert_eq!(
            public_from_secret(&secret).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
