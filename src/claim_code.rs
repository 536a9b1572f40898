//! The claim-code codec (C2): `e<amount>:<kind>:<payload>` ASCII wire format.

use crate::amount::Amount;
use crate::error::{Error, ErrorKind};
use crate::secret::{public_from_secret, Public, Secret};

const SECRET_KIND: &str = "secret";
const PUBLIC_KIND: &str = "public";

/// Serializes a secret claim code: `"e" + format(amount) + ":secret:" + serial`.
///
/// Requires a positive amount and a non-empty serial; anything else is
/// [`ErrorKind::InvalidArgument`].
pub fn serialize_secret(secret: &Secret) -> Result<Vec<u8>, Error> {
    if !secret.amount().is_positive() {
        return Err(ErrorKind::InvalidArgument.into());
    }
    let serial = secret
        .serial_bytes()
        .ok_or_else(|| Error::from(ErrorKind::InvalidArgument))?;
    if serial.is_empty() {
        return Err(ErrorKind::InvalidArgument.into());
    }

    let mut out = Vec::with_capacity(1 + 24 + 1 + SECRET_KIND.len() + 1 + serial.len());
    out.push(b'e');
    out.extend_from_slice(secret.amount().format().as_bytes());
    out.push(b':');
    out.extend_from_slice(SECRET_KIND.as_bytes());
    out.push(b':');
    out.extend_from_slice(serial);
    Ok(out)
}

/// Serializes a public claim code: `"e" + format(amount) + ":public:" + lowercase_hex(hash)`.
///
/// Requires a positive amount.
pub fn serialize_public(public: &Public) -> Result<Vec<u8>, Error> {
    if !public.amount().is_positive() {
        return Err(ErrorKind::InvalidArgument.into());
    }
    let mut out = Vec::with_capacity(1 + 24 + 1 + PUBLIC_KIND.len() + 1 + 64);
    out.push(b'e');
    out.extend_from_slice(public.amount().format().as_bytes());
    out.push(b':');
    out.extend_from_slice(PUBLIC_KIND.as_bytes());
    out.push(b':');
    out.extend_from_slice(hex::encode(public.hash()).as_bytes());
    Ok(out)
}

/// Parses a secret claim code.
///
/// Accepts a leading byte other than `e` (flagged noncanonical rather than rejected).
/// Splits on the first two `:` bytes; the middle field must be exactly `"secret"`. The
/// amount sub-field is parsed permissively by [`crate::Amount::parse_permissive`];
/// overall noncanonical is the OR of the amount's flag and "missing `e` sigil". The
/// serial is every byte after the second colon and may be empty — an empty-serial
/// secret parses successfully; its invalidity is a separate, later check (see
/// [`Secret::is_valid`]).
pub fn parse_secret(input: &[u8]) -> Result<(Secret, bool), Error> {
    let (amount, amount_noncanonical, kind, rest) = split_claim_code(input)?;
    if kind != SECRET_KIND.as_bytes() {
        return Err(ErrorKind::InvalidArgument.into());
    }
    let noncanonical = amount_noncanonical || input.first() != Some(&b'e');
    let secret = Secret::from_raw_parts(amount, rest.to_vec());
    Ok((secret, noncanonical))
}

/// Parses a public claim code.
///
/// As [`parse_secret`], with middle field `"public"` and a 64-hex-character payload.
/// Uppercase hex digits are accepted and set noncanonical; any non-hex byte fails with
/// invalid-argument, as does a payload whose length (after the second colon) is not
/// exactly 64 bytes.
pub fn parse_public(input: &[u8]) -> Result<(Public, bool), Error> {
    let (amount, amount_noncanonical, kind, rest) = split_claim_code(input)?;
    if kind != PUBLIC_KIND.as_bytes() {
        return Err(ErrorKind::InvalidArgument.into());
    }
    if rest.len() != 64 {
        return Err(ErrorKind::InvalidArgument.into());
    }
    let rest_str =
        std::str::from_utf8(rest).map_err(|_| Error::from(ErrorKind::InvalidArgument))?;
    let has_upper = rest_str.bytes().any(|b| b.is_ascii_uppercase());
    let lower = rest_str.to_ascii_lowercase();
    let hash_bytes = hex::decode(&lower).map_err(|_| Error::from(ErrorKind::InvalidArgument))?;
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hash_bytes);

    let noncanonical =
        amount_noncanonical || input.first() != Some(&b'e') || has_upper;
    Ok((Public::from_raw_parts(amount, hash), noncanonical))
}

/// Splits `e<amount>:<kind>:<payload>` into its parsed amount (with its own noncanonical
/// flag), the raw `<kind>` bytes, and the raw `<payload>` bytes. Fails if there are
/// fewer than two `:` bytes, or the amount sub-field does not parse.
fn split_claim_code(input: &[u8]) -> Result<(Amount, bool, &[u8], &[u8]), Error> {
    if input.is_empty() {
        return Err(ErrorKind::InvalidArgument.into());
    }
    let after_sigil = &input[1..];

    let first_colon = after_sigil
        .iter()
        .position(|&b| b == b':')
        .ok_or_else(|| Error::from(ErrorKind::InvalidArgument))?;
    let amount_bytes = &after_sigil[..first_colon];
    let after_amount = &after_sigil[first_colon + 1..];

    let second_colon = after_amount
        .iter()
        .position(|&b| b == b':')
        .ok_or_else(|| Error::from(ErrorKind::InvalidArgument))?;
    let kind = &after_amount[..second_colon];
    let rest = &after_amount[second_colon + 1..];

    let amount_str =
        std::str::from_utf8(amount_bytes).map_err(|_| Error::from(ErrorKind::InvalidArgument))?;
    let (amount, amount_noncanonical) = Amount::parse_permissive(amount_str)?;

    Ok((amount, amount_noncanonical, kind, rest))
}

/// Computes the public claim code corresponding to a secret claim code in one step:
/// parse, derive the public value, serialize. Exposed since this is the common path a
/// wallet takes when redeeming or re-offering a secret it holds.
pub fn secret_to_public_claim_code(secret_claim_code: &[u8]) -> Result<Vec<u8>, Error> {
    let (secret, _) = parse_secret(secret_claim_code)?;
    let public = public_from_secret(&secret)?;
    serialize_public(&public)
}
