//! Mining-nonce tables (C5): static, read-only byte arrays consumed by external mining
//! loops (and, indirectly, by [`crate::mine8`]'s lane inputs).

use base64ct::{Base64, Encoding};
use once_cell::sync::Lazy;

/// The base64 encodings of the ASCII decimal triples `"000"`, `"001"`, …, `"999"`,
/// concatenated. Each triple encodes to exactly 4 base64 characters (3 bytes → 4
/// characters with no padding), so index `i`'s encoding starts at byte offset `4*i`.
pub static NONCES: Lazy<Vec<u8>> = Lazy::new(|| {
    let mut decoded = String::with_capacity(3000);
    for i in 0..1000u32 {
        decoded.push_str(&format!("{i:03}"));
    }
    Base64::encode_string(decoded.as_bytes()).into_bytes()
});

/// The base64 encoding of the single byte `'}'`.
pub static FINAL: Lazy<Vec<u8>> = Lazy::new(|| Base64::encode_string(b"}").into_bytes());
