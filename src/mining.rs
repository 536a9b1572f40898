//! The 8-way mining finalizer (C4): eight independent SHA-256 completions sharing a
//! common absorbed prefix and differing only in a 12-byte nonce tail.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::{Error, ErrorKind};

/// A SHA-256 state that has absorbed a whole number of 64-byte blocks, ready to be
/// forked into up to eight independent completions by [`mine8`].
///
/// This is not literal 8-lane SIMD — `#![forbid(unsafe_code)]` rules that out — but an
/// independent scalar SHA-256 completion per lane, each starting from a clone of the
/// same state. The observable output matches a genuinely parallel 8-way compression
/// bit-for-bit, which is the only contract this component promises.
#[derive(Clone)]
pub struct MiningContext {
    hasher: Sha256,
    bytes_absorbed: u64,
}

impl std::fmt::Debug for MiningContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiningContext")
            .field("bytes_absorbed", &self.bytes_absorbed)
            .finish_non_exhaustive()
    }
}

impl MiningContext {
    /// Builds a mining context by absorbing `prefix` into a fresh hasher.
    ///
    /// `prefix.len()` must be a multiple of 64: the finalizer is defined only for a
    /// state that reflects whole compressed blocks with nothing buffered, mirroring the
    /// source contract's raw block-compression precondition. A non-multiple length is
    /// [`ErrorKind::InvalidArgument`].
    pub fn from_absorbed_prefix(prefix: &[u8]) -> Result<Self, Error> {
        if prefix.len() % 64 != 0 {
            return Err(ErrorKind::InvalidArgument.into());
        }
        let mut hasher = Sha256::new();
        hasher.update(prefix);
        Ok(MiningContext {
            hasher,
            bytes_absorbed: prefix.len() as u64,
        })
    }

    /// How many bytes have been absorbed into this context so far (always a multiple
    /// of 64).
    pub fn bytes_absorbed(&self) -> u64 {
        self.bytes_absorbed
    }
}

/// Completes eight SHA-256 digests from a shared [`MiningContext`], one per lane, each
/// absorbing `nonce1 ‖ nonce2[i] ‖ final` (12 bytes) before finalizing.
///
/// Returns a 256-byte buffer; lane `i`'s 32-byte digest occupies `hashes[i*32..][..32]`.
/// Per-lane output is bit-identical to running a scalar SHA-256 over the context's
/// absorbed prefix concatenated with that lane's 12 trailing bytes — which is exactly
/// how this function computes it, since there is no literal SIMD path available under
/// `forbid(unsafe_code)`.
pub fn mine8(
    ctx: &MiningContext,
    nonce1: [u8; 4],
    nonce2: [[u8; 4]; 8],
    final_bytes: [u8; 4],
) -> [u8; 256] {
    let mut hashes = [0u8; 256];
    for (lane, nonce2_lane) in nonce2.iter().enumerate() {
        let mut tail = [0u8; 12];
        tail[0..4].copy_from_slice(&nonce1);
        tail[4..8].copy_from_slice(nonce2_lane);
        tail[8..12].copy_from_slice(&final_bytes);

        let mut hasher = ctx.hasher.clone();
        hasher.update(tail);
        tail.zeroize();

        let digest = hasher.finalize();
        hashes[lane * 32..(lane + 1) * 32].copy_from_slice(&digest);
    }
    hashes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_absorbed_prefix_rejects_unaligned_length() {
        assert_eq!(
            MiningContext::from_absorbed_prefix(&[0u8; 63])
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );
        let one_block = MiningContext::from_absorbed_prefix(&[0u8; 64]).unwrap();
        assert_eq!(one_block.bytes_absorbed(), 64);
        let empty = MiningContext::from_absorbed_prefix(&[]).unwrap();
        assert_eq!(empty.bytes_absorbed(), 0);
    }

    #[test]
    fn mine8_matches_scalar_sha256_per_lane() {
        let prefix = [0x42u8; 128];
        let ctx = MiningContext::from_absorbed_prefix(&prefix).unwrap();

        let nonce1 = [1u8, 2, 3, 4];
        let nonce2: [[u8; 4]; 8] = std::array::from_fn(|i| [i as u8, i as u8, i as u8, i as u8]);
        let final_bytes = [9u8, 8, 7, 6];

        let hashes = mine8(&ctx, nonce1, nonce2, final_bytes);

        for (lane, nonce2_lane) in nonce2.iter().enumerate() {
            let mut message = prefix.to_vec();
            message.extend_from_slice(&nonce1);
            message.extend_from_slice(nonce2_lane);
            message.extend_from_slice(&final_bytes);
            let expected = Sha256::digest(&message);
            assert_eq!(&hashes[lane * 32..(lane + 1) * 32], expected.as_slice());
        }
    }

    #[test]
    fn different_lanes_produce_different_digests() {
        let ctx = MiningContext::from_absorbed_prefix(&[0u8; 64]).unwrap();
        let nonce2: [[u8; 4]; 8] = std::array::from_fn(|i| [0, 0, 0, i as u8]);
        let hashes = mine8(&ctx, [0u8; 4], nonce2, [0u8; 4]);
        let lane0 = &hashes[0..32];
        let lane1 = &hashes[32..64];
        assert_ne!(lane0, lane1);
    }

    #[test]
    fn empty_context_matches_scalar_sha256_of_bare_tail() {
        let ctx = MiningContext::from_absorbed_prefix(&[]).unwrap();
        let nonce1 = [0xAAu8; 4];
        let nonce2 = [[0xBBu8; 4]; 8];
        let final_bytes = [0xCCu8; 4];
        let hashes = mine8(&ctx, nonce1, nonce2, final_bytes);

        let mut message = Vec::new();
        message.extend_from_slice(&nonce1);
        message.extend_from_slice(&nonce2[0]);
        message.extend_from_slice(&final_bytes);
        let expected = Sha256::digest(&message);
        assert_eq!(&hashes[0..32], expected.as_slice());
    }
}
