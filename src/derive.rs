//! Deterministic serial derivation (C3): a process-wide tagged hash midstate, forked
//! once per (root, chaincode, depth) triple.

use once_cell::sync::OnceCell;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

const TAG: &[u8] = b"webcashwalletv1";

static MIDSTATE: OnceCell<Sha256> = OnceCell::new();

/// Returns the process-wide tagged hash state, computing it on first call.
///
/// Forms `t = SHA256(tag)`, then absorbs `t || t` into a fresh hasher. Every
/// derivation clones this hasher rather than starting from scratch, so the tag is
/// effectively hashed once per process instead of once per derivation.
fn midstate() -> &'static Sha256 {
    MIDSTATE.get_or_init(|| {
        let t = Sha256::digest(TAG);
        let mut hasher = Sha256::new();
        hasher.update(t);
        hasher.update(t);
        hasher
    })
}

/// Forces initialization of the tagged midstate. Called by [`crate::init`]; harmless to
/// call redundantly, since [`midstate`] memoizes.
pub(crate) fn tag_midstate() {
    midstate();
}

/// Builds the 48-byte derivation payload `root(32) || chaincode_be64 || depth_be64`.
fn derivation_block(root: &[u8; 32], chaincode: u64, depth: u64) -> [u8; 48] {
    let mut block = [0u8; 48];
    block[..32].copy_from_slice(root);
    block[32..40].copy_from_slice(&chaincode.to_be_bytes());
    block[40..48].copy_from_slice(&depth.to_be_bytes());
    block
}

/// Derives a single serial: forks the tagged midstate, absorbs the 48-byte payload for
/// `(root, chaincode, depth)`, and emits the resulting digest as 64 lowercase hex chars.
///
/// Infallible: there is no failure mode once the arguments type-check.
pub fn derive_one(root: &[u8; 32], chaincode: u64, depth: u64) -> String {
    let mut block = derivation_block(root, chaincode, depth);
    let mut hasher = midstate().clone();
    hasher.update(block);
    block.zeroize();
    let digest = hasher.finalize();
    hex::encode(digest)
}

/// Derives `count` serials at consecutive depths `start_depth, start_depth + 1, …`.
///
/// Semantically identical to `count` calls to [`derive_one`] at those depths; the
/// `count`-many digests are returned as lowercase hex strings in ascending depth order.
/// A `count` of zero returns an empty vector and never fails — there is no error path.
///
/// Internally processes in batches of up to eight to mirror the source contract's
/// throughput-oriented batching (its first batch absorbs `((count - 1) % 8) + 1` items
/// so every subsequent batch is a full eight); since each lane's digest here is an
/// independent scalar hash of the shared, cloned midstate, this batching changes
/// nothing observable and exists only to keep the two implementations structurally
/// parallel.
pub fn derive_many(root: &[u8; 32], chaincode: u64, start_depth: u64, count: u64) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(count as usize);
    let first_batch = ((count - 1) % 8) + 1;
    let mut depth = start_depth;
    let mut remaining = count;

    let mut batch_size = first_batch;
    while remaining > 0 {
        for _ in 0..batch_size {
            out.push(derive_one(root, chaincode, depth));
            depth = depth.wrapping_add(1);
        }
        remaining -= batch_size;
        batch_size = 8;
    }

    out
}
