//! Block-wise Hill transform
//!
//! Encryption applies the key to consecutive letter pairs; decryption applies
//! the inverse key. Both run the same pipeline:
//! `clean → pad → residues → transform → letters`.

use crate::alphabet::{prepare, to_letters, to_residues, BLOCK_SIZE};
use crate::error::Result;
use crate::key::HillKey;

/// Apply `key` to every consecutive pair of `residues`
///
/// The length must be even; callers pad first.
pub fn apply(key: &HillKey, residues: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(residues.len());
    apply_into(key, residues, &mut out);
    out
}

/// Same as [`apply`] but reuses `out`
pub fn apply_into(key: &HillKey, residues: &[u32], out: &mut Vec<u32>) {
    debug_assert_eq!(residues.len() % BLOCK_SIZE, 0);
    out.clear();
    for pair in residues.chunks_exact(BLOCK_SIZE) {
        let (u, v) = key.apply_pair(pair[0], pair[1]);
        out.push(u);
        out.push(v);
    }
}

/// Encrypt arbitrary text under `key`
///
/// Any key is accepted; a singular key yields ciphertext that cannot be
/// decrypted.
pub fn encrypt(key: &HillKey, plaintext: &str) -> String {
    let residues = to_residues(&prepare(plaintext));
    to_letters(&apply(key, &residues))
}

/// Decrypt arbitrary text under `key`
///
/// Fails with [`crate::HillError::NotInvertible`] when `key` is singular.
pub fn decrypt(key: &HillKey, ciphertext: &str) -> Result<String> {
    let inverse = key.invert()?;
    let residues = to_residues(&prepare(ciphertext));
    Ok(to_letters(&apply(&inverse, &residues)))
}
