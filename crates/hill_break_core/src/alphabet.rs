//! Alphabet codec
//!
//! Maps the 26 uppercase Latin letters to residues mod 26 and back, and
//! prepares raw text for block processing.

/// Alphabet size, and the modulus for every residue in this crate
pub const MODULUS: u32 = 26;

/// Hill block size (2×2 keys act on letter pairs)
pub const BLOCK_SIZE: usize = 2;

/// Default padding letter
pub const PAD_CHAR: char = 'X';

/// Strip everything that is not an ASCII letter and uppercase the rest
pub fn clean(text: &str) -> String {
    text.chars()
        .filter(|ch| ch.is_ascii_alphabetic())
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

/// Append `pad_char` until the length is a multiple of `block_size`
///
/// The input is assumed to be cleaned already. A `block_size` of 0 or 1
/// leaves the stream untouched.
pub fn pad(stream: &str, block_size: usize, pad_char: char) -> String {
    let mut out = stream.to_string();
    if block_size > 1 {
        let rem = out.len() % block_size;
        if rem != 0 {
            out.extend(std::iter::repeat(pad_char).take(block_size - rem));
        }
    }
    out
}

/// `clean` followed by `pad` to the Hill block size
pub fn prepare(text: &str) -> String {
    pad(&clean(text), BLOCK_SIZE, PAD_CHAR)
}

/// Residue of a single ASCII letter
#[inline]
pub fn letter_to_residue(ch: u8) -> u32 {
    (ch.to_ascii_uppercase().wrapping_sub(b'A') as u32) % MODULUS
}

/// Letter for any integer, reduced mod 26 first
#[inline]
pub fn residue_to_letter(n: u32) -> char {
    (b'A' + (n % MODULUS) as u8) as char
}

/// Convert a cleaned letter stream to residues (A=0 … Z=25)
pub fn to_residues(stream: &str) -> Vec<u32> {
    stream.bytes().map(letter_to_residue).collect()
}

/// Convert residues back to letters
///
/// Out-of-range values are reduced mod 26, so this never fails.
pub fn to_letters(residues: &[u32]) -> String {
    residues.iter().map(|&n| residue_to_letter(n)).collect()
}

/// Same as [`to_letters`] but writes into an existing buffer
pub fn to_letters_into(residues: &[u32], out: &mut String) {
    out.clear();
    out.extend(residues.iter().map(|&n| residue_to_letter(n)));
}
