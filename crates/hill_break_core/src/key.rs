//! 2×2 key matrices over Z/26
//!
//! A key `(a, b, c, d)` is stored row-major and acts on a letter pair as
//! `(x, y) -> (a·x + b·y, c·x + d·y) mod 26`.

use crate::alphabet::MODULUS;
use crate::error::{HillError, Result};
use crate::modular::{is_unit, mod_inverse, reduce};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Number of 2×2 matrices over Z/26
pub const KEY_SPACE: usize = 26 * 26 * 26 * 26;

/// Number of invertible 2×2 matrices over Z/26, |GL2(Z/2)|·|GL2(Z/13)|
pub const INVERTIBLE_KEY_COUNT: usize = 157_248;

/// A 2×2 Hill key with every entry reduced into `[0, 26)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HillKey {
    entries: [u32; 4],
}

impl HillKey {
    /// Build a key from arbitrary integers, reducing each entry mod 26
    pub fn new(a: i64, b: i64, c: i64, d: i64) -> Self {
        Self {
            entries: [
                reduce(a, MODULUS),
                reduce(b, MODULUS),
                reduce(c, MODULUS),
                reduce(d, MODULUS),
            ],
        }
    }

    /// Build a key from residues that are already in range
    #[inline]
    pub(crate) fn from_residues(entries: [u32; 4]) -> Self {
        debug_assert!(entries.iter().all(|&e| e < MODULUS));
        Self { entries }
    }

    pub fn identity() -> Self {
        Self::from_residues([1, 0, 0, 1])
    }

    /// Key at position `index` of the row-major enumeration
    /// (`a` outermost, `d` innermost). `index` is taken mod [`KEY_SPACE`].
    pub fn from_index(index: usize) -> Self {
        let m = MODULUS as usize;
        let i = index % KEY_SPACE;
        Self::from_residues([
            (i / (m * m * m)) as u32,
            ((i / (m * m)) % m) as u32,
            ((i / m) % m) as u32,
            (i % m) as u32,
        ])
    }

    /// Position of this key in the row-major enumeration
    pub fn index(&self) -> usize {
        let m = MODULUS as usize;
        self.entries
            .iter()
            .fold(0usize, |acc, &e| acc * m + e as usize)
    }

    /// Entries in row-major order `[a, b, c, d]`
    #[inline]
    pub fn entries(&self) -> [u32; 4] {
        self.entries
    }

    /// `(a·d − b·c) mod 26`
    #[inline]
    pub fn determinant(&self) -> u32 {
        let [a, b, c, d] = self.entries;
        // b·c <= 625 < 26², so the offset keeps the difference non-negative
        (a * d + MODULUS * MODULUS - b * c) % MODULUS
    }

    /// A key is invertible iff its determinant is coprime to 26
    #[inline]
    pub fn is_invertible(&self) -> bool {
        is_unit(self.determinant(), MODULUS)
    }

    /// Inverse key: adjugate scaled by the inverse determinant
    ///
    /// Fails with [`HillError::NotInvertible`] on a singular key.
    pub fn invert(&self) -> Result<Self> {
        let determinant = self.determinant();
        if !is_unit(determinant, MODULUS) {
            return Err(HillError::NotInvertible { determinant });
        }
        let det_inv = mod_inverse(determinant as i64, MODULUS)? as i64;

        let [a, b, c, d] = self.entries.map(|e| e as i64);
        Ok(Self::new(d * det_inv, -b * det_inv, -c * det_inv, a * det_inv))
    }

    /// Matrix-vector product mod 26 on one letter pair
    #[inline]
    pub fn apply_pair(&self, x: u32, y: u32) -> (u32, u32) {
        let [a, b, c, d] = self.entries;
        ((a * x + b * y) % MODULUS, (c * x + d * y) % MODULUS)
    }

    /// Uniformly random invertible key (rejection sampling)
    pub fn random_invertible<R: Rng>(rng: &mut R) -> Self {
        loop {
            let key = Self::from_residues([
                rng.gen_range(0..MODULUS),
                rng.gen_range(0..MODULUS),
                rng.gen_range(0..MODULUS),
                rng.gen_range(0..MODULUS),
            ]);
            if key.is_invertible() {
                return key;
            }
        }
    }

    /// Iterate every key in row-major enumeration order
    pub fn all() -> impl Iterator<Item = HillKey> {
        (0..KEY_SPACE).map(Self::from_index)
    }
}

impl fmt::Display for HillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.entries;
        write!(f, "[[{:2}, {:2}], [{:2}, {:2}]]", a, b, c, d)
    }
}

/// Parses four integers separated by whitespace and/or commas
///
/// Each value is reduced mod 26, so `"29 -1 0 1"` is the key `[[3, 25], [0, 1]]`.
impl FromStr for HillKey {
    type Err = HillError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.len() != 4 {
            return Err(HillError::InvalidKeyFormat(format!(
                "expected exactly 4 integers (row-major), got {}",
                tokens.len()
            )));
        }

        let mut values = [0i64; 4];
        for (slot, token) in values.iter_mut().zip(&tokens) {
            *slot = token.parse::<i64>().map_err(|_| {
                HillError::InvalidKeyFormat(format!("'{}' is not an integer", token))
            })?;
        }

        let [a, b, c, d] = values;
        Ok(Self::new(a, b, c, d))
    }
}
