//! Modular arithmetic over small moduli
//!
//! Extended Euclid, modular inverses and reduction helpers used by the key
//! algebra.

use crate::error::{HillError, Result};
use num_integer::Integer;

/// Extended Euclidean algorithm
///
/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`. Quotients and
/// remainders use floored division so the Bézout coefficients are the same
/// for every input sign as the classic recursive formulation.
pub fn extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    if a == 0 {
        (b, 0, 1)
    } else {
        let (q, r) = b.div_mod_floor(&a);
        let (g, x1, y1) = extended_gcd(r, a);
        (g, y1 - q * x1, x1)
    }
}

/// Modular inverse of `a` modulo `m`
///
/// Fails with [`HillError::NoInverse`] when `gcd(a mod m, m) != 1`.
/// The result lies in `[0, m)`.
pub fn mod_inverse(a: i64, m: u32) -> Result<u32> {
    let no_inverse = HillError::NoInverse {
        value: a,
        modulus: m as i64,
    };
    if m == 0 {
        return Err(no_inverse);
    }

    let m64 = m as i64;
    let (g, x, _) = extended_gcd(a.mod_floor(&m64), m64);
    if g != 1 {
        return Err(no_inverse);
    }
    Ok(x.mod_floor(&m64) as u32)
}

/// Reduce any signed integer into `[0, m)`
#[inline]
pub fn reduce(value: i64, m: u32) -> u32 {
    value.rem_euclid(m as i64) as u32
}

/// True when `a` and `m` share no common factor
#[inline]
pub fn is_unit(a: u32, m: u32) -> bool {
    a.gcd(&m) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_gcd_vectors() {
        assert_eq!(extended_gcd(240, 46), (2, -9, 47));
        assert_eq!(extended_gcd(3, 26), (1, 9, -1));
        assert_eq!(extended_gcd(0, 7), (7, 0, 1));
        assert_eq!(extended_gcd(26, 9), (1, -1, 3));
    }

    #[test]
    fn test_extended_gcd_bezout_identity() {
        for a in -30i64..30 {
            for b in -30i64..30 {
                let (g, x, y) = extended_gcd(a, b);
                assert_eq!(a * x + b * y, g, "a={} b={}", a, b);
                if a != 0 || b != 0 {
                    assert_eq!(g.abs(), a.gcd(&b));
                }
            }
        }
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(3, 26), Ok(9));
        assert_eq!(mod_inverse(9, 26), Ok(3));
        assert_eq!(mod_inverse(25, 26), Ok(25));
        assert_eq!(mod_inverse(-3, 26), Ok(17));
        assert_eq!(mod_inverse(29, 26), Ok(9));
    }

    #[test]
    fn test_mod_inverse_all_units() {
        for a in 0..26u32 {
            match mod_inverse(a as i64, 26) {
                Ok(inv) => {
                    assert!(inv < 26);
                    assert_eq!((a * inv) % 26, 1);
                    assert!(is_unit(a, 26));
                }
                Err(err) => {
                    assert!(!is_unit(a, 26));
                    assert_eq!(
                        err,
                        HillError::NoInverse {
                            value: a as i64,
                            modulus: 26
                        }
                    );
                }
            }
        }
    }

    #[test]
    fn test_mod_inverse_zero_modulus() {
        assert!(mod_inverse(5, 0).is_err());
    }

    #[test]
    fn test_reduce() {
        assert_eq!(reduce(-1, 26), 25);
        assert_eq!(reduce(52, 26), 0);
        assert_eq!(reduce(-53, 26), 25);
    }
}
