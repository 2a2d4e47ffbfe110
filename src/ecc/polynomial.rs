use super::gf256::{Gf256, gexp};

/// Polynomial over GF(256), coefficients highest degree first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<u8>,
}

impl Polynomial {
    /// Build from `coeffs` multiplied by x^shift; leading zeros are trimmed
    pub fn new(coeffs: &[u8], shift: usize) -> Self {
        let start = coeffs
            .iter()
            .position(|&c| c != 0)
            .unwrap_or(coeffs.len());
        let mut trimmed = Vec::with_capacity(coeffs.len() - start + shift);
        trimmed.extend_from_slice(&coeffs[start..]);
        if !trimmed.is_empty() {
            trimmed.resize(trimmed.len() + shift, 0);
        }
        Self { coeffs: trimmed }
    }

    /// Generator ∏ (x − α^i) for i in 0..degree
    pub fn generator(degree: usize) -> Self {
        let mut poly = Self::new(&[1], 0);
        for i in 0..degree {
            poly = poly.multiply(&Self::new(&[1, gexp(i)], 0));
        }
        poly
    }

    /// Coefficients, highest degree first; empty for the zero polynomial
    pub fn coeffs(&self) -> &[u8] {
        &self.coeffs
    }

    /// Number of stored coefficients (degree + 1)
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Product in GF(256)
    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        if self.is_zero() || other.is_zero() {
            return Self { coeffs: Vec::new() };
        }
        let mut out = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                out[i + j] ^= Gf256::mul(a, b);
            }
        }
        Self::new(&out, 0)
    }

    /// Remainder of long division by `divisor`.
    ///
    /// Panics when `divisor` is the zero polynomial.
    pub fn rem(&self, divisor: &Polynomial) -> Polynomial {
        assert!(!divisor.is_zero(), "polynomial division by zero");
        let lead = divisor.coeffs[0];
        let mut rest = self.coeffs.clone();
        while rest.len() >= divisor.len() {
            let factor = Gf256::div(rest[0], lead);
            for (r, &d) in rest.iter_mut().zip(&divisor.coeffs) {
                if d != 0 {
                    *r ^= Gf256::mul(d, factor);
                }
            }
            let skip = rest.iter().position(|&c| c != 0).unwrap_or(rest.len());
            rest.drain(..skip);
        }
        Self { coeffs: rest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_shifts() {
        let p = Polynomial::new(&[0, 0, 3, 4], 2);
        assert_eq!(p.coeffs(), &[3, 4, 0, 0]);
        assert!(Polynomial::new(&[0, 0], 3).is_zero());
    }

    #[test]
    fn test_generator_degree_7() {
        // Known QR generator for 7 EC codewords, as α exponents: 0 87 229 146 149 238 102 21
        let g = Polynomial::generator(7);
        let expected: Vec<u8> = [0usize, 87, 229, 146, 149, 238, 102, 21]
            .iter()
            .map(|&e| gexp(e))
            .collect();
        assert_eq!(g.coeffs(), expected.as_slice());
    }

    #[test]
    fn test_multiply() {
        // (x + 1)(x + 1) = x^2 + 1 in characteristic 2
        let p = Polynomial::new(&[1, 1], 0);
        assert_eq!(p.multiply(&p).coeffs(), &[1, 0, 1]);
    }

    #[test]
    fn test_rem_of_multiple_is_zero() {
        let g = Polynomial::generator(10);
        let q = Polynomial::new(&[7, 0, 19, 200], 0);
        assert!(q.multiply(&g).rem(&g).is_zero());
    }

    #[test]
    fn test_rem_known_codewords() {
        // Version 1-M "01234567" data codewords and their published EC bytes
        let data = [
            0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11,
        ];
        let g = Polynomial::generator(10);
        let r = Polynomial::new(&data, g.len() - 1).rem(&g);
        assert_eq!(
            r.coeffs(),
            &[0xA5, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55]
        );
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_rem_by_zero_panics() {
        Polynomial::new(&[1, 2], 0).rem(&Polynomial::new(&[0], 0));
    }
}
