//! Reed-Solomon coding over GF(256) as used by QR codes.
//!
//! Codewords are stored highest degree first: `c[0]` is the coefficient of
//! x^(n-1). The generator has roots α^0 .. α^(ecc-1).

use super::gf256::{Gf256, gexp};
use super::polynomial::Polynomial;
use crate::error::DecodeError;

/// Computes the EC codewords of a data block
pub struct ReedSolomonEncoder {
    generator: Polynomial,
    num_ecc_codewords: usize,
}

impl ReedSolomonEncoder {
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self {
            generator: Polynomial::generator(num_ecc_codewords),
            num_ecc_codewords,
        }
    }

    /// EC codewords for `data`: remainder of data·x^ecc mod generator, left padded
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let rem = Polynomial::new(data, self.num_ecc_codewords).rem(&self.generator);
        let mut ecc = vec![0u8; self.num_ecc_codewords - rem.len()];
        ecc.extend_from_slice(rem.coeffs());
        ecc
    }
}

/// Reed-Solomon decoder (Berlekamp-Massey, Chien search, Forney)
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` in place, returning how many codewords changed
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, DecodeError> {
        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = self.find_error_locator(&syndrome);
        let positions = self.find_error_positions(&sigma, received.len())?;
        let values = self.find_error_values(&sigma, &syndrome, &positions, received.len())?;

        for (&pos, &value) in positions.iter().zip(&values) {
            received[pos] ^= value;
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err(DecodeError::Checksum);
        }
        Ok(positions.len())
    }

    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        let n = received.len();
        (0..self.num_ecc_codewords)
            .map(|i| {
                received.iter().enumerate().fold(0u8, |sum, (j, &r)| {
                    sum ^ Gf256::mul(r, gexp(i * (n - 1 - j)))
                })
            })
            .collect()
    }

    /// Error locator σ(x), lowest degree first, trailing zeros trimmed
    fn find_error_locator(&self, syndrome: &[u8]) -> Vec<u8> {
        let mut sigma = vec![1u8];
        let mut prev = vec![1u8];
        let mut prev_delta: u8 = 1;
        let mut l = 0;
        let mut m = 1;

        for i in 0..syndrome.len() {
            let mut delta = syndrome[i];
            for j in 1..=l.min(sigma.len() - 1) {
                delta ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            let snapshot = sigma.clone();
            let factor = Gf256::div(delta, prev_delta);
            if sigma.len() < prev.len() + m {
                sigma.resize(prev.len() + m, 0);
            }
            for (j, &b) in prev.iter().enumerate() {
                sigma[j + m] ^= Gf256::mul(factor, b);
            }

            if 2 * l <= i {
                prev = snapshot;
                prev_delta = delta;
                l = i + 1 - l;
                m = 1;
            } else {
                m += 1;
            }
        }

        while sigma.len() > 1 && sigma.last() == Some(&0) {
            sigma.pop();
        }
        sigma
    }

    /// Chien search: σ has a root at α^-(n-1-pos) for every error position
    fn find_error_positions(&self, sigma: &[u8], n: usize) -> Result<Vec<usize>, DecodeError> {
        let degree = sigma.len() - 1;
        if degree == 0 || degree > self.num_ecc_codewords / 2 {
            return Err(DecodeError::Checksum);
        }

        let positions: Vec<usize> = (0..n)
            .filter(|&i| evaluate(sigma, Gf256::inv(gexp(n - 1 - i))) == 0)
            .collect();

        if positions.len() != degree {
            return Err(DecodeError::Checksum);
        }
        Ok(positions)
    }

    /// Forney: e_k = X_k · Ω(X_k⁻¹) / σ'(X_k⁻¹)
    fn find_error_values(
        &self,
        sigma: &[u8],
        syndrome: &[u8],
        positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, DecodeError> {
        let mut omega = vec![0u8; syndrome.len()];
        for (i, slot) in omega.iter_mut().enumerate() {
            for (j, &s) in sigma.iter().enumerate().take(i + 1) {
                *slot ^= Gf256::mul(s, syndrome[i - j]);
            }
        }

        // Formal derivative: odd terms shift down by one
        let sigma_prime: Vec<u8> = sigma
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
            .collect();

        positions
            .iter()
            .map(|&pos| {
                let x_k = gexp(n - 1 - pos);
                let x_inv = Gf256::inv(x_k);
                let denom = evaluate(&sigma_prime, x_inv);
                if denom == 0 {
                    return Err(DecodeError::Checksum);
                }
                Ok(Gf256::mul(x_k, Gf256::div(evaluate(&omega, x_inv), denom)))
            })
            .collect()
    }
}

/// Evaluate a lowest-degree-first polynomial at `x`
fn evaluate(poly: &[u8], x: u8) -> u8 {
    poly.iter()
        .rev()
        .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
}
