//! Error correction shared by the encoder and decoder
//!
//! - GF(256) arithmetic
//! - Polynomials over GF(256)
//! - Reed-Solomon encoding and correction
//! - BCH codes for format and version information

/// BCH(15,5) format and BCH(18,6) version codes
pub mod bch;
/// GF(256) log/antilog tables
pub mod gf256;
/// Polynomials over GF(256)
pub mod polynomial;
/// Reed-Solomon encoder and decoder
pub mod reed_solomon;

pub use gf256::{Gf256, gexp, glog};
pub use polynomial::Polynomial;
pub use reed_solomon::{ReedSolomonDecoder, ReedSolomonEncoder};
