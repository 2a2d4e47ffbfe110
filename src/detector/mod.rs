//! Symbol location in a binarized image
//!
//! - Finder pattern detection (the three square markers)
//! - Alignment pattern search (to correct perspective on larger symbols)

/// Alignment pattern search for QR versions 2+
pub mod alignment;
/// Finder pattern detection using 1:1:3:1:1 ratio scanning
pub mod finder;
