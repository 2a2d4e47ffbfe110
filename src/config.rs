//! Validator configuration with environment overrides
//!
//! | Variable             | Field            | Default  |
//! |----------------------|------------------|----------|
//! | `QR_BINARIZER`       | `binarizer`      | `hybrid` |
//! | `QR_ADAPTIVE_WINDOW` | `adaptive_window`| `31`     |
//! | `QR_MAX_GROUPS`      | `max_groups`     | `40`     |
//! | `QR_RETRY_DELAY_MS`  | `retry_delay`    | `0`      |
//! | `QR_DEBUG_DIR`       | `debug_dir`      | unset    |

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

/// How luminance is turned into dark/light modules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binarizer {
    /// Single global threshold
    Otsu,
    /// Local-mean threshold over a square window
    Adaptive,
    /// Otsu first, adaptive when Otsu does not decode
    Hybrid,
}

impl FromStr for Binarizer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "otsu" | "global" => Ok(Binarizer::Otsu),
            "adaptive" | "local" => Ok(Binarizer::Adaptive),
            "hybrid" => Ok(Binarizer::Hybrid),
            other => Err(format!("unknown binarizer {other:?}")),
        }
    }
}

/// Tunables for [`crate::ScanValidator`]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    pub binarizer: Binarizer,
    /// Side of the adaptive window in pixels
    pub adaptive_window: usize,
    /// Finder triples tried per binarization
    pub max_groups: usize,
    /// Pause before the inverted retry
    pub retry_delay: Duration,
    /// Where debug images go when a call does not name a path
    pub debug_dir: Option<PathBuf>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            binarizer: Binarizer::Hybrid,
            adaptive_window: 31,
            max_groups: 40,
            retry_delay: Duration::ZERO,
            debug_dir: None,
        }
    }
}

impl ValidatorConfig {
    /// Defaults overridden by any `QR_*` variables that parse
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            binarizer: parse_env("QR_BINARIZER", defaults.binarizer),
            adaptive_window: parse_env("QR_ADAPTIVE_WINDOW", defaults.adaptive_window)
                .clamp(3, 255)
                | 1,
            max_groups: parse_env("QR_MAX_GROUPS", defaults.max_groups).max(1),
            retry_delay: Duration::from_millis(parse_env("QR_RETRY_DELAY_MS", 0u64)),
            debug_dir: std::env::var_os("QR_DEBUG_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Process-wide configuration, read from the environment on first use
    pub fn global() -> &'static ValidatorConfig {
        static GLOBAL: OnceLock<ValidatorConfig> = OnceLock::new();
        GLOBAL.get_or_init(Self::from_env)
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
