//! Shared helpers for integration tests

use std::sync::Once;

use styled_qr::{ECLevel, EncodedQr, encode};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install a test-writer subscriber once; `RUST_LOG` overrides the filter
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,styled_qr=debug"));
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_test_writer().compact())
            .init();
    });
}

#[allow(dead_code)]
pub fn encode_or_panic(data: &str, ec_level: ECLevel) -> EncodedQr {
    encode(data, ec_level).unwrap_or_else(|e| panic!("encode {data:?} at {ec_level:?}: {e}"))
}
