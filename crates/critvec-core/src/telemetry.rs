//! Tracing setup for the `critvec` binary and test harnesses.
//!
//! Filtering comes from `CRITVEC_LOG` (then `RUST_LOG`), falling back to the
//! level passed by the caller. `CRITVEC_LOG_FORMAT=json` switches to JSON
//! lines even when the caller asked for text. Logs always go to stderr so
//! vector reports on stdout stay machine-readable.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "CRITVEC_LOG";

/// Output format variable; `json` enables JSON lines.
pub const LOG_FORMAT_ENV: &str = "CRITVEC_LOG_FORMAT";

/// Build the filter from `CRITVEC_LOG`, then `RUST_LOG`, then `level`.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

fn json_requested(json: bool, format: Option<&str>) -> bool {
    json || format.is_some_and(|f| f.eq_ignore_ascii_case("json"))
}

/// Install the global subscriber. Only the first call in a process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let format = std::env::var(LOG_FORMAT_ENV).ok();
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(env_filter(level));
    if json_requested(json, format.as_deref()) {
        registry.with(layer.json()).try_init().ok();
    } else {
        registry.with(layer).try_init().ok();
    }
}
